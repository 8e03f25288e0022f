//! 원장 서비스 통합 테스트

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use tradenote_core::{
    FixedClock, Outcome, Position, RecordReplicator, TradeDraft, TradeRecord,
};
use tradenote_ledger::{
    JsonFileStore, LedgerService, MemoryStore, PersistenceStore, SequentialIdGenerator,
};

fn at(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn ledger_at(store: Arc<dyn PersistenceStore>, now: &str) -> (LedgerService, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(at(now)));
    let ledger = LedgerService::new(store, clock.clone());
    (ledger, clock)
}

fn draft_on(day: &str, stock: &str, profit: i64) -> TradeDraft {
    TradeDraft::new(date(day), stock).with_profit(profit)
}

#[derive(Default)]
struct RecordingReplicator {
    seen: Mutex<Vec<String>>,
}

impl RecordReplicator for RecordingReplicator {
    fn replicate(&self, record: &TradeRecord) {
        self.seen.lock().unwrap().push(record.id.to_string());
    }

    fn name(&self) -> &str {
        "recording"
    }
}

proptest! {
    #[test]
    fn ids_are_unique_over_any_add_sequence(profits in proptest::collection::vec(-1_000_000i64..1_000_000, 1..40)) {
        let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-01T09:00:00");
        for (i, profit) in profits.iter().enumerate() {
            ledger.add(draft_on("2024-03-01", &format!("S{}", i % 3), *profit));
        }

        let all = ledger.query_all();
        let ids: HashSet<_> = all.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(all.len(), profits.len());
        prop_assert_eq!(ids.len(), profits.len());
    }

    #[test]
    fn sequential_ids_resuming_on_existing_store_stay_unique(prior in 1usize..10, more in 1usize..10) {
        let store = Arc::new(MemoryStore::new());
        for _ in 0..2 {
            let (ledger, _) = ledger_at(store.clone(), "2024-03-01T09:00:00");
            let ledger = ledger.with_id_generator(Arc::new(SequentialIdGenerator::new("t")));
            let n = if store.write_count() == 0 { prior } else { more };
            for _ in 0..n {
                ledger.add(draft_on("2024-03-01", "A", 1));
            }
        }

        let (ledger, _) = ledger_at(store, "2024-03-01T09:00:00");
        let all = ledger.query_all();
        let ids: HashSet<_> = all.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(ids.len(), prior + more);
    }
}

#[test]
fn delete_is_idempotent_for_absent_id() {
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-01T09:00:00");
    let kept = ledger.add(draft_on("2024-03-01", "A", 100));
    let removed = ledger.add(draft_on("2024-03-01", "B", 200));

    let after_first = ledger.delete(removed.id.as_str());
    let after_second = ledger.delete(removed.id.as_str());

    assert_eq!(after_first, after_second);
    assert_eq!(after_first, vec![kept]);
}

#[test]
fn delete_removes_only_matching_record() {
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-01T09:00:00");
    let a = ledger.add(draft_on("2024-03-01", "A", 1));
    let b = ledger.add(draft_on("2024-03-01", "B", 2));
    let c = ledger.add(draft_on("2024-03-01", "C", 3));

    let remaining = ledger.delete(b.id.as_str());
    assert_eq!(remaining, vec![a, c]);
    assert_eq!(ledger.query_all(), remaining);
}

#[test]
fn today_window_follows_local_midnight() {
    let store = Arc::new(MemoryStore::new());
    let (ledger, clock) = ledger_at(store, "2024-03-01T00:00:00");
    ledger.add(draft_on("2024-03-01", "A", 10));
    ledger.add(draft_on("2024-02-29", "B", 20));
    ledger.add(draft_on("2024-03-02", "C", 30));

    let stocks = |records: Vec<TradeRecord>| -> Vec<String> {
        records.into_iter().map(|r| r.stock).collect()
    };

    assert_eq!(stocks(ledger.query_today()), vec!["A"]);

    clock.set(at("2024-03-01T23:59:59"));
    assert_eq!(stocks(ledger.query_today()), vec!["A"]);

    clock.set(at("2024-03-02T00:00:00"));
    assert_eq!(stocks(ledger.query_today()), vec!["C"]);
    assert_eq!(stocks(ledger.query_this_month()), vec!["A", "C"]);
}

#[test]
fn window_uses_trade_date_not_creation_time() {
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-15T12:00:00");
    ledger.add(draft_on("2024-02-10", "Backfilled", 500));

    assert!(ledger.query_today().is_empty());
    assert!(ledger.query_this_month().is_empty());
    assert_eq!(ledger.query_all().len(), 1);
}

#[test]
fn month_window_requires_same_year() {
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-15T12:00:00");
    ledger.add(draft_on("2023-03-15", "LastYear", 1));
    ledger.add(draft_on("2024-03-31", "ThisMonth", 2));

    let month = ledger.query_this_month();
    assert_eq!(month.len(), 1);
    assert_eq!(month[0].stock, "ThisMonth");
}

#[test]
fn unselected_form_fields_do_not_wipe_snapshot() {
    let raw = r#"[
        {"id":"1709251200000","date":"2024-03-01","stock":"A","position":"","result":"",
         "profit":700,"chartImage":null,"profitReason":"","lossReason":"",
         "createdAt":"2024-03-01T05:20:00.000Z"},
        {"id":"1709251300000","date":"2024-03-01","stock":"B","position":"long","result":"loss",
         "profit":5000,"chartImage":null,"profitReason":null,"lossReason":"늦은 손절",
         "createdAt":"2024-03-01T05:21:40.000Z"}
    ]"#;
    let store = Arc::new(MemoryStore::with_bytes(raw));
    let (ledger, _) = ledger_at(store, "2024-03-01T09:00:00");

    let before = ledger.query_all();
    assert_eq!(before.len(), 2);
    assert_eq!(before[0].position, None);
    assert_eq!(before[1].profit, -5000);

    ledger.add(draft_on("2024-03-01", "C", 100));
    assert_eq!(ledger.query_all().len(), 3);
    assert_eq!(ledger.health().corrupt_loads, 0);
}

#[test]
fn ledgers_sharing_a_store_do_not_lose_adds() {
    let store = Arc::new(MemoryStore::new());
    let ledgers: Vec<_> = (0..4)
        .map(|_| Arc::new(ledger_at(store.clone(), "2024-03-01T09:00:00").0))
        .collect();

    let handles: Vec<_> = ledgers
        .iter()
        .enumerate()
        .map(|(t, ledger)| {
            let ledger = ledger.clone();
            std::thread::spawn(move || {
                for i in 0..20 {
                    ledger.add(draft_on("2024-03-01", &format!("L{}-{}", t, i), 1));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(ledgers[0].query_all().len(), 80);
}

#[test]
fn save_of_loaded_snapshot_keeps_bytes() {
    let store = Arc::new(MemoryStore::new());
    let (ledger, _) = ledger_at(store.clone(), "2024-03-01T09:00:00");
    ledger.add(
        draft_on("2024-03-01", "삼성전자", 0)
            .with_position(Position::Long)
            .with_result(Outcome::Win)
            .with_profit(dec!(15000.9))
            .with_profit_reason("돌파 매매"),
    );
    ledger.add(draft_on("2024-03-01", "", -300).with_loss_reason("추격 매수"));

    let before = store.raw_bytes().unwrap();
    let loaded = store.load().unwrap();
    store.save(&loaded).unwrap();

    assert_eq!(store.raw_bytes().unwrap(), before);
    assert_eq!(loaded[0].profit, 15000);
}

#[test]
fn corrupt_snapshot_reads_as_empty() {
    let store = Arc::new(MemoryStore::with_bytes("{\"trades\": oops"));
    let (ledger, _) = ledger_at(store, "2024-03-01T09:00:00");

    assert!(ledger.query_all().is_empty());
    assert!(ledger.query_today().is_empty());

    let health = ledger.health();
    assert_eq!(health.corrupt_loads, 2);
    assert_eq!(health.load_failures, 0);
    assert!(health.is_degraded());
}

#[test]
fn failed_save_still_returns_record() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_writes(true);
    let (ledger, _) = ledger_at(store.clone(), "2024-03-01T09:00:00");

    let recorded = ledger.add_with_status(draft_on("2024-03-01", "A", 100));
    assert!(!recorded.durable);
    assert_eq!(recorded.record.stock, "A");
    assert_eq!(ledger.health().save_failures, 1);
    assert!(store.raw_bytes().is_none());

    store.set_fail_writes(false);
    let recorded = ledger.add_with_status(draft_on("2024-03-01", "B", 100));
    assert!(recorded.durable);
    assert_eq!(ledger.query_all().len(), 1);
}

#[test]
fn loss_draft_is_stored_negative() {
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-01T09:00:00");
    let record = ledger.add(
        draft_on("2024-03-01", "  카카오  ", 0)
            .with_result(Outcome::Loss)
            .with_profit(dec!(12000.7)),
    );

    assert_eq!(record.profit, -12000);
    assert_eq!(record.stock, "카카오");
}

#[test]
fn replicator_receives_each_new_record() {
    let replicator = Arc::new(RecordingReplicator::default());
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-01T09:00:00");
    let ledger = ledger.with_replicator(replicator.clone());

    let a = ledger.add(draft_on("2024-03-01", "A", 1));
    let b = ledger.add(draft_on("2024-03-01", "B", 2));
    ledger.delete(a.id.as_str());

    let seen = replicator.seen.lock().unwrap().clone();
    assert_eq!(seen, vec![a.id.to_string(), b.id.to_string()]);
}

#[test]
fn file_store_survives_service_restart() {
    let dir = std::env::temp_dir().join(format!("tradenote-ledger-{}", uuid::Uuid::new_v4()));
    let path = dir.join("trades.json");

    {
        let (ledger, _) = ledger_at(Arc::new(JsonFileStore::new(&path)), "2024-03-01T09:00:00");
        ledger.add(draft_on("2024-03-01", "A", 100));
        ledger.add(draft_on("2024-03-01", "B", -40));
    }

    let (ledger, _) = ledger_at(Arc::new(JsonFileStore::new(&path)), "2024-03-01T18:00:00");
    let stocks: Vec<_> = ledger.query_all().into_iter().map(|r| r.stock).collect();
    assert_eq!(stocks, vec!["A", "B"]);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn concurrent_adds_are_not_lost() {
    let (ledger, _) = ledger_at(Arc::new(MemoryStore::new()), "2024-03-01T09:00:00");
    let ledger = Arc::new(ledger);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let ledger = ledger.clone();
            std::thread::spawn(move || {
                for i in 0..10 {
                    ledger.add(draft_on("2024-03-01", &format!("T{}-{}", t, i), 1));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(ledger.query_all().len(), 80);
}
