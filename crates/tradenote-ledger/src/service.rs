//! 매매 기록 원장 서비스.
//!
//! 생성, 삭제, 기간 조회를 담당합니다. 모든 작업은 저장소의 스냅샷을 다시 읽으며
//! 호출 간 캐시는 두지 않습니다.
//!
//! 생성과 삭제는 저장소의 `mutation_lock` 안에서 실행되므로, 같은 저장소를 공유하는
//! 여러 원장도 서로의 변경을 덮어쓰지 않습니다.
//!
//! # 실패 처리
//!
//! 저장소 오류는 원장 작업을 중단시키지 않습니다:
//! - 읽기 실패 또는 손상된 스냅샷 → 빈 컬렉션으로 계속 진행 (경고 로그)
//! - 쓰기 실패 → 작업은 논리적으로 완료, 내구성은 보장되지 않음 (경고 로그)
//!
//! 손상된 스냅샷을 읽은 직후의 생성은 빈 컬렉션에 새 기록을 더한 스냅샷으로
//! 기존 슬롯을 덮어씁니다. 이 경우는 `corrupt_loads` 카운터로 추적됩니다.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use tradenote_core::{
    ledger_span, AggregationWindow, Clock, RecordReplicator, TradeDraft, TradeId, TradeRecord,
};

use crate::health::{LedgerHealth, LedgerHealthSnapshot};
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::storage::PersistenceStore;

/// 생성 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// 저장된 기록
    pub record: TradeRecord,
    /// 스냅샷 저장 성공 여부
    pub durable: bool,
}

/// 매매 기록 원장.
pub struct LedgerService {
    store: Arc<dyn PersistenceStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    replicator: Option<Arc<dyn RecordReplicator>>,
    health: LedgerHealth,
}

impl LedgerService {
    /// 새 원장을 생성합니다. ID는 UUID v4로 생성됩니다.
    pub fn new(store: Arc<dyn PersistenceStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ids: Arc::new(UuidIdGenerator),
            replicator: None,
            health: LedgerHealth::default(),
        }
    }

    /// ID 생성기를 교체합니다.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// 새 기록을 넘길 복제기를 설정합니다.
    pub fn with_replicator(mut self, replicator: Arc<dyn RecordReplicator>) -> Self {
        self.replicator = Some(replicator);
        self
    }

    /// 새 기록을 생성하고 저장합니다.
    ///
    /// 저장에 실패해도 생성된 기록을 반환합니다.
    pub fn add(&self, draft: TradeDraft) -> TradeRecord {
        self.add_with_status(draft).record
    }

    /// 새 기록을 생성하고 저장 성공 여부와 함께 반환합니다.
    pub fn add_with_status(&self, draft: TradeDraft) -> Recorded {
        let (record, durable) = {
            let _guard = self
                .store
                .mutation_lock()
                .lock()
                .unwrap_or_else(|e| e.into_inner());

            let mut records = self.load_or_empty();
            let id = self.fresh_id(&records);
            let record = TradeRecord::from_draft(id, draft, self.clock.now());

            let span = ledger_span!("ledger_add", record.id, record.stock);
            let _enter = span.enter();

            records.push(record.clone());
            let durable = self.save_or_warn(&records);
            self.health.record_added();

            info!(
                profit = record.profit,
                durable = durable,
                total = records.len(),
                "매매 기록 생성"
            );

            (record, durable)
        };

        // 복제는 임계 구역 밖에서 시작하며 결과를 기다리지 않는다
        if let Some(replicator) = &self.replicator {
            debug!(
                trade_id = %record.id,
                replicator = replicator.name(),
                "Handing record to replicator"
            );
            replicator.replicate(&record);
        }

        Recorded { record, durable }
    }

    /// ID가 일치하는 기록을 최대 하나 삭제하고 남은 컬렉션을 반환합니다.
    ///
    /// 일치하는 기록이 없으면 저장하지 않고 현재 컬렉션을 그대로 반환합니다.
    pub fn delete(&self, id: &str) -> Vec<TradeRecord> {
        let _guard = self
            .store
            .mutation_lock()
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let span = ledger_span!("ledger_delete", id);
        let _enter = span.enter();

        let mut records = self.load_or_empty();
        let Some(index) = records.iter().position(|r| r.id.as_str() == id) else {
            debug!("삭제 대상 기록 없음");
            return records;
        };

        let removed = records.remove(index);
        let durable = self.save_or_warn(&records);
        self.health.record_deleted();

        info!(
            stock = %removed.stock,
            durable = durable,
            remaining = records.len(),
            "매매 기록 삭제"
        );

        records
    }

    /// 현지 달력 기준 오늘 날짜의 기록.
    pub fn query_today(&self) -> Vec<TradeRecord> {
        self.query(AggregationWindow::Today)
    }

    /// 현지 달력 기준 이번 달의 기록.
    pub fn query_this_month(&self) -> Vec<TradeRecord> {
        self.query(AggregationWindow::ThisMonth)
    }

    /// 저장된 전체 기록 (삽입 순서).
    pub fn query_all(&self) -> Vec<TradeRecord> {
        self.query(AggregationWindow::All)
    }

    /// 집계 기간에 속하는 기록을 삽입 순서대로 반환합니다.
    pub fn query(&self, window: AggregationWindow) -> Vec<TradeRecord> {
        let records = self.load_or_empty();
        if window == AggregationWindow::All {
            return records;
        }

        let today = self.clock.today();
        let selected: Vec<TradeRecord> = records
            .into_iter()
            .filter(|r| window.contains(r.date, today))
            .collect();

        debug!(
            window = window.label(),
            today = %today,
            count = selected.len(),
            "Window query"
        );

        selected
    }

    /// 현재 상태 카운터.
    pub fn health(&self) -> LedgerHealthSnapshot {
        self.health.snapshot()
    }

    fn load_or_empty(&self) -> Vec<TradeRecord> {
        match self.store.load() {
            Ok(records) => records,
            Err(e) => {
                self.health.record_load_failure(e.is_corrupt());
                warn!(
                    store = self.store.name(),
                    error = %e,
                    "스냅샷 읽기 실패, 빈 원장으로 계속 진행"
                );
                Vec::new()
            }
        }
    }

    fn save_or_warn(&self, records: &[TradeRecord]) -> bool {
        match self.store.save(records) {
            Ok(()) => true,
            Err(e) => {
                self.health.record_save_failure();
                warn!(
                    store = self.store.name(),
                    error = %e,
                    "스냅샷 저장 실패, 변경 내용이 유지되지 않을 수 있음"
                );
                false
            }
        }
    }

    fn fresh_id(&self, records: &[TradeRecord]) -> TradeId {
        let existing: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        loop {
            let id = self.ids.next_id();
            if !existing.contains(id.as_str()) {
                return id;
            }
            debug!(trade_id = %id, "Generated id already exists, drawing again");
        }
    }
}

impl std::fmt::Debug for LedgerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerService")
            .field("store", &self.store.name())
            .field("clock", &self.clock.name())
            .field(
                "replicator",
                &self.replicator.as_ref().map(|r| r.name().to_string()),
            )
            .finish()
    }
}
