//! TradeDraft 정규화 속성 테스트

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tradenote_core::{Outcome, TradeDraft, TradeId, TradeRecord};

fn outcome_strategy() -> impl Strategy<Value = Option<Outcome>> {
    prop_oneof![
        Just(None),
        Just(Some(Outcome::Win)),
        Just(Some(Outcome::Draw)),
        Just(Some(Outcome::Loss)),
    ]
}

proptest! {
    #[test]
    fn loss_is_never_stored_as_gain(cents in -1_000_000_000i64..1_000_000_000i64, outcome in outcome_strategy()) {
        let mut draft = TradeDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "A")
            .with_profit(Decimal::new(cents, 2));
        draft.result = outcome;

        let record = TradeRecord::from_draft(TradeId::new("t"), draft, Utc::now());

        if outcome == Some(Outcome::Loss) {
            prop_assert!(record.profit <= 0);
        }
        // 절사는 0 방향이므로 크기가 입력보다 커지지 않는다
        prop_assert!(Decimal::from(record.profit.abs()) <= Decimal::new(cents, 2).abs());
        prop_assert!((Decimal::new(cents, 2).abs() - Decimal::from(record.profit.abs())) < Decimal::ONE);
    }
}
