//! 손익 집계.

use std::collections::BTreeMap;

use tradenote_core::TradeRecord;

/// 종목명이 비어 있는 기록을 묶는 라벨.
pub const UNLABELED_INSTRUMENT: &str = "기타";

/// 기록들의 손익 합계. 빈 입력은 0입니다.
///
/// 합계가 `i64` 범위를 넘으면 최대/최소값에서 멈춥니다.
pub fn sum_profit(records: &[TradeRecord]) -> i64 {
    records
        .iter()
        .fold(0i64, |acc, record| acc.saturating_add(record.profit))
}

/// 종목별 손익 합계.
///
/// 부호는 유지되며(손실 종목은 음수), 종목명이 비어 있거나 공백뿐이면
/// [`UNLABELED_INSTRUMENT`]로 묶습니다. 결과는 입력 순서와 무관하게 종목명 순으로 정렬됩니다.
pub fn group_by_instrument(records: &[TradeRecord]) -> BTreeMap<String, i64> {
    let mut grouped: BTreeMap<String, i64> = BTreeMap::new();

    for record in records {
        let key = if record.is_unlabeled() {
            UNLABELED_INSTRUMENT
        } else {
            record.stock.as_str()
        };

        let entry = grouped.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(record.profit);
    }

    grouped
}
