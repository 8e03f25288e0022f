//! 기간별 매매 요약.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tradenote_core::{AggregationWindow, Outcome, TradeRecord};

use crate::aggregation::sum_profit;

/// 집계 기간 하나의 매매 요약.
///
/// 승률은 결과가 기록된 거래(승/무/패)만을 분모로 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSummary {
    /// 집계 기간
    pub window: AggregationWindow,
    /// 거래 수
    pub trade_count: usize,
    /// 총 손익
    pub total_profit: i64,
    /// 승
    pub wins: usize,
    /// 무
    pub draws: usize,
    /// 패
    pub losses: usize,
    /// 승률 (백분율, 소수 둘째 자리 반올림)
    pub win_rate_pct: Decimal,
}

impl WindowSummary {
    /// 이미 기간 필터가 적용된 기록으로부터 요약을 계산합니다.
    pub fn from_records(window: AggregationWindow, records: &[TradeRecord]) -> Self {
        let count = |outcome: Outcome| {
            records
                .iter()
                .filter(|r| r.result == Some(outcome))
                .count()
        };

        let wins = count(Outcome::Win);
        let draws = count(Outcome::Draw);
        let losses = count(Outcome::Loss);
        let decided = wins + draws + losses;

        let win_rate_pct = if decided > 0 {
            (Decimal::from(wins as u64) / Decimal::from(decided as u64) * dec!(100)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        Self {
            window,
            trade_count: records.len(),
            total_profit: sum_profit(records),
            wins,
            draws,
            losses,
            win_rate_pct,
        }
    }

    /// 결과가 입력되지 않은 거래 수.
    pub fn undecided(&self) -> usize {
        self.trade_count - (self.wins + self.draws + self.losses)
    }
}
