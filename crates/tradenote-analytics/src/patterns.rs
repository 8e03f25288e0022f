//! 반복되는 매매 사유 분석.
//!
//! 같은 손절(익절) 사유가 여러 번 기록되었다면 습관적인 패턴일 가능성이 높습니다.

use serde::Serialize;
use tradenote_core::{Outcome, TradeRecord};

/// 분석할 사유 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonKind {
    /// 패배 거래의 손절 사유
    Loss,
    /// 승리 거래의 익절 사유
    Profit,
}

impl std::str::FromStr for ReasonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loss" => Ok(Self::Loss),
            "profit" | "win" => Ok(Self::Profit),
            _ => Err(format!("Unknown reason kind: {}", s)),
        }
    }
}

/// 반복된 사유와 횟수.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonPattern {
    /// 사유 문구 (앞뒤 공백 제거)
    pub pattern: String,
    /// 등장 횟수 (2 이상)
    pub count: usize,
}

/// 사유 종류에 해당하는 기록들의 사유 텍스트 (공백 제거, 빈 값 제외).
pub fn reasons(records: &[TradeRecord], kind: ReasonKind) -> Vec<&str> {
    records
        .iter()
        .filter_map(|r| match kind {
            ReasonKind::Loss if r.result == Some(Outcome::Loss) => r.loss_reason.as_deref(),
            ReasonKind::Profit if r.result == Some(Outcome::Win) => r.profit_reason.as_deref(),
            _ => None,
        })
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

/// 두 번 이상 기록된 사유를 횟수 내림차순으로 반환합니다.
///
/// 완전히 같은 문구(앞뒤 공백 제외)만 같은 사유로 셉니다.
/// 횟수가 같으면 먼저 등장한 사유가 앞에 옵니다.
pub fn repeating_reasons(records: &[TradeRecord], kind: ReasonKind) -> Vec<ReasonPattern> {
    let mut counted: Vec<ReasonPattern> = Vec::new();

    for text in reasons(records, kind) {
        match counted.iter_mut().find(|p| p.pattern == text) {
            Some(existing) => existing.count += 1,
            None => counted.push(ReasonPattern {
                pattern: text.to_string(),
                count: 1,
            }),
        }
    }

    counted.retain(|p| p.count >= 2);
    counted.sort_by(|a, b| b.count.cmp(&a.count));
    counted
}
