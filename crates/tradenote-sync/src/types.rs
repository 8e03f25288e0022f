//! 동기화 타입 및 trait 정의.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tradenote_core::{JournalError, Outcome, Position, TradeRecord};

/// 원격 엔드포인트로 보내는 기록 본문.
///
/// ID와 생성 시각은 로컬 전용이므로 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPayload {
    /// 매매 날짜 (YYYY-MM-DD)
    pub date: NaiveDate,
    /// 종목명
    pub stock: String,
    /// 포지션
    pub position: Option<Position>,
    /// 결과
    pub result: Option<Outcome>,
    /// 손익 (정수)
    pub profit: Option<i64>,
    /// 차트 이미지
    pub chart_image: Option<String>,
    /// 익절 사유
    pub profit_reason: Option<String>,
    /// 손절 사유
    pub loss_reason: Option<String>,
}

impl From<&TradeRecord> for SyncPayload {
    fn from(record: &TradeRecord) -> Self {
        Self {
            date: record.date,
            stock: record.stock.clone(),
            position: record.position,
            result: record.result,
            profit: Some(record.profit),
            chart_image: record.chart_image.clone(),
            profit_reason: record.profit_reason.clone(),
            loss_reason: record.loss_reason.clone(),
        }
    }
}

/// 동기화 작업을 위한 Result 타입.
pub type SyncResult<T> = Result<T, SyncError>;

/// 동기화 에러.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("네트워크 에러: {0}")]
    Network(#[from] reqwest::Error),

    #[error("원격 저장소 거부: HTTP {status}")]
    Rejected { status: u16 },

    #[error("비동기 런타임 없음")]
    NoRuntime,

    #[error("직렬화 에러: {0}")]
    Serialization(String),

    #[error("설정 에러: {0}")]
    Config(String),
}

impl From<SyncError> for JournalError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Config(msg) => JournalError::Config(msg),
            SyncError::Serialization(msg) => JournalError::Serialization(msg),
            other => JournalError::Sync(other.to_string()),
        }
    }
}

/// 원격 전송 채널 trait.
#[async_trait]
pub trait SyncTransport: Send + Sync {
    /// 기록 본문 하나를 전송합니다. 2xx 응답만 성공입니다.
    async fn send(&self, payload: &SyncPayload) -> SyncResult<()>;

    /// 전송 채널 이름.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tradenote_core::{TradeDraft, TradeId};

    #[test]
    fn test_payload_wire_shape() {
        let draft = TradeDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "삼성전자")
            .with_position(Position::Short)
            .with_profit(-12_000);
        let record = TradeRecord::from_draft(TradeId::new("local-id"), draft, Utc::now());

        let json = serde_json::to_value(SyncPayload::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2024-03-01",
                "stock": "삼성전자",
                "position": "short",
                "result": null,
                "profit": -12000,
                "chartImage": null,
                "profitReason": null,
                "lossReason": null,
            })
        );
    }

    #[test]
    fn test_sync_error_maps_to_journal_error() {
        let err: JournalError = SyncError::Rejected { status: 500 }.into();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("500"));
    }
}
