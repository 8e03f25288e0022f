//! 기록 ID 생성기.

use std::sync::atomic::{AtomicU64, Ordering};

use tradenote_core::TradeId;
use uuid::Uuid;

/// 새 기록 ID 생성기.
pub trait IdGenerator: Send + Sync {
    /// 새 ID를 생성합니다.
    fn next_id(&self) -> TradeId;
}

/// UUID v4 기반 생성기 (기본값).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> TradeId {
        TradeId::new(Uuid::new_v4().to_string())
    }
}

/// 접두사와 증가하는 번호로 ID를 만드는 생성기.
///
/// 테스트에서 결정적인 ID가 필요할 때 사용합니다.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// 1번부터 시작하는 생성기를 생성합니다.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// 지정한 번호부터 시작하는 생성기를 생성합니다.
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TradeId {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        TradeId::new(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new("trade");
        assert_eq!(ids.next_id().as_str(), "trade-1");
        assert_eq!(ids.next_id().as_str(), "trade-2");
    }

    #[test]
    fn test_uuid_ids_differ() {
        let ids = UuidIdGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
