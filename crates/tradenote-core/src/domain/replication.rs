//! 새 기록 복제 포트.
//!
//! 원장은 기록을 생성한 직후 이 trait으로 기록을 넘기고 결과를 기다리지 않습니다.
//! 실제 구현(원격 동기화)은 `tradenote-sync` 크레이트에 있습니다.

use super::trade::TradeRecord;

/// 생성된 기록을 외부로 복제하는 협력자.
pub trait RecordReplicator: Send + Sync {
    /// 기록 복제를 시작합니다. 호출자를 블로킹하지 않아야 하며 실패를 반환하지 않습니다.
    fn replicate(&self, record: &TradeRecord);

    /// 복제기 이름 (진단용).
    fn name(&self) -> &str;
}
