//! 로컬 스냅샷 저장소.
//!
//! 저장 단위는 항상 전체 기록 컬렉션입니다. 하나의 슬롯에 JSON 배열 하나를
//! 삽입 순서대로 저장하며, 저장은 이전 스냅샷을 통째로 교체합니다.

pub mod codec;
pub mod file;
pub mod memory;

use std::sync::Mutex;

use tradenote_core::TradeRecord;

use crate::error::StoreResult;

/// 전체 기록 컬렉션의 영속 저장소.
pub trait PersistenceStore: Send + Sync {
    /// 저장된 컬렉션을 읽습니다. 데이터가 없으면 빈 컬렉션입니다.
    fn load(&self) -> StoreResult<Vec<TradeRecord>>;

    /// 컬렉션 전체로 스냅샷을 교체합니다. 부분 쓰기는 관측되지 않아야 합니다.
    fn save(&self, records: &[TradeRecord]) -> StoreResult<()>;

    /// 이 슬롯에 대한 load → 수정 → save 구간을 직렬화하는 잠금.
    ///
    /// 같은 저장소 인스턴스를 공유하는 모든 원장이 이 잠금을 함께 사용합니다.
    fn mutation_lock(&self) -> &Mutex<()>;

    /// 저장소 이름 (진단용).
    fn name(&self) -> &str;
}
