//! 인메모리 슬롯 저장소.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use tradenote_core::TradeRecord;

use super::{codec, PersistenceStore};
use crate::error::{StoreError, StoreResult};

/// 파일 슬롯과 같은 JSON 바이트를 메모리에 보관하는 저장소.
///
/// 쓰기 실패 주입과 임의(손상된) 바이트 주입을 지원합니다.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
    lock: Mutex<()>,
}

impl MemoryStore {
    /// 빈 슬롯으로 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 주어진 바이트가 들어 있는 슬롯으로 생성합니다.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(bytes.into())),
            ..Default::default()
        }
    }

    /// 현재 슬롯의 원본 바이트.
    pub fn raw_bytes(&self) -> Option<Vec<u8>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// 이후 쓰기가 실패하도록 설정합니다.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 성공한 쓰기 횟수.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<TradeRecord>> {
        match self.slot.lock().unwrap_or_else(|e| e.into_inner()).as_deref() {
            Some(bytes) => codec::decode(bytes),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[TradeRecord]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io("write rejected (quota exceeded)".to_string()));
        }

        let bytes = codec::encode(records)?;
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(bytes);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn mutation_lock(&self) -> &Mutex<()> {
        &self.lock
    }

    fn name(&self) -> &str {
        "memory"
    }
}
