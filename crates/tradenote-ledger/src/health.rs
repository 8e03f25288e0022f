//! 원장 상태 카운터.
//!
//! 저장 실패는 호출자에게 전파되지 않으므로, 발생 횟수를 여기에 누적해
//! 진단 로그 외의 방법으로도 관측할 수 있게 합니다.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// 원장 상태 카운터.
#[derive(Debug, Default)]
pub struct LedgerHealth {
    load_failures: AtomicU64,
    corrupt_loads: AtomicU64,
    save_failures: AtomicU64,
    records_added: AtomicU64,
    records_deleted: AtomicU64,
}

/// 특정 시점의 상태 카운터 값.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerHealthSnapshot {
    /// 읽기 실패 횟수 (입출력 오류)
    pub load_failures: u64,
    /// 손상된 스냅샷을 읽은 횟수
    pub corrupt_loads: u64,
    /// 저장 실패 횟수
    pub save_failures: u64,
    /// 생성된 기록 수
    pub records_added: u64,
    /// 삭제된 기록 수
    pub records_deleted: u64,
}

impl LedgerHealth {
    pub(crate) fn record_load_failure(&self, corrupt: bool) {
        if corrupt {
            self.corrupt_loads.fetch_add(1, Ordering::Relaxed);
        } else {
            self.load_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_save_failure(&self) {
        self.save_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_added(&self) {
        self.records_added.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// 현재 카운터 값을 읽습니다.
    pub fn snapshot(&self) -> LedgerHealthSnapshot {
        LedgerHealthSnapshot {
            load_failures: self.load_failures.load(Ordering::Relaxed),
            corrupt_loads: self.corrupt_loads.load(Ordering::Relaxed),
            save_failures: self.save_failures.load(Ordering::Relaxed),
            records_added: self.records_added.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
        }
    }
}

impl LedgerHealthSnapshot {
    /// 저장소 관련 실패가 한 번이라도 있었는지 확인합니다.
    pub fn is_degraded(&self) -> bool {
        self.load_failures + self.corrupt_loads + self.save_failures > 0
    }
}
