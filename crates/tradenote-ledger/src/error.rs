//! 저장소 오류 타입.

use thiserror::Error;
use tradenote_core::JournalError;

/// 로컬 저장소 오류.
///
/// 원장은 이 오류를 호출자에게 전파하지 않고 경고와 상태 카운터로만 보고합니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 파일 입출력 오류
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// 저장된 스냅샷을 해석할 수 없음
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    /// 스냅샷 직렬화 실패
    #[error("Encode error: {0}")]
    Encode(String),
}

/// 저장소 작업을 위한 Result 타입.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// 손상된 스냅샷으로 인한 오류인지 확인합니다.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<StoreError> for JournalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt(msg) | StoreError::Encode(msg) => JournalError::Serialization(msg),
            StoreError::Io(msg) => JournalError::Storage(msg),
        }
    }
}
