//! 매매일지 시스템의 에러 타입.
//!
//! 원장 연산 자체는 저장소/네트워크 실패에도 완료되도록 설계되어 있으므로,
//! 이 타입들은 주로 설정 로딩과 내부 진단 경로에서 사용됩니다.

use thiserror::Error;

/// 매매일지 공통 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 로컬 저장소 에러
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 원격 동기화 에러
    #[error("동기화 에러: {0}")]
    Sync(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl JournalError {
    /// 같은 입력으로 다시 시도하면 성공할 수 있는 에러인지 확인합니다.
    ///
    /// 원장은 자동 재시도를 하지 않으며, 이 분류는 호출자의 판단용입니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, JournalError::Storage(_) | JournalError::Sync(_))
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}
