//! 매매 기록 원장 및 로컬 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 전체 기록 컬렉션을 하나의 스냅샷으로 저장하는 `PersistenceStore`
//!   (파일 슬롯, 인메모리 슬롯)
//! - 생성/삭제/기간 조회를 담당하는 `LedgerService`
//! - 고유 ID 생성기
//! - 저장 실패를 관측하기 위한 상태 카운터

pub mod error;
pub mod health;
pub mod id;
pub mod service;
pub mod storage;

pub use error::{StoreError, StoreResult};
pub use health::{LedgerHealth, LedgerHealthSnapshot};
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use service::{LedgerService, Recorded};
pub use storage::file::JsonFileStore;
pub use storage::memory::MemoryStore;
pub use storage::PersistenceStore;
