//! 원격 동기화.
//!
//! 로그인한 사용자의 새 매매 기록을 원격 저장소로 한 번 전송합니다.
//! 전송은 생성자를 기다리게 하지 않으며, 실패해도 재시도하거나 사용자에게 알리지 않습니다.
//!
//! # 구성
//!
//! - [`SyncTransport`]: 전송 채널 trait (HTTP 구현: [`HttpSyncTransport`])
//! - [`SyncAgent`]: 세션 확인, 백그라운드 전송, 통계 집계

pub mod agent;
pub mod http;
pub mod types;

pub use agent::{SyncAgent, SyncStats, SyncStatsSnapshot};
pub use http::HttpSyncTransport;
pub use types::{SyncError, SyncPayload, SyncResult, SyncTransport};
