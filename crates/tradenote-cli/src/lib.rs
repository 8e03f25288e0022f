//! 매매일지 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 설정으로부터 원장, 동기화 에이전트를 조립하는 [`JournalContext`]
//! - 기록 추가/삭제/조회 명령
//! - 기간별 요약, 차트 데이터, 반복 사유 보고

pub mod commands;
pub mod context;

pub use context::JournalContext;
