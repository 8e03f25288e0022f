//! # TradeNote Core
//!
//! 매매일지의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 다른 모든 크레이트가 공유하는 기본 타입을 제공합니다:
//! - 매매 기록(`TradeRecord`)과 입력 초안(`TradeDraft`)
//! - 집계 기간(오늘/이번 달/전체)
//! - 시계 추상화 및 로그인 세션 컨텍스트
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
