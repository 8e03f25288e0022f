//! 매매 기록 집계 및 차트 데이터.
//!
//! 모든 함수는 상태가 없는 순수 함수이며, 원장 조회 결과를 입력으로 받습니다.
//!
//! # 모듈
//!
//! - [`aggregation`]: 손익 합계, 종목별 그룹핑
//! - [`chart`]: 종목별 비율 조각(slice) 레이아웃
//! - [`summary`]: 기간별 승/무/패 요약
//! - [`patterns`]: 반복되는 익절/손절 사유 분석

pub mod aggregation;
pub mod chart;
pub mod patterns;
pub mod summary;

pub use aggregation::{group_by_instrument, sum_profit, UNLABELED_INSTRUMENT};
pub use chart::{build_chart_data, ChartData, ChartPalette, ProfitSlice};
pub use patterns::{repeating_reasons, ReasonKind, ReasonPattern};
pub use summary::WindowSummary;
