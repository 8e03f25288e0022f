//! 집계 기간.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 원장 조회/집계에 적용하는 날짜 기반 필터.
///
/// 포함 여부는 항상 기록의 `date`(현지 달력 기준)로 판단하며 생성 시각은 보지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationWindow {
    /// 오늘
    Today,
    /// 이번 달
    ThisMonth,
    /// 전체 기간
    All,
}

impl AggregationWindow {
    /// 주어진 날짜가 기간에 포함되는지 확인합니다.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            AggregationWindow::Today => date == today,
            AggregationWindow::ThisMonth => {
                date.year() == today.year() && date.month() == today.month()
            }
            AggregationWindow::All => true,
        }
    }

    /// 화면 표시용 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            AggregationWindow::Today => "오늘",
            AggregationWindow::ThisMonth => "이번 달",
            AggregationWindow::All => "전체",
        }
    }
}

impl Default for AggregationWindow {
    fn default() -> Self {
        Self::All
    }
}

impl std::str::FromStr for AggregationWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "day" => Ok(Self::Today),
            "month" | "this_month" => Ok(Self::ThisMonth),
            "all" => Ok(Self::All),
            _ => Err(format!("Unknown window: {}. Use: today, month, all", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_today_window() {
        let today = day("2024-03-01");
        assert!(AggregationWindow::Today.contains(day("2024-03-01"), today));
        assert!(!AggregationWindow::Today.contains(day("2024-02-29"), today));
    }

    #[test]
    fn test_month_window_checks_year() {
        let today = day("2024-03-15");
        assert!(AggregationWindow::ThisMonth.contains(day("2024-03-01"), today));
        assert!(AggregationWindow::ThisMonth.contains(day("2024-03-31"), today));
        assert!(!AggregationWindow::ThisMonth.contains(day("2023-03-15"), today));
        assert!(!AggregationWindow::ThisMonth.contains(day("2024-04-01"), today));
    }

    #[test]
    fn test_window_from_str() {
        assert_eq!("today".parse::<AggregationWindow>().unwrap(), AggregationWindow::Today);
        assert_eq!("MONTH".parse::<AggregationWindow>().unwrap(), AggregationWindow::ThisMonth);
        assert!("week".parse::<AggregationWindow>().is_err());
    }
}
