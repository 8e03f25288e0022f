//! 시계 추상화.
//!
//! 원장은 현재 시각을 직접 읽지 않고 `Clock`을 주입받습니다.
//! 테스트에서는 `FixedClock`으로 자정 경계를 재현합니다.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::sync::RwLock;

use crate::error::{JournalError, JournalResult};

/// 현재 시각 제공자.
pub trait Clock: Send + Sync {
    /// 현재 시각 (UTC). 기록의 `createdAt`에 사용됩니다.
    fn now(&self) -> DateTime<Utc>;

    /// 현지 벽시계 시각. 집계 기간 판정에 사용됩니다.
    fn local_now(&self) -> NaiveDateTime;

    /// 현지 달력 기준 오늘 날짜.
    fn today(&self) -> NaiveDate {
        self.local_now().date()
    }

    /// 시계 이름 (진단용).
    fn name(&self) -> &str;
}

/// 실제 시스템 시계.
///
/// 시간대를 지정하지 않으면 운영체제의 현지 시간대를 사용합니다.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    /// 시스템 현지 시간대를 사용하는 시계를 생성합니다.
    pub fn new() -> Self {
        Self { timezone: None }
    }

    /// 지정한 시간대를 사용하는 시계를 생성합니다.
    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }

    /// IANA 시간대 이름(예: "Asia/Seoul")으로 시계를 생성합니다.
    pub fn from_timezone_name(name: &str) -> JournalResult<Self> {
        let timezone: Tz = name
            .parse()
            .map_err(|e| JournalError::Config(format!("Invalid timezone '{}': {}", name, e)))?;
        Ok(Self::with_timezone(timezone))
    }

    /// 설정된 시간대.
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// 고정 시계.
///
/// 현지 시각을 직접 지정하며, `now()`는 같은 벽시계 값을 UTC로 해석해 반환합니다.
#[derive(Debug)]
pub struct FixedClock {
    local: RwLock<NaiveDateTime>,
}

impl FixedClock {
    /// 주어진 현지 시각에 고정된 시계를 생성합니다.
    pub fn new(local: NaiveDateTime) -> Self {
        Self {
            local: RwLock::new(local),
        }
    }

    /// 현지 시각을 변경합니다.
    pub fn set(&self, local: NaiveDateTime) {
        let mut guard = self.local.write().unwrap_or_else(|e| e.into_inner());
        *guard = local;
    }

    /// 현지 시각을 앞으로 이동합니다.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.local.write().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }

    fn current(&self) -> NaiveDateTime {
        *self.local.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current().and_utc()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.current()
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
