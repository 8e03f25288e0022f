//! tracing 기반 로깅 인프라.
//!
//! 원장과 동기화 에이전트의 비치명적 실패(저장 실패, 손상된 스냅샷, 동기화 실패)는
//! 모두 `warn!` 이벤트로 보고되므로, 이 모듈이 설치하는 구독자가 곧 진단 채널입니다.

use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::LoggingConfig;

/// `--verbose`에서 debug로 올리는 워크스페이스 크레이트.
const VERBOSE_TARGETS: [&str; 5] = [
    "tradenote_core",
    "tradenote_ledger",
    "tradenote_analytics",
    "tradenote_sync",
    "tradenote_cli",
];

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 수집용 JSON 형식
    Json,
    /// 간결한 한 줄 형식 (CLI 기본)
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "tradenote_ledger=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 워크스페이스 크레이트를 debug로 출력할지 여부
    pub verbose: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            verbose: false,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 워크스페이스 크레이트의 debug 출력을 켭니다.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `EnvFilter`에 넘길 지시어.
    ///
    /// verbose이면 설정 레벨 뒤에 크레이트별 `=debug` 지시어를 덧붙입니다.
    pub fn filter_directives(&self) -> String {
        if !self.verbose {
            return self.level.clone();
        }

        let mut directives = vec![self.level.clone()];
        directives.extend(VERBOSE_TARGETS.iter().map(|t| format!("{}=debug", t)));
        directives.join(",")
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            level: config.level.clone(),
            format: config.format.parse().unwrap_or_default(),
            ..Default::default()
        }
    }
}

fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    }
}

/// 주어진 설정으로 전역 구독자를 설치합니다.
///
/// `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨과 verbose 여부보다 우선합니다.
///
/// # 예제
///
/// ```no_run
/// use tradenote_core::logging::{init_logging, LogConfig, LogFormat};
///
/// init_logging(LogConfig::new("warn").with_format(LogFormat::Compact).with_verbose(true)).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.filter_directives()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(config.format))
        .try_init()?;

    tracing::debug!(
        format = ?config.format,
        level = %config.level,
        verbose = config.verbose,
        "Logging initialized"
    );

    Ok(())
}

/// 기록 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! ledger_span {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $id:expr) => {
        tracing::debug_span!($name, trade_id = %$id)
    };
    ($name:expr, $id:expr, $stock:expr) => {
        tracing::debug_span!($name, trade_id = %$id, stock = %$stock)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_config_from_logging_section() {
        let section = LoggingConfig {
            level: "tradenote_ledger=debug".to_string(),
            format: "compact".to_string(),
        };
        let config = LogConfig::from(&section);

        assert_eq!(config.level, "tradenote_ledger=debug");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.filter_directives(), "tradenote_ledger=debug");
    }

    #[test]
    fn test_verbose_appends_crate_directives() {
        let config = LogConfig::new("warn").with_verbose(true);
        let directives = config.filter_directives();

        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("tradenote_ledger=debug"));
        assert!(directives.contains("tradenote_sync=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        let section = LoggingConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };
        assert_eq!(LogConfig::from(&section).format, LogFormat::Pretty);
    }
}
