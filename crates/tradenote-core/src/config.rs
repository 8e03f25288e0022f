//! 설정 관리.
//!
//! 설정 파일(TOML 등)과 `TRADENOTE__` 접두사 환경 변수에서 애플리케이션 설정을 읽습니다.
//! 모든 섹션에 기본값이 있으므로 설정 파일 없이도 동작합니다.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로컬 저장소 설정
    pub storage: StorageConfig,
    /// 원장 설정
    pub ledger: LedgerConfig,
    /// 원격 동기화 설정
    pub sync: SyncConfig,
    /// 차트 설정
    pub chart: ChartConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 로컬 저장소 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 전체 매매 기록 스냅샷이 저장되는 파일 경로
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/tradenote_trades.json"),
        }
    }
}

/// 원장 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// 집계 기간 판정에 사용할 IANA 시간대 (없으면 시스템 현지 시간대)
    pub timezone: Option<String>,
}

/// 원격 동기화 설정.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// 동기화 활성화 여부
    pub enabled: bool,
    /// 매매 기록 POST 엔드포인트 (예: "https://api.example.com/api/trades")
    pub endpoint: Option<String>,
    /// 인증 토큰 (Bearer)
    #[serde(deserialize_with = "deserialize_secret")]
    pub auth_token: Option<SecretString>,
    /// 요청 타임아웃 (초, 없으면 HTTP 클라이언트 기본값)
    pub timeout_secs: Option<u64>,
    /// 토큰 소유 사용자 ID (세션 표시용)
    pub user_id: Option<String>,
}

impl SyncConfig {
    /// 동기화를 시도할 수 있는 설정인지 확인합니다.
    pub fn is_usable(&self) -> bool {
        self.enabled && self.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty())
    }

    /// 로그인 상태로 간주할 수 있는지(토큰이 있는지) 확인합니다.
    pub fn has_credentials(&self) -> bool {
        self.auth_token.is_some()
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|token| !token.is_empty())
        .map(|token| SecretString::new(token.into())))
}

/// 차트 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 조각 색상 팔레트 (비어 있으면 기본 팔레트)
    pub palette: Vec<String>,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 설정 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 지정되었는데 존재하지 않으면 에러입니다.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("TRADENOTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// 기본 경로(`config/tradenote.toml`, 없어도 됨)와 환경 변수에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/tradenote").required(false))
            .add_source(
                config::Environment::with_prefix("TRADENOTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
