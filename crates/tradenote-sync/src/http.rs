//! HTTP 전송 채널.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use tradenote_core::SyncConfig;

use crate::types::{SyncError, SyncPayload, SyncResult, SyncTransport};

/// 기록을 JSON 본문으로 POST하는 전송 채널.
///
/// 응답 본문은 읽지 않으며, 2xx가 아닌 응답과 네트워크 오류는 모두 실패입니다.
pub struct HttpSyncTransport {
    client: reqwest::Client,
    endpoint: String,
    auth_token: Option<SecretString>,
}

impl HttpSyncTransport {
    /// 새 HTTP 전송 채널을 생성합니다.
    ///
    /// `timeout`이 없으면 HTTP 클라이언트의 기본값을 사용합니다.
    pub fn new(
        endpoint: impl Into<String>,
        auth_token: Option<SecretString>,
        timeout: Option<Duration>,
    ) -> SyncResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(SyncError::Config("sync endpoint is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            auth_token,
        })
    }

    /// 동기화 설정으로부터 생성합니다.
    pub fn from_config(config: &SyncConfig) -> SyncResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| SyncError::Config("sync.endpoint is not set".to_string()))?;
        let token = config
            .auth_token
            .as_ref()
            .map(|t| SecretString::new(t.expose_secret().into()));

        Self::new(endpoint, token, config.timeout_secs.map(Duration::from_secs))
    }

    /// 전송 대상 URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SyncTransport for HttpSyncTransport {
    async fn send(&self, payload: &SyncPayload) -> SyncResult<()> {
        debug!(endpoint = %self.endpoint, stock = %payload.stock, "Posting trade record");

        let mut request = self.client.post(&self.endpoint).json(payload);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(status = status.as_u16(), "Trade record accepted");
            Ok(())
        } else {
            Err(SyncError::Rejected {
                status: status.as_u16(),
            })
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl std::fmt::Debug for HttpSyncTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSyncTransport")
            .field("endpoint", &self.endpoint)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
