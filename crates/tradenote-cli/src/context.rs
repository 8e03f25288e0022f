//! 명령 실행 컨텍스트 (조립 지점).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tradenote_analytics::ChartPalette;
use tradenote_core::{AppConfig, Clock, SessionContext, SessionUser, SyncConfig, SystemClock};
use tradenote_ledger::{JsonFileStore, LedgerService, PersistenceStore};
use tradenote_sync::{HttpSyncTransport, SyncAgent};

/// 명령 실행에 필요한 협력자 묶음.
pub struct JournalContext {
    /// 매매 기록 원장
    pub ledger: LedgerService,
    /// 원장과 같은 시계
    pub clock: Arc<dyn Clock>,
    /// 원격 동기화 에이전트 (설정된 경우)
    pub sync: Option<Arc<SyncAgent>>,
    /// 차트 팔레트
    pub palette: ChartPalette,
}

impl JournalContext {
    /// 설정으로부터 시스템 시계와 파일 저장소를 사용하는 컨텍스트를 만듭니다.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = match config.ledger.timezone.as_deref() {
            Some(tz) => Arc::new(SystemClock::from_timezone_name(tz)?),
            None => Arc::new(SystemClock::new()),
        };
        let store = Arc::new(JsonFileStore::new(&config.storage.path));

        info!(path = %config.storage.path.display(), clock = clock.name(), "매매일지 저장소 준비");

        Self::assemble(store, clock, config)
    }

    /// 주어진 저장소와 시계로 컨텍스트를 조립합니다.
    pub fn assemble(
        store: Arc<dyn PersistenceStore>,
        clock: Arc<dyn Clock>,
        config: &AppConfig,
    ) -> Result<Self> {
        let mut ledger = LedgerService::new(store, Arc::clone(&clock));

        let sync = if config.sync.is_usable() {
            let transport =
                HttpSyncTransport::from_config(&config.sync).context("Failed to build sync transport")?;
            let session = Arc::new(session_for(&config.sync));
            debug!(
                endpoint = transport.endpoint(),
                authenticated = session.is_authenticated(),
                "Remote sync configured"
            );

            let agent = Arc::new(SyncAgent::new(Arc::new(transport), session));
            ledger = ledger.with_replicator(agent.clone());
            Some(agent)
        } else {
            debug!("Remote sync disabled");
            None
        };

        Ok(Self {
            ledger,
            clock,
            sync,
            palette: ChartPalette::new(config.chart.palette.iter().cloned()),
        })
    }

    /// 진행 중인 원격 동기화를 기다립니다.
    pub async fn shutdown(&self) {
        if let Some(agent) = &self.sync {
            agent.wait_idle().await;
            let stats = agent.stats();
            debug!(
                attempted = stats.attempted,
                succeeded = stats.succeeded,
                failed = stats.failed,
                skipped = stats.skipped,
                "Remote sync finished"
            );
        }
    }
}

/// 토큰이 설정되어 있으면 로그인된 세션으로 간주합니다.
fn session_for(config: &SyncConfig) -> SessionContext {
    if config.has_credentials() {
        let user_id = config.user_id.as_deref().unwrap_or("local");
        SessionContext::authenticated(SessionUser::new(user_id))
    } else {
        SessionContext::anonymous()
    }
}
