//! 동기화 에이전트.
//!
//! `push`는 현재 tokio 런타임에 전송 작업을 띄우고 바로 반환합니다.
//! 전송은 최대 한 번만 시도되며, 실패한 기록은 보관하지 않습니다.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};
use tradenote_core::{RecordReplicator, SessionContext, TradeRecord};

use crate::types::{SyncError, SyncPayload, SyncTransport};

/// 동기화 통계.
#[derive(Debug, Default)]
pub struct SyncStats {
    attempted: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
}

/// 특정 시점의 동기화 통계 값.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatsSnapshot {
    /// 전송을 시작한 기록 수
    pub attempted: u64,
    /// 2xx 응답을 받은 기록 수
    pub succeeded: u64,
    /// 실패한 기록 수 (런타임 없음 포함)
    pub failed: u64,
    /// 로그인하지 않아 건너뛴 기록 수
    pub skipped: u64,
}

impl SyncStats {
    /// 현재 값을 읽습니다.
    pub fn snapshot(&self) -> SyncStatsSnapshot {
        SyncStatsSnapshot {
            attempted: self.attempted.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// 새 기록을 원격 저장소로 복제하는 에이전트.
pub struct SyncAgent {
    transport: Arc<dyn SyncTransport>,
    session: Arc<SessionContext>,
    stats: Arc<SyncStats>,
    tracker: TaskTracker,
}

impl SyncAgent {
    /// 새 에이전트를 생성합니다.
    pub fn new(transport: Arc<dyn SyncTransport>, session: Arc<SessionContext>) -> Self {
        Self {
            transport,
            session,
            stats: Arc::new(SyncStats::default()),
            tracker: TaskTracker::new(),
        }
    }

    /// 기록 전송을 시작합니다. 결과를 기다리지 않습니다.
    ///
    /// 로그인하지 않았으면 아무것도 하지 않습니다.
    pub fn push(&self, record: &TradeRecord) {
        if !self.session.is_authenticated() {
            SyncStats::incr(&self.stats.skipped);
            debug!(trade_id = %record.id, "Not signed in, skipping remote sync");
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                SyncStats::incr(&self.stats.failed);
                warn!(
                    trade_id = %record.id,
                    error = %SyncError::NoRuntime,
                    "원격 동기화 요청 폐기"
                );
                return;
            }
        };

        SyncStats::incr(&self.stats.attempted);

        let payload = SyncPayload::from(record);
        let trade_id = record.id.clone();
        let transport = Arc::clone(&self.transport);
        let stats = Arc::clone(&self.stats);

        self.tracker.spawn_on(
            async move {
                match transport.send(&payload).await {
                    Ok(()) => {
                        SyncStats::incr(&stats.succeeded);
                        debug!(trade_id = %trade_id, transport = transport.name(), "원격 동기화 완료");
                    }
                    Err(e) => {
                        SyncStats::incr(&stats.failed);
                        warn!(
                            trade_id = %trade_id,
                            transport = transport.name(),
                            error = %e,
                            "원격 동기화 실패"
                        );
                    }
                }
            },
            &handle,
        );
    }

    /// 진행 중인 전송이 모두 끝날 때까지 기다립니다.
    ///
    /// 실패한 전송을 다시 시도하지는 않습니다.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// 진행 중인 전송 수.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// 현재 동기화 통계.
    pub fn stats(&self) -> SyncStatsSnapshot {
        self.stats.snapshot()
    }

    /// 에이전트가 사용하는 세션 컨텍스트.
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }
}

impl RecordReplicator for SyncAgent {
    fn replicate(&self, record: &TradeRecord) {
        self.push(record);
    }

    fn name(&self) -> &str {
        "sync_agent"
    }
}

impl std::fmt::Debug for SyncAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncAgent")
            .field("transport", &self.transport.name())
            .field("in_flight", &self.tracker.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;
    use tradenote_core::{SessionUser, TradeDraft, TradeId};

    use crate::types::SyncResult;

    #[derive(Default)]
    struct CapturingTransport {
        sent: Mutex<Vec<SyncPayload>>,
    }

    #[async_trait]
    impl SyncTransport for CapturingTransport {
        async fn send(&self, payload: &SyncPayload) -> SyncResult<()> {
            self.sent.lock().unwrap().push(payload.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "capturing"
        }
    }

    fn record() -> TradeRecord {
        let draft = TradeDraft::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "A")
            .with_profit(1000);
        TradeRecord::from_draft(TradeId::new("t-1"), draft, Utc::now())
    }

    #[test]
    fn test_push_without_runtime_is_dropped() {
        let transport = Arc::new(CapturingTransport::default());
        let session = Arc::new(SessionContext::authenticated(SessionUser::new("u-1")));
        let agent = SyncAgent::new(transport.clone(), session);

        agent.push(&record());

        assert!(transport.sent.lock().unwrap().is_empty());
        assert_eq!(agent.stats().failed, 1);
        assert_eq!(agent.stats().attempted, 0);
    }

    #[tokio::test]
    async fn test_sign_in_enables_push() {
        let transport = Arc::new(CapturingTransport::default());
        let session = Arc::new(SessionContext::anonymous());
        let agent = SyncAgent::new(transport.clone(), session.clone());

        agent.push(&record());
        session.sign_in(SessionUser::new("u-1"));
        agent.push(&record());
        agent.wait_idle().await;

        assert_eq!(transport.sent.lock().unwrap().len(), 1);
        assert_eq!(
            agent.stats(),
            SyncStatsSnapshot {
                attempted: 1,
                succeeded: 1,
                failed: 0,
                skipped: 1,
            }
        );
    }
}
