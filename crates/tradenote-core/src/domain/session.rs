//! 로그인 세션 컨텍스트.
//!
//! 인증 자체는 외부 협력자가 담당하며, 원장과 동기화 에이전트는
//! "현재 로그인되어 있는가"라는 조건만 이 컨텍스트에서 읽습니다.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// 로그인한 사용자 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// 사용자 ID
    pub id: String,
    /// 표시 이름
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SessionUser {
    /// 새 사용자 정보를 생성합니다.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    /// 표시 이름을 설정합니다.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// 명시적으로 전달되는 세션 상태.
#[derive(Debug, Default)]
pub struct SessionContext {
    user: RwLock<Option<SessionUser>>,
}

impl SessionContext {
    /// 로그인하지 않은 세션을 생성합니다.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 로그인된 세션을 생성합니다.
    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// 사용자를 로그인 상태로 전환합니다.
    pub fn sign_in(&self, user: SessionUser) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }

    /// 로그아웃합니다.
    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// 로그인 여부.
    pub fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// 현재 사용자.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
