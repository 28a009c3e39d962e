//! Auth session handed over by the identity provider after redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Default)]
pub struct SessionState {
    current: RwLock<Option<Session>>,
}

impl SessionState {
    pub async fn sign_in(&self, session: Session) {
        info!(user_id = %session.user_id, expires_at = %session.expires_at, "Signed in");
        *self.current.write().await = Some(session);
    }

    /// Returns the session that was dropped, if any.
    pub async fn sign_out(&self) -> Option<Session> {
        let previous = self.current.write().await.take();
        if let Some(session) = &previous {
            info!(user_id = %session.user_id, "Signed out");
        }
        previous
    }

    /// The stored session, expired or not.
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// The stored session if it is still valid.
    pub async fn valid(&self) -> Option<Session> {
        let now = Utc::now();
        self.current
            .read()
            .await
            .as_ref()
            .filter(|s| !s.is_expired_at(now))
            .cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.valid().await.is_some()
    }
}
