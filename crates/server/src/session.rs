//! In-memory session store.
//!
//! A session binds a random token, carried in the `gymdesk_session` cookie,
//! to a member id. This is the only state the server keeps across requests.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "gymdesk_session";

/// Session token (random UUID)
pub type SessionToken = String;

#[derive(Clone, Debug)]
pub struct Session {
    pub member_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a new session for `member_id` and return its token.
    ///
    /// Expired sessions are dropped on the way.
    pub async fn create_session(&self, member_id: i32) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !self.is_expired(session, now));
        sessions.insert(
            token.clone(),
            Session {
                member_id,
                created_at: now,
            },
        );
        token
    }

    /// Get a live session by token.
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;
        if self.is_expired(session, Utc::now()) {
            return None;
        }
        Some(session.clone())
    }

    /// Delete session (logout)
    pub async fn delete_session(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(session.created_at) >= self.ttl
    }

    #[cfg(test)]
    async fn insert(&self, token: &str, session: Session) {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), session);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}
