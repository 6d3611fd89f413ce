//! In-memory session store: one working context per browser session.
//!
//! Sessions are created explicitly, cleared explicitly, and dropped after an idle TTL.
//! Nothing is persisted. Callers copy inputs out, release the lock, do the slow work
//! (LLM call, fetch, extraction), then write the result back.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::artifact::GeneratedArtifact;
use crate::models::session::Session;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts a new session, evicting any that have gone idle past the TTL.
    pub async fn create(&self) -> Session {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        self.purge_expired(&mut sessions, now);

        let session = Session::new(Uuid::new_v4(), now);
        sessions.insert(session.id, session.clone());
        info!("Session {} created ({} active)", session.id, sessions.len());
        session
    }

    /// Returns a copy of the session and marks it active.
    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        self.with_session(id, |session| session.clone()).await
    }

    /// Runs `f` against the live session under the write lock.
    /// `f` must not block; it is for reads and in-place edits only.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, AppError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let expired = sessions
            .get(&id)
            .map(|s| self.is_expired(s, now))
            .ok_or_else(|| not_found(id))?;
        if expired {
            sessions.remove(&id);
            debug!("Session {} expired on access", id);
            return Err(not_found(id));
        }

        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.last_active = now;
        Ok(f(session))
    }

    /// Overwrites the artifact slot in place (generation result or user edit).
    pub async fn set_artifact(&self, id: Uuid, artifact: GeneratedArtifact) -> Result<(), AppError> {
        self.with_session(id, |session| session.set_artifact(artifact))
            .await
    }

    /// Ends the session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Session {} ended", id);
        }
        removed
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.last_active > self.ttl
    }

    fn purge_expired(&self, sessions: &mut HashMap<Uuid, Session>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, s| !self.is_expired(s, now));
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {} idle sessions", purged);
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found or expired"))
}
