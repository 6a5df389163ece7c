//! In-memory verification session store
//!
//! Sessions are keyed by the id carried in the session cookie. Each session
//! sits behind its own mutex, held for a whole action including the gateway
//! call: actions on one session run one at a time, other sessions proceed
//! independently.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use pv_core::domain::VerificationSession;

/// Upper bound for the idle timeout, one year
const MAX_IDLE_TIMEOUT_SECS: u64 = 365 * 24 * 60 * 60;

/// Shared, lockable handle to one session
pub type SessionHandle = Arc<Mutex<VerificationSession>>;

/// Sessions of all connected users
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create an empty store discarding sessions idle for `idle_timeout_secs`
    pub fn new(idle_timeout_secs: u64) -> Self {
        let secs = idle_timeout_secs.min(MAX_IDLE_TIMEOUT_SECS) as i64;
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: Duration::seconds(secs),
        }
    }

    /// Session for `requested`, or a fresh one when the id is absent,
    /// unknown or expired. A returned session is already touched, so a
    /// concurrent purge cannot drop it before the caller locks it.
    /// Creating a session purges idle ones.
    pub async fn get_or_create(&self, requested: Option<Uuid>) -> (Uuid, SessionHandle) {
        let now = Utc::now();

        if let Some(id) = requested {
            if let Some(handle) = self.sessions.read().await.get(&id) {
                if self.claim(handle, now) {
                    return (id, handle.clone());
                }
            }
        }

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| !self.is_expired(handle, now));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!(purged, remaining = sessions.len(), "Purged idle verification sessions");
        }

        let session = VerificationSession::new();
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, handle.clone());
        debug!(session_id = %id, "Created verification session");

        (id, handle)
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Refresh a live session's idle clock. Fails only for an idle session.
    fn claim(&self, handle: &SessionHandle, now: DateTime<Utc>) -> bool {
        match handle.try_lock() {
            Ok(mut session) => {
                if session.is_idle(now, self.idle_timeout) {
                    return false;
                }
                session.touch();
                true
            }
            // Held by an action in progress, which keeps it alive
            Err(_) => true,
        }
    }

    fn is_expired(&self, handle: &SessionHandle, now: DateTime<Utc>) -> bool {
        // A locked session is in use
        match handle.try_lock() {
            Ok(session) => session.is_idle(now, self.idle_timeout),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_core::domain::VerificationStep;

    #[tokio::test]
    async fn test_creates_session_without_cookie() {
        let store = SessionStore::new(900);

        let (id, handle) = store.get_or_create(None).await;

        assert_eq!(handle.lock().await.id, id);
        assert_eq!(handle.lock().await.step(), VerificationStep::AwaitingPhone);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_reuses_known_session() {
        let store = SessionStore::new(900);
        let (id, first) = store.get_or_create(None).await;

        let (same_id, second) = store.get_or_create(Some(id)).await;

        assert_eq!(same_id, id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_refreshes_idle_clock() {
        let store = SessionStore::new(900);
        let (id, handle) = store.get_or_create(None).await;
        let created = handle.lock().await.updated_at;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        store.get_or_create(Some(id)).await;

        // The purge that runs when another session is created sees it active
        assert!(handle.lock().await.updated_at > created);
        store.get_or_create(None).await;
        assert!(store.sessions.read().await.contains_key(&id));
    }

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_session() {
        let store = SessionStore::new(900);
        let forged = Uuid::new_v4();

        let (id, _) = store.get_or_create(Some(forged)).await;

        assert_ne!(id, forged);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_purged() {
        let store = SessionStore::new(0);
        let (stale, _) = store.get_or_create(None).await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let (id, _) = store.get_or_create(Some(stale)).await;

        assert_ne!(id, stale);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_session_in_use_is_not_purged() {
        let store = SessionStore::new(0);
        let (busy, handle) = store.get_or_create(None).await;
        let _guard = handle.lock().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        store.get_or_create(None).await;

        assert_eq!(store.len().await, 2);
        assert!(store.sessions.read().await.contains_key(&busy));
    }
}
