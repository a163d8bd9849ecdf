//! In-memory session store.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use dossier_entity::session::Session;

/// Concurrent map from token digest to live session.
///
/// Expiry is lazy: an expired entry is dropped the first time it is
/// looked up, and [`purge_expired`](Self::purge_expired) sweeps the
/// rest on a timer.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Inserts a session under its token digest.
    pub fn insert(&self, token_digest: String, session: Session) {
        self.sessions.insert(token_digest, session);
    }

    /// Resolves a token digest to its session, evicting it if expired.
    pub fn resolve(&self, token_digest: &str, now: DateTime<Utc>) -> Option<Session> {
        let session = self.sessions.get(token_digest)?.clone();
        if session.is_expired(now) {
            self.sessions
                .remove_if(token_digest, |_, s| s.is_expired(now));
            return None;
        }
        Some(session)
    }

    /// Removes a session. Idempotent; returns whether one was present.
    pub fn remove(&self, token_digest: &str) -> bool {
        self.sessions.remove(token_digest).is_some()
    }

    /// Drops every expired session, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired(now));
        before - self.sessions.len()
    }

    /// Number of sessions currently held, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
