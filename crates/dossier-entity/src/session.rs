//! Session model.
//!
//! Sessions are owned exclusively by the session store in `dossier-auth`;
//! other components only ever see the identity resolved from one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::Role;

/// Server-side state for one authenticated client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated account's ID.
    pub account_id: Uuid,
    /// Username at login time.
    pub username: String,
    /// Role at login time.
    pub role: Role,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry. Reads never move it.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its absolute expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
