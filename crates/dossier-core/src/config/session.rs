//! Session lifetime configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session time-to-live in minutes, counted from login.
    /// Reads never extend it.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

fn default_ttl_minutes() -> u64 {
    60
}
