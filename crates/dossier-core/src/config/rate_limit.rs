//! Login rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Fixed-window login rate limiter configuration.
///
/// Window state is process-local and lost on restart; it is a throttling
/// heuristic, not a correctness requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window duration in minutes.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,
    /// Maximum login attempts per client key within one window.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_window_minutes() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    10
}
