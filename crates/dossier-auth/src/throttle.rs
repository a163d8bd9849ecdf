//! Login rate limiting.
//!
//! Fixed window per client key: the first attempt opens a window, each
//! attempt inside it counts, and once the budget is spent every further
//! attempt is refused until the window lapses. The check runs before
//! credentials are ever looked at, so a throttled client learns nothing
//! about username validity.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use dossier_core::config::RateLimitConfig;

/// Verdict for a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// The attempt may proceed to credential verification.
    Allowed,
    /// The client has exhausted its window budget.
    Throttled,
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    attempts: u32,
}

/// Fixed-window login rate limiter keyed by client.
#[derive(Debug)]
pub struct LoginRateLimiter {
    windows: DashMap<String, Window>,
    window: Duration,
    max_attempts: u32,
}

impl LoginRateLimiter {
    /// Creates a limiter from the configured window and budget.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_window(
            Duration::from_secs(config.window_minutes * 60),
            config.max_attempts,
        )
    }

    /// Creates a limiter with an explicit window, mainly for tests.
    pub fn with_window(window: Duration, max_attempts: u32) -> Self {
        Self {
            windows: DashMap::new(),
            window,
            max_attempts,
        }
    }

    /// Registers one attempt for `client_key` and returns the verdict.
    ///
    /// The entry guard keeps the count-and-increment atomic per key, so
    /// concurrent attempts cannot both squeeze through the last slot.
    pub fn check(&self, client_key: &str) -> ThrottleDecision {
        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(client_key.to_string())
            .or_insert_with(|| Window {
                started_at: now,
                attempts: 0,
            });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.attempts = 0;
        }

        if entry.attempts >= self.max_attempts {
            return ThrottleDecision::Throttled;
        }
        entry.attempts += 1;
        ThrottleDecision::Allowed
    }

    /// Drops windows whose period has lapsed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.duration_since(w.started_at) < self.window);
        before - self.windows.len()
    }
}
