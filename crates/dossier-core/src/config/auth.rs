//! Authentication and bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username seeded for the master account when none exists.
    #[serde(default = "default_bootstrap_username")]
    pub bootstrap_username: String,
    /// Password seeded for the master account when none exists.
    ///
    /// Operators must rotate this immediately after first login; the
    /// server logs a warning whenever the seed is applied.
    #[serde(default = "default_bootstrap_password")]
    pub bootstrap_password: String,
    /// Minimum password length for account passwords.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

fn default_bootstrap_username() -> String {
    "master".to_string()
}

fn default_bootstrap_password() -> String {
    "CHANGE_ME_ON_FIRST_LOGIN".to_string()
}

fn default_password_min() -> usize {
    8
}
