//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// An operator account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login name (case-sensitive).
    pub username: String,
    /// Argon2 password hash. Never leaves the persistence boundary.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Redacted projection for listings and responses.
    pub fn overview(&self) -> AccountOverview {
        AccountOverview {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Account projection safe to return to clients. Carries no hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOverview {
    /// Account ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}
