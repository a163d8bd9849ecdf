//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to operator accounts.
///
/// `Master` is the privileged role: it administers accounts and is the
/// only role allowed to update record notes or list all records. At
/// least one master account must exist at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Account administration plus every record capability.
    Master,
    /// Creates and searches records.
    Admin,
    /// Data entry: creates and searches records.
    Entry,
    /// Search-only access to records.
    Search,
    /// Field worker: creates records.
    Worker,
    /// Read-only access via record search.
    Viewer,
}

impl Role {
    /// All recognized roles, for validation and enumeration.
    pub const ALL: [Role; 6] = [
        Role::Master,
        Role::Admin,
        Role::Entry,
        Role::Search,
        Role::Worker,
        Role::Viewer,
    ];

    /// Whether this is the privileged account-administration role.
    pub fn is_master(&self) -> bool {
        matches!(self, Self::Master)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Admin => "admin",
            Self::Entry => "entry",
            Self::Search => "search",
            Self::Worker => "worker",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = dossier_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "master" => Ok(Self::Master),
            "admin" => Ok(Self::Admin),
            "entry" => Ok(Self::Entry),
            "search" => Ok(Self::Search),
            "worker" => Ok(Self::Worker),
            "viewer" => Ok(Self::Viewer),
            _ => Err(dossier_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: master, admin, entry, search, worker, viewer"
            ))),
        }
    }
}
