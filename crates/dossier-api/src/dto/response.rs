//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dossier_entity::account::{AccountOverview, Role};
use dossier_entity::record::{CaseRecord, RecordOverview};

/// Bare success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Whether the request was successful.
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Success acknowledgement carrying the created entity's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// Whether the request was successful.
    pub success: bool,
    /// Id of the created entity.
    pub id: Uuid,
}

impl CreatedResponse {
    pub fn ok(id: Uuid) -> Self {
        Self { success: true, id }
    }
}

/// Account summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// Account ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Role.
    pub role: Role,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether login succeeded.
    pub success: bool,
    /// Role of the authenticated account.
    pub role: Role,
    /// Opaque session token; shown to the client exactly once.
    pub token: String,
    /// Account summary.
    pub user: UserResponse,
}

/// `GET /api/me` response; `user` is `null` when no session is live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The authenticated account, if any.
    pub user: Option<UserResponse>,
}

/// Account listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    /// Redacted account projections.
    pub users: Vec<AccountOverview>,
}

/// Single record retrieval.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    /// The matched record; `record_password` is never serialized.
    pub record: CaseRecord,
}

/// Oversight listing of all records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// Redacted record projections, newest first.
    pub records: Vec<RecordOverview>,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
