//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create account request (master).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccountRequest {
    /// Username.
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Role name; parsed against the role enum in the handler so an
    /// unknown role reads as a validation failure, not a decode error.
    pub role: String,
}

/// Patch an account's role and/or password (master).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    /// New role name.
    pub role: Option<String>,
    /// New password.
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// Create record request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Subject surname (required).
    pub subject_name: String,
    /// Subject first name (required).
    pub subject_first_name: String,
    /// Subject birth date, kept as entered (required).
    pub subject_birth_date: String,
    /// Affiliation.
    #[serde(default)]
    pub affiliation: String,
    /// Sponsor.
    #[serde(default)]
    pub sponsor: String,
    /// Optional shared secret gating retrieval.
    pub record_password: Option<String>,
    /// Optional image reference.
    pub image_ref: Option<String>,
    /// Initial notes.
    #[serde(default)]
    pub notes: String,
}

/// Record search request: the three-field key plus the shared secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecordRequest {
    /// Subject surname.
    pub subject_name: String,
    /// Subject first name.
    pub subject_first_name: String,
    /// Subject birth date as entered.
    pub subject_birth_date: String,
    /// Shared secret for protected records.
    pub record_password: Option<String>,
}

/// Replace a record's notes (master).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotesRequest {
    /// New notes content.
    pub notes: String,
}
