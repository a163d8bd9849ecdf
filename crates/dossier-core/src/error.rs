//! Unified application error types for Dossier.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Policy denials (duplicate username,
//! last privileged account, throttled, ...) are first-class kinds so the
//! HTTP layer can surface stable codes.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Login failed; deliberately does not say whether the username or
    /// the password was wrong.
    InvalidCredentials,
    /// No valid session accompanied the request.
    Unauthenticated,
    /// The caller's role does not permit the action.
    Forbidden,
    /// An account with that username already exists.
    DuplicateUsername,
    /// An account may not delete itself.
    SelfDeletion,
    /// The last remaining master account may not be deleted.
    LastPrivilegedAccount,
    /// A required record field was empty.
    MissingRequiredFields,
    /// The supplied record password did not match the stored one.
    WrongRecordPassword,
    /// Too many login attempts from this client in the current window.
    Throttled,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (concurrent modification, etc.).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::DuplicateUsername => write!(f, "DUPLICATE_USERNAME"),
            Self::SelfDeletion => write!(f, "SELF_DELETION"),
            Self::LastPrivilegedAccount => write!(f, "LAST_PRIVILEGED_ACCOUNT"),
            Self::MissingRequiredFields => write!(f, "MISSING_REQUIRED_FIELDS"),
            Self::WrongRecordPassword => write!(f, "WRONG_RECORD_PASSWORD"),
            Self::Throttled => write!(f, "THROTTLED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Dossier.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an invalid-credentials error with the uniform login message.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid username or password")
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a duplicate-username error.
    pub fn duplicate_username(username: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateUsername,
            format!("Username '{username}' already exists"),
        )
    }

    /// Create a self-deletion error.
    pub fn self_deletion() -> Self {
        Self::new(ErrorKind::SelfDeletion, "Cannot delete your own account")
    }

    /// Create a last-privileged-account error.
    pub fn last_privileged_account() -> Self {
        Self::new(
            ErrorKind::LastPrivilegedAccount,
            "Cannot delete the last master account",
        )
    }

    /// Create a missing-required-fields error.
    pub fn missing_required_fields(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRequiredFields, message)
    }

    /// Create a wrong-record-password error.
    pub fn wrong_record_password() -> Self {
        Self::new(ErrorKind::WrongRecordPassword, "Record password does not match")
    }

    /// Create a throttled error.
    pub fn throttled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Throttled, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
