//! Case record ("Akte") entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A case record.
///
/// The tuple (subject_name, subject_first_name, subject_birth_date) is the
/// search key. A non-empty `record_password` gates retrieval independently
/// of the caller's role; it is a shared secret compared verbatim, not an
/// account credential, and is stored as provided.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Subject surname.
    pub subject_name: String,
    /// Subject first name.
    pub subject_first_name: String,
    /// Subject birth date, stored as entered (key component, never parsed).
    pub subject_birth_date: String,
    /// Affiliation of the subject.
    pub affiliation: String,
    /// Sponsor of the subject.
    pub sponsor: String,
    /// Optional shared secret gating retrieval. Never serialized outward.
    #[serde(skip_serializing)]
    pub record_password: Option<String>,
    /// Optional reference to an uploaded image.
    pub image_ref: Option<String>,
    /// Free-form notes, mutable by the master role only.
    pub notes: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CaseRecord {
    /// Whether retrieval of this record requires the shared secret.
    pub fn is_password_protected(&self) -> bool {
        self.record_password
            .as_deref()
            .is_some_and(|p| !p.is_empty())
    }

    /// Projection for the master oversight listing. The record password
    /// is omitted; only the fact that one exists is exposed.
    pub fn overview(&self) -> RecordOverview {
        RecordOverview {
            id: self.id,
            subject_name: self.subject_name.clone(),
            subject_first_name: self.subject_first_name.clone(),
            subject_birth_date: self.subject_birth_date.clone(),
            affiliation: self.affiliation.clone(),
            sponsor: self.sponsor.clone(),
            password_protected: self.is_password_protected(),
            image_ref: self.image_ref.clone(),
            notes: self.notes.clone(),
            created_at: self.created_at,
        }
    }
}

/// The three-field lookup key for record search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordKey {
    /// Subject surname.
    pub subject_name: String,
    /// Subject first name.
    pub subject_first_name: String,
    /// Subject birth date as entered.
    pub subject_birth_date: String,
}

/// Data required to create a new case record.
#[derive(Debug, Clone, Default)]
pub struct CreateCaseRecord {
    /// Subject surname (required).
    pub subject_name: String,
    /// Subject first name (required).
    pub subject_first_name: String,
    /// Subject birth date (required).
    pub subject_birth_date: String,
    /// Affiliation.
    pub affiliation: String,
    /// Sponsor.
    pub sponsor: String,
    /// Optional shared secret, stored as provided.
    pub record_password: Option<String>,
    /// Optional image reference.
    pub image_ref: Option<String>,
    /// Initial notes.
    pub notes: String,
}

/// Record projection for the oversight listing: everything except the
/// shared secret itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOverview {
    /// Record ID.
    pub id: Uuid,
    /// Subject surname.
    pub subject_name: String,
    /// Subject first name.
    pub subject_first_name: String,
    /// Subject birth date.
    pub subject_birth_date: String,
    /// Affiliation.
    pub affiliation: String,
    /// Sponsor.
    pub sponsor: String,
    /// Whether a record password is set.
    pub password_protected: bool,
    /// Image reference.
    pub image_ref: Option<String>,
    /// Notes.
    pub notes: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}
