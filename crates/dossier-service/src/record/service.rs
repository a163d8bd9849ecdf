//! Record creation, gated retrieval, notes and oversight listing.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use dossier_auth::rbac::{Capability, RbacEnforcer};
use dossier_core::error::AppError;
use dossier_core::result::AppResult;
use dossier_database::repositories::RecordRepository;
use dossier_entity::record::{CaseRecord, CreateCaseRecord, RecordKey, RecordOverview};

use crate::context::RequestContext;

/// Case-record operations behind the capability gate.
#[derive(Clone)]
pub struct RecordService {
    records: RecordRepository,
    enforcer: Arc<RbacEnforcer>,
}

impl RecordService {
    pub fn new(records: RecordRepository, enforcer: Arc<RbacEnforcer>) -> Self {
        Self { records, enforcer }
    }

    /// Creates a record. The three key fields must be non-empty after
    /// trimming; everything else is stored exactly as provided.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut input: CreateCaseRecord,
    ) -> AppResult<CaseRecord> {
        self.enforcer.require(ctx.role, Capability::RecordCreate)?;
        validate_key_fields(&input)?;

        // An empty shared secret means "not protected"; normalize it away.
        if input.record_password.as_deref() == Some("") {
            input.record_password = None;
        }

        let record = self.records.create(&input).await?;
        info!(
            actor = %ctx.username,
            record_id = %record.id,
            protected = record.is_password_protected(),
            "Record created"
        );
        Ok(record)
    }

    /// Retrieves the newest record matching `key`.
    ///
    /// The record-password gate applies after role authorization and
    /// independently of it: even a master must supply the shared secret
    /// when one is set.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        key: &RecordKey,
        supplied_password: Option<&str>,
    ) -> AppResult<CaseRecord> {
        self.enforcer.require(ctx.role, Capability::RecordSearch)?;

        let Some(record) = self.records.find_by_key(key).await? else {
            return Err(AppError::not_found("No record matches the given subject"));
        };

        if !password_gate_passes(record.record_password.as_deref(), supplied_password) {
            warn!(actor = %ctx.username, record_id = %record.id, "Record password mismatch");
            return Err(AppError::wrong_record_password());
        }

        Ok(record)
    }

    /// Replaces the notes on a record.
    pub async fn update_notes(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        notes: &str,
    ) -> AppResult<()> {
        self.enforcer
            .require(ctx.role, Capability::RecordUpdateNotes)?;

        self.records.update_notes(id, notes).await?;
        info!(actor = %ctx.username, record_id = %id, "Record notes updated");
        Ok(())
    }

    /// Oversight listing of every record, newest first, with the shared
    /// secret redacted.
    pub async fn list_all(&self, ctx: &RequestContext) -> AppResult<Vec<RecordOverview>> {
        self.enforcer.require(ctx.role, Capability::RecordListAll)?;

        let records = self.records.list_all().await?;
        Ok(records.iter().map(|r| r.overview()).collect())
    }
}

fn validate_key_fields(input: &CreateCaseRecord) -> AppResult<()> {
    if input.subject_name.trim().is_empty()
        || input.subject_first_name.trim().is_empty()
        || input.subject_birth_date.trim().is_empty()
    {
        return Err(AppError::missing_required_fields(
            "subject_name, subject_first_name and subject_birth_date are required",
        ));
    }
    Ok(())
}

/// Verbatim shared-secret comparison. An unset or empty stored password
/// means the record is open; a missing supplied password counts as empty.
fn password_gate_passes(stored: Option<&str>, supplied: Option<&str>) -> bool {
    match stored {
        None | Some("") => true,
        Some(stored) => supplied == Some(stored),
    }
}
