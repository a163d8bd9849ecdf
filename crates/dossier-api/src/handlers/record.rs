//! Case-record handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use dossier_entity::record::{CreateCaseRecord, RecordKey};

use crate::dto::request::{CreateRecordRequest, SearchRecordRequest, UpdateNotesRequest};
use crate::dto::response::{CreatedResponse, RecordResponse, RecordsResponse, SuccessResponse};
use crate::error::ApiError;
use crate::extractors::AuthSession;
use crate::state::AppState;

/// POST /api/records
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<CreateRecordRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let record = state
        .record_service
        .create(
            &auth.ctx,
            CreateCaseRecord {
                subject_name: req.subject_name,
                subject_first_name: req.subject_first_name,
                subject_birth_date: req.subject_birth_date,
                affiliation: req.affiliation,
                sponsor: req.sponsor,
                record_password: req.record_password,
                image_ref: req.image_ref,
                notes: req.notes,
            },
        )
        .await?;

    Ok(Json(CreatedResponse::ok(record.id)))
}

/// POST /api/records/search
pub async fn search_records(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<SearchRecordRequest>,
) -> Result<Json<RecordResponse>, ApiError> {
    let key = RecordKey {
        subject_name: req.subject_name,
        subject_first_name: req.subject_first_name,
        subject_birth_date: req.subject_birth_date,
    };

    let record = state
        .record_service
        .search(&auth.ctx, &key, req.record_password.as_deref())
        .await?;

    Ok(Json(RecordResponse { record }))
}

/// PATCH /api/records/{id}/notes
pub async fn update_notes(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNotesRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .record_service
        .update_notes(&auth.ctx, id, &req.notes)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// GET /api/records
pub async fn list_records(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<RecordsResponse>, ApiError> {
    let records = state.record_service.list_all(&auth.ctx).await?;
    Ok(Json(RecordsResponse { records }))
}
