//! Account administration handlers (master only; the service gates).

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use dossier_core::error::AppError;
use dossier_entity::account::Role;
use dossier_service::account::{AccountChanges, NewAccount};

use crate::dto::request::{CreateAccountRequest, UpdateAccountRequest};
use crate::dto::response::{CreatedResponse, SuccessResponse, UsersResponse};
use crate::error::ApiError;
use crate::extractors::AuthSession;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<UsersResponse>, ApiError> {
    let users = state.account_admin.list(&auth.ctx).await?;
    Ok(Json(UsersResponse { users }))
}

/// POST /api/admin/users
pub async fn create_account(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let role: Role = req.role.parse()?;

    let created = state
        .account_admin
        .create(
            &auth.ctx,
            NewAccount {
                username: req.username,
                password: req.password,
                role,
            },
        )
        .await?;

    Ok(Json(CreatedResponse::ok(created.id)))
}

/// PATCH /api/admin/users/{id}
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let role = req.role.map(|r| r.parse::<Role>()).transpose()?;

    state
        .account_admin
        .update(
            &auth.ctx,
            id,
            AccountChanges {
                role,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.account_admin.delete(&auth.ctx, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
