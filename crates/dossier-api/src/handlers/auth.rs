//! Auth handlers — login, logout, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use dossier_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MeResponse, SuccessResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthSession, ClientKey};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ClientKey(client_key): ClientKey,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .session_manager
        .login(&req.username, &req.password, &client_key)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        role: outcome.session.role,
        token: outcome.token,
        user: UserResponse {
            id: outcome.session.account_id,
            username: outcome.session.username,
            role: outcome.session.role,
        },
    }))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Json<SuccessResponse> {
    state.session_manager.logout(&auth.token);
    Json(SuccessResponse::ok())
}

/// GET /api/me
///
/// The one gated-shape route that answers `200` with `user: null`
/// instead of `401` when no session is live.
pub async fn me(auth: Option<AuthSession>) -> Json<MeResponse> {
    Json(MeResponse {
        user: auth.map(|auth| UserResponse {
            id: auth.account_id,
            username: auth.ctx.username.clone(),
            role: auth.role,
        }),
    })
}
