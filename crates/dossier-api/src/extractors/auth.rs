//! `AuthSession` extractor — resolves the bearer token to a live session.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;

use dossier_core::error::AppError;
use dossier_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller context available in handlers.
///
/// Carries the raw token alongside the resolved context so logout can
/// address its own session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub ctx: RequestContext,
    pub token: String,
}

impl std::ops::Deref for AuthSession {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.ctx
    }
}

fn resolve_session(parts: &Parts, state: &AppState) -> Option<AuthSession> {
    let auth_header = parts.headers.get("authorization")?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    let session = state.session_manager.resolve(token)?;

    Some(AuthSession {
        ctx: RequestContext::from(&session),
        token: token.to_string(),
    })
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Missing header, malformed header, unknown or expired token all
        // read the same from outside.
        resolve_session(parts, state)
            .ok_or_else(|| ApiError(AppError::unauthenticated("Not authenticated")))
    }
}

impl OptionalFromRequestParts<AppState> for AuthSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_session(parts, state))
    }
}
