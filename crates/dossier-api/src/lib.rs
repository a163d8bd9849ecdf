//! # dossier-api
//!
//! HTTP API layer for Dossier built on Axum.
//!
//! Provides the REST endpoints, the `AuthSession` extractor, DTOs and the
//! `AppError` to HTTP response mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_state, run_server, seed_master_account};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
