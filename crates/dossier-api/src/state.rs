//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use dossier_auth::password::PasswordHasher;
use dossier_auth::rbac::enforcer::RbacEnforcer;
use dossier_auth::session::manager::SessionManager;
use dossier_core::config::AppConfig;
use dossier_database::repositories::AccountRepository;
use dossier_service::account::AccountAdminService;
use dossier_service::record::RecordService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Account repository (bootstrap seeding and tests)
    pub account_repo: AccountRepository,
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,
    /// Account administration service
    pub account_admin: Arc<AccountAdminService>,
    /// Case record service
    pub record_service: Arc<RecordService>,
}
