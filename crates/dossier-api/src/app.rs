//! Application builder — wires repositories, auth and services into the
//! running Axum server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::watch;

use dossier_auth::password::PasswordHasher;
use dossier_auth::rbac::enforcer::RbacEnforcer;
use dossier_auth::session::manager::SessionManager;
use dossier_auth::session::store::SessionStore;
use dossier_auth::throttle::LoginRateLimiter;
use dossier_core::config::AppConfig;
use dossier_core::error::AppError;
use dossier_database::repositories::{AccountRepository, RecordRepository};
use dossier_service::account::AccountAdminService;
use dossier_service::record::RecordService;

use crate::router::build_router;
use crate::state::AppState;

/// How often the expired-session/window sweep runs.
const HOUSEKEEPING_INTERVAL: Duration = Duration::from_secs(60);

/// Wires all shared dependencies into an `AppState`.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let account_repo = AccountRepository::new(db_pool.clone());
    let record_repo = RecordRepository::new(db_pool.clone());

    let password_hasher = Arc::new(PasswordHasher::new());
    let session_store = Arc::new(SessionStore::new());
    let rate_limiter = Arc::new(LoginRateLimiter::new(&config.rate_limit));
    let session_manager = Arc::new(SessionManager::new(
        account_repo.clone(),
        Arc::clone(&password_hasher),
        session_store,
        rate_limiter,
        config.session.clone(),
    ));

    let rbac_enforcer = Arc::new(RbacEnforcer::new());
    let account_admin = Arc::new(AccountAdminService::new(
        account_repo.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&rbac_enforcer),
        config.auth.password_min_length,
    ));
    let record_service = Arc::new(RecordService::new(record_repo, Arc::clone(&rbac_enforcer)));

    AppState {
        config: Arc::new(config),
        db_pool,
        password_hasher,
        account_repo,
        session_manager,
        rbac_enforcer,
        account_admin,
        record_service,
    }
}

/// Ensures a master account exists, creating one from the bootstrap
/// credentials when none does. Idempotent across restarts and replicas.
pub async fn seed_master_account(state: &AppState) -> Result<(), AppError> {
    let auth = &state.config.auth;
    let password_hash = state.password_hasher.hash(&auth.bootstrap_password)?;

    let inserted = state
        .account_repo
        .seed_master(&auth.bootstrap_username, &password_hash)
        .await?;

    if inserted {
        tracing::warn!(
            username = %auth.bootstrap_username,
            "Master account seeded from bootstrap credentials; rotate the password immediately"
        );
    }
    Ok(())
}

/// Runs the Dossier server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let state = build_state(config, db_pool);

    seed_master_account(&state).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_housekeeping(state.clone(), shutdown_rx);

    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Dossier server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

/// Periodic sweep of expired sessions so the store does not accumulate
/// entries for clients that never come back.
fn spawn_housekeeping(state: AppState, mut shutdown_rx: watch::Receiver<bool>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HOUSEKEEPING_INTERVAL);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let removed = state.session_manager.purge_expired();
                    if removed > 0 {
                        tracing::debug!(removed, "Swept expired sessions");
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
