//! Login, resolution and logout.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use dossier_core::config::SessionConfig;
use dossier_core::error::AppError;
use dossier_core::result::AppResult;
use dossier_database::repositories::AccountRepository;
use dossier_entity::session::Session;

use crate::password::PasswordHasher;
use crate::session::{store::SessionStore, token};
use crate::throttle::{LoginRateLimiter, ThrottleDecision};

/// A freshly established session together with the one-time token.
///
/// The plaintext token exists only here and in the login response; the
/// store keeps just its digest.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub session: Session,
}

/// Coordinates credential verification, throttling and session state.
#[derive(Clone)]
pub struct SessionManager {
    accounts: AccountRepository,
    hasher: Arc<PasswordHasher>,
    store: Arc<SessionStore>,
    limiter: Arc<LoginRateLimiter>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(
        accounts: AccountRepository,
        hasher: Arc<PasswordHasher>,
        store: Arc<SessionStore>,
        limiter: Arc<LoginRateLimiter>,
        config: SessionConfig,
    ) -> Self {
        Self {
            accounts,
            hasher,
            store,
            limiter,
            config,
        }
    }

    /// Verifies credentials and opens a session.
    ///
    /// The rate limiter is consulted before any credential work, and
    /// unknown usernames burn a hash verification so the two rejection
    /// paths are indistinguishable from outside.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client_key: &str,
    ) -> AppResult<LoginOutcome> {
        if self.limiter.check(client_key) == ThrottleDecision::Throttled {
            warn!(client_key, "Login attempt throttled");
            return Err(AppError::throttled(
                "Too many login attempts; try again later",
            ));
        }

        let Some(account) = self.accounts.find_by_username(username).await? else {
            let _ = self.hasher.verify(password, "");
            warn!(username, "Login failed: unknown username");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify(password, &account.password_hash) {
            warn!(username, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        let now = Utc::now();
        let session = Session {
            account_id: account.id,
            username: account.username.clone(),
            role: account.role,
            created_at: now,
            expires_at: now + Duration::minutes(self.config.ttl_minutes as i64),
        };

        let token = token::generate();
        self.store.insert(token::digest(&token), session.clone());

        info!(
            account_id = %account.id,
            username = %account.username,
            role = %account.role,
            "Login successful"
        );

        Ok(LoginOutcome { token, session })
    }

    /// Resolves a bearer token to its live session, if any.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.store.resolve(&token::digest(token), Utc::now())
    }

    /// Ends the session for `token`. Idempotent.
    pub fn logout(&self, token: &str) {
        if self.store.remove(&token::digest(token)) {
            info!("Session ended");
        }
    }

    /// Sweeps expired sessions and lapsed throttle windows.
    pub fn purge_expired(&self) -> usize {
        self.limiter.purge_expired();
        self.store.purge_expired(Utc::now())
    }
}
