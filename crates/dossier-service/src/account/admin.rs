//! Master-gated account administration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dossier_auth::password::PasswordHasher;
use dossier_auth::rbac::{Capability, RbacEnforcer};
use dossier_core::error::AppError;
use dossier_core::result::AppResult;
use dossier_database::repositories::AccountRepository;
use dossier_entity::account::{AccountOverview, CreateAccount, Role};

use crate::context::RequestContext;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Partial update for an existing account. At least one field must be set.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub role: Option<Role>,
    pub password: Option<String>,
}

/// Account administration. Every operation requires the
/// `AccountManage` capability before anything else happens.
#[derive(Clone)]
pub struct AccountAdminService {
    accounts: AccountRepository,
    hasher: Arc<PasswordHasher>,
    enforcer: Arc<RbacEnforcer>,
    password_min_length: usize,
}

impl AccountAdminService {
    pub fn new(
        accounts: AccountRepository,
        hasher: Arc<PasswordHasher>,
        enforcer: Arc<RbacEnforcer>,
        password_min_length: usize,
    ) -> Self {
        Self {
            accounts,
            hasher,
            enforcer,
            password_min_length,
        }
    }

    /// Lists every account as a redacted projection.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<AccountOverview>> {
        self.enforcer.require(ctx.role, Capability::AccountManage)?;

        let accounts = self.accounts.list().await?;
        Ok(accounts.iter().map(|a| a.overview()).collect())
    }

    /// Creates an account with a hashed password.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NewAccount,
    ) -> AppResult<AccountOverview> {
        self.enforcer.require(ctx.role, Capability::AccountManage)?;

        let username = input.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        self.check_password_length(&input.password)?;

        let password_hash = self.hasher.hash(&input.password)?;
        let account = self
            .accounts
            .create(&CreateAccount {
                username: username.to_string(),
                password_hash,
                role: input.role,
            })
            .await?;

        info!(
            actor = %ctx.username,
            account_id = %account.id,
            username = %account.username,
            role = %account.role,
            "Account created"
        );
        Ok(account.overview())
    }

    /// Applies a role and/or password change to an account.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: AccountChanges,
    ) -> AppResult<()> {
        self.enforcer.require(ctx.role, Capability::AccountManage)?;

        if changes.role.is_none() && changes.password.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        // Validate and hash before writing anything, so a rejected
        // password cannot leave a role change half-applied.
        let password_hash = match &changes.password {
            Some(password) => {
                self.check_password_length(password)?;
                Some(self.hasher.hash(password)?)
            }
            None => None,
        };

        if let Some(role) = changes.role {
            self.accounts.update_role(id, role).await?;
            info!(actor = %ctx.username, account_id = %id, %role, "Account role changed");
        }

        if let Some(password_hash) = password_hash {
            self.accounts.update_password(id, &password_hash).await?;
            info!(actor = %ctx.username, account_id = %id, "Account password changed");
        }

        Ok(())
    }

    /// Deletes an account.
    ///
    /// Refuses self-deletion here; the last-master guard sits in the
    /// store's delete statement where it is race-free.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.enforcer.require(ctx.role, Capability::AccountManage)?;

        if id == ctx.account_id {
            return Err(AppError::self_deletion());
        }

        self.accounts.delete(id).await?;
        info!(actor = %ctx.username, account_id = %id, "Account deleted");
        Ok(())
    }

    fn check_password_length(&self, password: &str) -> AppResult<()> {
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }
}
