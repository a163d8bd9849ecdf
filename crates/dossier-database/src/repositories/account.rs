//! Account repository implementation.
//!
//! The database enforces the two structural invariants: usernames are
//! unique (index arbitrates concurrent creates) and the last master
//! account cannot be deleted (guarded single-statement delete).

use sqlx::PgPool;
use uuid::Uuid;

use dossier_core::error::{AppError, ErrorKind};
use dossier_core::result::AppResult;
use dossier_entity::account::model::CreateAccount;
use dossier_entity::account::{Account, Role};

/// Repository for account CRUD and lookup operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    /// Find an account by username. Usernames are case-sensitive.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by username", e)
            })
    }

    /// List all accounts, oldest first.
    pub async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    /// Create a new account. A concurrent create for the same username
    /// loses at the unique index and surfaces as `DuplicateUsername`.
    pub async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, username, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_username_key") =>
            {
                AppError::duplicate_username(&data.username)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create account", e),
        })
    }

    /// Update an account's role.
    pub async fn update_role(&self, id: Uuid, role: Role) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    /// Update an account's password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }

    /// Delete an account.
    ///
    /// The statement itself refuses to remove the last remaining master,
    /// so two concurrent deletes cannot race past the cardinality
    /// invariant. The self-deletion rule belongs to the calling service.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let account = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;

        let result = sqlx::query(
            "DELETE FROM accounts \
             WHERE id = $1 \
               AND (role <> 'master'::account_role \
                    OR EXISTS (SELECT 1 FROM accounts \
                               WHERE role = 'master'::account_role AND id <> $1))",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete account", e))?;

        if result.rows_affected() == 0 {
            if account.role.is_master() {
                return Err(AppError::last_privileged_account());
            }
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }

    /// Count master accounts.
    pub async fn count_masters(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM accounts WHERE role = 'master'::account_role",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count masters", e))?;
        Ok(count as u64)
    }

    /// Seed the bootstrap master account if no master exists yet.
    ///
    /// Idempotent: keyed on absence of any master-role account, not on a
    /// username check. Returns whether a row was inserted.
    pub async fn seed_master(&self, username: &str, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO accounts (id, username, password_hash, role) \
             SELECT $1, $2, $3, 'master'::account_role \
             WHERE NOT EXISTS (SELECT 1 FROM accounts WHERE role = 'master'::account_role)",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to seed master account", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
