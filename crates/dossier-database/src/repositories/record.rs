//! Case record repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use dossier_core::error::{AppError, ErrorKind};
use dossier_core::result::AppResult;
use dossier_entity::record::{CaseRecord, CreateCaseRecord, RecordKey};

/// Repository for case record storage and lookup.
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    /// Create a new record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new case record.
    pub async fn create(&self, data: &CreateCaseRecord) -> AppResult<CaseRecord> {
        sqlx::query_as::<_, CaseRecord>(
            "INSERT INTO case_records \
             (id, subject_name, subject_first_name, subject_birth_date, \
              affiliation, sponsor, record_password, image_ref, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.subject_name)
        .bind(&data.subject_first_name)
        .bind(&data.subject_birth_date)
        .bind(&data.affiliation)
        .bind(&data.sponsor)
        .bind(&data.record_password)
        .bind(&data.image_ref)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create record", e))
    }

    /// Find a record by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaseRecord>> {
        sqlx::query_as::<_, CaseRecord>("SELECT * FROM case_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find record by id", e)
            })
    }

    /// Look up a record by the three-field subject key.
    ///
    /// The key need not be unique; the newest record wins, with the id as
    /// tie-breaker so the result is total.
    pub async fn find_by_key(&self, key: &RecordKey) -> AppResult<Option<CaseRecord>> {
        sqlx::query_as::<_, CaseRecord>(
            "SELECT * FROM case_records \
             WHERE subject_name = $1 \
               AND subject_first_name = $2 \
               AND subject_birth_date = $3 \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1",
        )
        .bind(&key.subject_name)
        .bind(&key.subject_first_name)
        .bind(&key.subject_birth_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search records", e))
    }

    /// Replace a record's notes.
    pub async fn update_notes(&self, id: Uuid, notes: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE case_records SET notes = $2 WHERE id = $1")
            .bind(id)
            .bind(notes)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update notes", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Record {id} not found")));
        }
        Ok(())
    }

    /// List all records, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<CaseRecord>> {
        sqlx::query_as::<_, CaseRecord>(
            "SELECT * FROM case_records ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list records", e))
    }
}
