//! Repository for the `error_data` table.

use broker_core::types::DbId;
use sqlx::PgPool;

use crate::models::error_data::{CreateErrorData, ErrorData};

/// Column list for `error_data` queries.
const COLUMNS: &str = "\
    id, job_id, filename, field_name, error_type_id, occurrences, first_row, \
    rule_failed, created_at, updated_at";

/// Provides persistence for row-level validation failures.
pub struct ErrorDataRepo;

impl ErrorDataRepo {
    /// Insert one error row.
    pub async fn create(pool: &PgPool, input: &CreateErrorData) -> Result<ErrorData, sqlx::Error> {
        let query = format!(
            "INSERT INTO error_data \
                (job_id, filename, field_name, error_type_id, occurrences, first_row, rule_failed) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ErrorData>(&query)
            .bind(input.job_id)
            .bind(&input.filename)
            .bind(&input.field_name)
            .bind(input.error_type.id())
            .bind(input.occurrences)
            .bind(input.first_row)
            .bind(&input.rule_failed)
            .fetch_one(pool)
            .await
    }

    /// Error rows for a batch of jobs, grouped by job then insertion order.
    pub async fn list_by_jobs(
        pool: &PgPool,
        job_ids: &[DbId],
    ) -> Result<Vec<ErrorData>, sqlx::Error> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query =
            format!("SELECT {COLUMNS} FROM error_data WHERE job_id = ANY($1) ORDER BY job_id, id");
        sqlx::query_as::<_, ErrorData>(&query)
            .bind(job_ids)
            .fetch_all(pool)
            .await
    }
}
