//! Repository for the `file_status` table.

use broker_core::types::DbId;
use sqlx::PgPool;

use crate::models::file_status::{CreateFileStatus, FileStatus};

/// Column list for `file_status` queries.
const COLUMNS: &str = "\
    id, job_id, filename, status_id, missing_headers, duplicated_headers, \
    row_errors_present, created_at, updated_at";

/// Provides persistence for header validation outcomes.
pub struct FileStatusRepo;

impl FileStatusRepo {
    /// Insert the file status of a job. A second row for the same job
    /// violates `uq_file_status_job_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFileStatus,
    ) -> Result<FileStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO file_status \
                (job_id, filename, status_id, missing_headers, duplicated_headers, row_errors_present) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileStatus>(&query)
            .bind(input.job_id)
            .bind(&input.filename)
            .bind(input.status.id())
            .bind(&input.missing_headers)
            .bind(&input.duplicated_headers)
            .bind(input.row_errors_present)
            .fetch_one(pool)
            .await
    }

    /// File statuses for a batch of jobs.
    pub async fn list_by_jobs(
        pool: &PgPool,
        job_ids: &[DbId],
    ) -> Result<Vec<FileStatus>, sqlx::Error> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM file_status WHERE job_id = ANY($1) ORDER BY job_id");
        sqlx::query_as::<_, FileStatus>(&query)
            .bind(job_ids)
            .fetch_all(pool)
            .await
    }
}
