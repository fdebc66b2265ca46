//! Repository for the `jobs` table.
//!
//! Uses the lookup enums from `broker_core::lookups` for every status,
//! type and file type binding.

use broker_core::lookups::{FileType, JobStatus, JobType};
use broker_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job};

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, submission_id, file_type_id, job_type_id, status_id, \
    original_filename, filename, file_size, number_of_rows, \
    superseded_at, created_at, updated_at";

/// Provides persistence for submission jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a single job.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<Job, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let job = Self::insert_in_tx(&mut tx, input).await?;
        tx.commit().await?;
        Ok(job)
    }

    /// Find a job by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All jobs of a submission, superseded ones included, in creation order.
    pub async fn list_by_submission(
        pool: &PgPool,
        submission_id: DbId,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE submission_id = $1 ORDER BY id");
        sqlx::query_as::<_, Job>(&query)
            .bind(submission_id)
            .fetch_all(pool)
            .await
    }

    /// Move a job from `waiting` to `ready` once its upload is finalized.
    ///
    /// Returns the updated job, or `None` if the job was not waiting.
    pub async fn mark_upload_finished(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET status_id = $2 \
             WHERE id = $1 AND status_id = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(JobStatus::Ready.id())
            .bind(JobStatus::Waiting.id())
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Transaction helpers
    // -----------------------------------------------------------------------

    /// Insert a job within an existing transaction.
    pub(crate) async fn insert_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateJob,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs \
                (submission_id, file_type_id, job_type_id, status_id, \
                 original_filename, filename, file_size, number_of_rows) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(input.submission_id)
            .bind(input.file_type.id())
            .bind(input.job_type.id())
            .bind(input.status.id())
            .bind(&input.original_filename)
            .bind(&input.filename)
            .bind(input.file_size)
            .bind(input.number_of_rows)
            .fetch_one(&mut **tx)
            .await
    }

    /// Stamp the current job of a file type and job type as superseded.
    ///
    /// Returns `true` if a job was superseded.
    pub(crate) async fn supersede_current_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        submission_id: DbId,
        file_type: FileType,
        job_type: JobType,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE jobs SET superseded_at = NOW() \
             WHERE submission_id = $1 AND file_type_id = $2 AND job_type_id = $3 \
               AND superseded_at IS NULL",
        )
        .bind(submission_id)
        .bind(file_type.id())
        .bind(job_type.id())
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
