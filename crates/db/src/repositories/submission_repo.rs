//! Repository for the `submissions` table.
//!
//! Creating or re-submitting writes the submission row and its jobs in one
//! transaction, so a failed request never leaves a submission without jobs.

use broker_core::lookups::{JobStatus, JobType};
use broker_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{CreateJob, Job, NewUpload};
use crate::models::submission::{CreateSubmission, Submission, UpdateReportingPeriod};
use crate::repositories::JobRepo;

/// Column list for `submissions` queries.
const COLUMNS: &str = "\
    id, user_id, agency_name, reporting_start_date, reporting_end_date, \
    created_at, updated_at";

/// Provides persistence for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a bare submission row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubmission,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (user_id, agency_name, reporting_start_date, reporting_end_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(input.user_id)
            .bind(&input.agency_name)
            .bind(input.reporting_start_date)
            .bind(input.reporting_end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a submission together with one record-validation job per upload.
    ///
    /// New jobs start in `waiting` until the client finalizes the upload.
    pub async fn create_with_uploads(
        pool: &PgPool,
        input: &CreateSubmission,
        uploads: &[NewUpload],
    ) -> Result<(Submission, Vec<Job>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO submissions (user_id, agency_name, reporting_start_date, reporting_end_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let submission = sqlx::query_as::<_, Submission>(&query)
            .bind(input.user_id)
            .bind(&input.agency_name)
            .bind(input.reporting_start_date)
            .bind(input.reporting_end_date)
            .fetch_one(&mut *tx)
            .await?;

        let mut jobs = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let job = JobRepo::insert_in_tx(&mut tx, &upload_job(submission.id, upload)).await?;
            jobs.push(job);
        }

        tx.commit().await?;
        Ok((submission, jobs))
    }

    /// Re-submit files and/or reporting dates for an existing submission.
    ///
    /// `agency_name` and `user_id` are never touched. Each upload supersedes
    /// the current record-validation job of its file type before the new job
    /// is inserted. Returns `None` if the submission does not exist.
    pub async fn update_with_uploads(
        pool: &PgPool,
        id: DbId,
        period: &UpdateReportingPeriod,
        uploads: &[NewUpload],
    ) -> Result<Option<(Submission, Vec<Job>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE submissions SET \
                reporting_start_date = COALESCE($2, reporting_start_date), \
                reporting_end_date = COALESCE($3, reporting_end_date) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let Some(submission) = sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .bind(period.reporting_start_date)
            .bind(period.reporting_end_date)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut jobs = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let superseded = JobRepo::supersede_current_in_tx(
                &mut tx,
                submission.id,
                upload.file_type,
                JobType::CsvRecordValidation,
            )
            .await?;
            tracing::debug!(
                submission_id = submission.id,
                file_type = %upload.file_type,
                superseded,
                "Superseding current job",
            );
            let job = JobRepo::insert_in_tx(&mut tx, &upload_job(submission.id, upload)).await?;
            jobs.push(job);
        }

        tx.commit().await?;
        Ok(Some((submission, jobs)))
    }
}

fn upload_job(submission_id: DbId, upload: &NewUpload) -> CreateJob {
    CreateJob {
        submission_id,
        file_type: upload.file_type,
        job_type: JobType::CsvRecordValidation,
        status: JobStatus::Waiting,
        original_filename: Some(upload.original_filename.clone()),
        filename: Some(upload.upload_key.clone()),
        file_size: None,
        number_of_rows: None,
    }
}
