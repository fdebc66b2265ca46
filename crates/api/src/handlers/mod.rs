//! Request handlers for the `/v1` routes.
//!
//! Every handler takes the [`AuthUser`] principal produced by the permission
//! gate. Submission-scoped lookups report a missing submission and a
//! submission owned by someone else with the same 400 response.

pub mod metrics;
pub mod reports;
pub mod status;
pub mod submission;

use broker_core::error::CoreError;
use broker_core::status::{ErrorRecord, FileStatusRecord, JobRecord};
use broker_core::types::DbId;
use broker_db::models::job::Job;
use broker_db::models::submission::Submission;
use broker_db::repositories::{ErrorDataRepo, FileStatusRepo, JobRepo, SubmissionRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Body of the submission-scoped polling routes.
#[derive(Debug, Deserialize)]
pub struct SubmissionIdRequest {
    pub submission_id: DbId,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Allow the submission's owner and admins; deny everyone else.
pub fn authorize_access(submission: &Submission, auth: &AuthUser) -> Result<(), CoreError> {
    if submission.user_id == auth.user_id || auth.is_admin() {
        return Ok(());
    }
    Err(CoreError::PermissionDenied(format!(
        "User {} may not access submission {}",
        auth.user_id, submission.id
    )))
}

/// The 400 returned for anything the caller may not see.
pub(crate) fn inaccessible(entity: &str, id: DbId) -> AppError {
    AppError::BadRequest(format!("{entity} {id} does not exist or is not accessible"))
}

/// Fetch a submission and verify the caller owns it (or is admin).
///
/// Both failure cases become the same `BadRequest`; the distinction is only
/// logged.
pub(crate) async fn find_and_authorize_submission(
    pool: &PgPool,
    submission_id: DbId,
    auth: &AuthUser,
) -> AppResult<Submission> {
    let Some(submission) = SubmissionRepo::find_by_id(pool, submission_id).await? else {
        tracing::debug!(submission_id, user_id = auth.user_id, "Submission not found");
        return Err(inaccessible("Submission", submission_id));
    };

    if let Err(err) = authorize_access(&submission, auth) {
        tracing::warn!(submission_id, user_id = auth.user_id, error = %err, "Submission access denied");
        return Err(inaccessible("Submission", submission_id));
    }

    Ok(submission)
}

/// Jobs of a submission with their file status and error rows, converted
/// to the `broker_core::status` record types.
pub(crate) struct SubmissionRows {
    pub jobs: Vec<JobRecord>,
    pub file_statuses: Vec<FileStatusRecord>,
    pub errors: Vec<ErrorRecord>,
}

/// Load every job of a submission, then its file statuses and error rows
/// in two batched queries.
pub(crate) async fn load_submission_rows(
    pool: &PgPool,
    submission_id: DbId,
) -> AppResult<SubmissionRows> {
    let jobs = JobRepo::list_by_submission(pool, submission_id).await?;
    let job_ids: Vec<DbId> = jobs.iter().map(|job| job.id).collect();

    let file_statuses = FileStatusRepo::list_by_jobs(pool, &job_ids).await?;
    let errors = ErrorDataRepo::list_by_jobs(pool, &job_ids).await?;

    Ok(SubmissionRows {
        jobs: jobs.iter().map(Job::to_record).collect::<Result<_, _>>()?,
        file_statuses: file_statuses
            .iter()
            .map(|fs| fs.to_record())
            .collect::<Result<_, _>>()?,
        errors: errors
            .iter()
            .map(|e| e.to_record())
            .collect::<Result<_, _>>()?,
    })
}
