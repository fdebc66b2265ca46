//! Handler for submission status polling.

use axum::extract::State;
use axum::Json;
use broker_core::status::{summarize_submission, SubmissionStatus};

use super::{find_and_authorize_submission, load_submission_rows, SubmissionIdRequest};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /v1/check_status/
///
/// Every job of the submission, superseded ones included, with its header
/// check outcome and row errors, plus submission-wide error and row totals.
/// Reads straight from the database on every call.
pub async fn check_status(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmissionIdRequest>,
) -> AppResult<Json<SubmissionStatus>> {
    let submission =
        find_and_authorize_submission(&state.pool, input.submission_id, &auth).await?;
    let rows = load_submission_rows(&state.pool, submission.id).await?;

    let status = summarize_submission(
        &submission.to_record(),
        &rows.jobs,
        &rows.file_statuses,
        &rows.errors,
    );

    tracing::debug!(
        submission_id = submission.id,
        jobs = status.jobs.len(),
        number_of_errors = status.number_of_errors,
        "Submission status computed",
    );

    Ok(Json(status))
}
