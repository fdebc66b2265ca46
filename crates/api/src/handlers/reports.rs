//! Handler for error report locations.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use broker_core::reports::{report_names, ErrorReport};
use broker_db::models::job::Job;
use broker_db::repositories::JobRepo;

use super::{find_and_authorize_submission, SubmissionIdRequest};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /v1/submission_error_reports/
///
/// One report per file type that has a job, whether or not it has errors.
pub async fn submission_error_reports(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmissionIdRequest>,
) -> AppResult<Json<BTreeMap<&'static str, ErrorReport>>> {
    let submission =
        find_and_authorize_submission(&state.pool, input.submission_id, &auth).await?;

    let jobs = JobRepo::list_by_submission(&state.pool, submission.id)
        .await?
        .iter()
        .map(Job::to_record)
        .collect::<Result<Vec<_>, _>>()?;

    let reports: BTreeMap<&'static str, ErrorReport> = report_names(submission.id, &jobs)
        .into_iter()
        .map(|(file_type, report_name)| {
            let location = state.storage.report_location(&report_name);
            (
                file_type.as_str(),
                ErrorReport {
                    report_name,
                    location,
                },
            )
        })
        .collect();

    Ok(Json(reports))
}
