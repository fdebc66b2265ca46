//! Handler for per-file-type error metrics.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use broker_core::metrics::error_metrics;
use broker_core::status::ErrorDetail;

use super::{find_and_authorize_submission, load_submission_rows, SubmissionIdRequest};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /v1/error_metrics/
///
/// Errors of the current validation job of each submitted file type. A
/// file-level failure is listed ahead of the row errors.
pub async fn submission_error_metrics(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmissionIdRequest>,
) -> AppResult<Json<BTreeMap<&'static str, Vec<ErrorDetail>>>> {
    let submission =
        find_and_authorize_submission(&state.pool, input.submission_id, &auth).await?;
    let rows = load_submission_rows(&state.pool, submission.id).await?;

    Ok(Json(error_metrics(
        &rows.jobs,
        &rows.file_statuses,
        &rows.errors,
    )))
}
