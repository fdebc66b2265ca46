//! Handlers for creating, updating and finalizing submissions.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use broker_core::dates::{parse_optional_date, validate_reporting_period};
use broker_core::error::CoreError;
use broker_core::lookups::{FileType, JobStatus};
use broker_core::types::DbId;
use broker_db::models::job::{Job, NewUpload};
use broker_db::models::submission::{CreateSubmission, UpdateReportingPeriod};
use broker_db::repositories::{JobRepo, SubmissionRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{authorize_access, find_and_authorize_submission, inaccessible};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage::UploadCredentials;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /v1/submit_files/`.
///
/// Each file type field holds the client's filename for that file.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitFilesRequest {
    pub existing_submission_id: Option<DbId>,
    pub agency_name: Option<String>,
    pub reporting_period_start_date: Option<String>,
    pub reporting_period_end_date: Option<String>,
    pub appropriations: Option<String>,
    pub award: Option<String>,
    pub award_financial: Option<String>,
    pub program_activity: Option<String>,
}

impl SubmitFilesRequest {
    /// Supplied files in file type order; blank filenames count as absent.
    pub fn files(&self) -> Vec<(FileType, &str)> {
        FileType::ALL
            .iter()
            .filter_map(|&file_type| {
                let name = match file_type {
                    FileType::Award => self.award.as_deref(),
                    FileType::AwardFinancial => self.award_financial.as_deref(),
                    FileType::Appropriations => self.appropriations.as_deref(),
                    FileType::ProgramActivity => self.program_activity.as_deref(),
                }?;
                (!name.trim().is_empty()).then_some((file_type, name))
            })
            .collect()
    }
}

/// Response of `POST /v1/submit_files/`.
///
/// `uploads` flattens into `<file_type>_id` and `<file_type>_key` pairs.
#[derive(Debug, Serialize)]
pub struct SubmitFilesResponse {
    pub submission_id: DbId,
    #[serde(flatten)]
    pub uploads: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<UploadCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
}

/// Body of `POST /v1/finalize_job/`.
#[derive(Debug, Deserialize)]
pub struct FinalizeJobRequest {
    pub upload_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct FinalizeJobResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /v1/submit_files/
///
/// Create a submission with one job per supplied file, or with
/// `existing_submission_id` replace the jobs of the supplied file types and
/// overwrite the supplied reporting dates. The agency name of an existing
/// submission never changes.
pub async fn submit_files(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitFilesRequest>,
) -> AppResult<Json<SubmitFilesResponse>> {
    let start = parse_optional_date(
        "reporting_period_start_date",
        input.reporting_period_start_date.as_deref(),
    )?;
    let end = parse_optional_date(
        "reporting_period_end_date",
        input.reporting_period_end_date.as_deref(),
    )?;

    let now = chrono::Utc::now().timestamp();
    let uploads: Vec<NewUpload> = input
        .files()
        .into_iter()
        .map(|(file_type, filename)| NewUpload {
            file_type,
            original_filename: filename.to_string(),
            upload_key: state.storage.upload_key(auth.user_id, now, file_type, filename),
        })
        .collect();

    let (submission, jobs) = match input.existing_submission_id {
        Some(submission_id) => {
            let existing = find_and_authorize_submission(&state.pool, submission_id, &auth).await?;
            validate_reporting_period(
                start.or(existing.reporting_start_date),
                end.or(existing.reporting_end_date),
            )?;

            let period = UpdateReportingPeriod {
                reporting_start_date: start,
                reporting_end_date: end,
            };
            SubmissionRepo::update_with_uploads(&state.pool, submission_id, &period, &uploads)
                .await?
                .ok_or_else(|| inaccessible("Submission", submission_id))?
        }
        None => {
            let agency_name = input
                .agency_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    CoreError::Validation("agency_name is required for a new submission".into())
                })?;
            if uploads.is_empty() {
                return Err(CoreError::Validation(
                    "A new submission requires at least one file".into(),
                )
                .into());
            }
            validate_reporting_period(start, end)?;

            let create = CreateSubmission {
                user_id: auth.user_id,
                agency_name: Some(agency_name.to_string()),
                reporting_start_date: start,
                reporting_end_date: end,
            };
            SubmissionRepo::create_with_uploads(&state.pool, &create, &uploads).await?
        }
    };

    tracing::info!(
        submission_id = submission.id,
        user_id = auth.user_id,
        job_count = jobs.len(),
        updated = input.existing_submission_id.is_some(),
        "Files submitted",
    );

    let grant = state.storage.upload_grant();
    Ok(Json(SubmitFilesResponse {
        submission_id: submission.id,
        uploads: upload_fields(&jobs)?,
        credentials: grant.as_ref().map(|g| g.credentials.clone()),
        bucket_name: grant.map(|g| g.bucket_name),
    }))
}

/// POST /v1/finalize_job/
///
/// Mark an upload as complete so validation can pick up its job.
pub async fn finalize_job(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<FinalizeJobRequest>,
) -> AppResult<Json<FinalizeJobResponse>> {
    let upload_id = input.upload_id;

    let Some(job) = JobRepo::find_by_id(&state.pool, upload_id).await? else {
        return Err(inaccessible("Upload", upload_id));
    };
    let submission = SubmissionRepo::find_by_id(&state.pool, job.submission_id).await?;
    if !submission.is_some_and(|s| authorize_access(&s, &auth).is_ok()) {
        tracing::warn!(job_id = job.id, user_id = auth.user_id, "Upload access denied");
        return Err(inaccessible("Upload", upload_id));
    }

    let status = job.status()?;
    if status != JobStatus::Waiting {
        return Err(CoreError::InvalidState(format!(
            "Job is not awaiting upload (status: {status})"
        ))
        .into());
    }

    // A concurrent finalize may have won the race since the read above.
    JobRepo::mark_upload_finished(&state.pool, job.id)
        .await?
        .ok_or_else(|| CoreError::InvalidState("Job is not awaiting upload".into()))?;

    tracing::info!(
        job_id = job.id,
        submission_id = job.submission_id,
        user_id = auth.user_id,
        "Upload finalized",
    );

    Ok(Json(FinalizeJobResponse { success: true }))
}

/// `<file_type>_id` and `<file_type>_key` entries for newly created jobs.
fn upload_fields(jobs: &[Job]) -> AppResult<BTreeMap<String, Value>> {
    let mut fields = BTreeMap::new();
    for job in jobs {
        let file_type = job.file_type()?;
        fields.insert(format!("{file_type}_id"), Value::from(job.id));
        fields.insert(
            format!("{file_type}_key"),
            Value::from(job.filename.clone().unwrap_or_default()),
        );
    }
    Ok(fields)
}
