//! Submission status aggregation.
//!
//! Builds the `check_status` response from pre-loaded job, file status and
//! error rows. The `core` crate has no database dependency; repositories
//! load the rows and convert them into the record types below.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::dates::{format_date, format_timestamp_date};
use crate::lookups::{ErrorType, FileStatusKind, FileType, JobStatus, JobType};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Submission metadata needed for the status response.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub id: DbId,
    pub agency_name: Option<String>,
    pub reporting_start_date: Option<NaiveDate>,
    pub reporting_end_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

/// One job of a submission.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: DbId,
    pub file_type: FileType,
    pub job_type: JobType,
    pub status: JobStatus,
    pub original_filename: Option<String>,
    pub file_size: Option<i64>,
    pub number_of_rows: Option<i64>,
    pub superseded: bool,
}

/// Header validation outcome for a job.
#[derive(Debug, Clone)]
pub struct FileStatusRecord {
    pub job_id: DbId,
    pub status: FileStatusKind,
    pub missing_headers: Vec<String>,
    pub duplicated_headers: Vec<String>,
}

/// A row-level validation failure for a job.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub job_id: DbId,
    pub field_name: String,
    pub error_type: ErrorType,
    pub occurrences: i64,
    pub rule_failed: Option<String>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// A validation failure as rendered to clients.
///
/// `occurrences` is numeric here and only becomes a string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub field_name: String,
    pub error_name: String,
    pub error_description: String,
    #[serde(serialize_with = "serialize_as_string")]
    pub occurrences: i64,
    pub rule_failed: String,
}

impl From<&ErrorRecord> for ErrorDetail {
    fn from(record: &ErrorRecord) -> Self {
        Self {
            field_name: record.field_name.clone(),
            error_name: record.error_type.as_str().to_string(),
            error_description: record.error_type.description().to_string(),
            occurrences: record.occurrences,
            rule_failed: record.rule_failed.clone().unwrap_or_default(),
        }
    }
}

/// Job-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobErrorType {
    RowErrors,
    None,
}

/// One entry of the `jobs` list in the status response.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub job_id: DbId,
    pub job_status: JobStatus,
    pub job_type: JobType,
    pub file_type: FileType,
    pub filename: Option<String>,
    #[serde(serialize_with = "serialize_file_status")]
    pub file_status: Option<FileStatusKind>,
    pub missing_headers: Vec<String>,
    pub duplicated_headers: Vec<String>,
    pub file_size: Option<i64>,
    pub number_of_rows: Option<i64>,
    pub error_type: JobErrorType,
    pub error_data: Vec<ErrorDetail>,
    pub superseded: bool,
}

/// Full `check_status` payload.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStatus {
    pub submission_id: DbId,
    pub agency_name: Option<String>,
    pub reporting_period_start_date: Option<String>,
    pub reporting_period_end_date: Option<String>,
    pub created_on: String,
    pub number_of_errors: i64,
    pub number_of_rows: i64,
    pub jobs: Vec<JobSummary>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Join a submission's jobs with their file status and error rows.
///
/// Jobs are reported in the order given. File status and error rows whose
/// `job_id` is not among `jobs` are ignored and do not count toward the
/// totals.
pub fn summarize_submission(
    submission: &SubmissionRecord,
    jobs: &[JobRecord],
    file_statuses: &[FileStatusRecord],
    errors: &[ErrorRecord],
) -> SubmissionStatus {
    let summaries: Vec<JobSummary> = jobs
        .iter()
        .map(|job| summarize_job(job, file_statuses, errors))
        .collect();

    let number_of_errors = summaries
        .iter()
        .flat_map(|job| job.error_data.iter())
        .map(|detail| detail.occurrences)
        .sum();

    let number_of_rows = jobs.iter().filter_map(|job| job.number_of_rows).sum();

    SubmissionStatus {
        submission_id: submission.id,
        agency_name: submission.agency_name.clone(),
        reporting_period_start_date: submission.reporting_start_date.map(format_date),
        reporting_period_end_date: submission.reporting_end_date.map(format_date),
        created_on: format_timestamp_date(submission.created_at),
        number_of_errors,
        number_of_rows,
        jobs: summaries,
    }
}

fn summarize_job(
    job: &JobRecord,
    file_statuses: &[FileStatusRecord],
    errors: &[ErrorRecord],
) -> JobSummary {
    let file_status = file_statuses.iter().find(|fs| fs.job_id == job.id);

    let error_data: Vec<ErrorDetail> = errors
        .iter()
        .filter(|e| e.job_id == job.id)
        .map(ErrorDetail::from)
        .collect();

    let error_type = if error_data.is_empty() {
        JobErrorType::None
    } else {
        JobErrorType::RowErrors
    };

    JobSummary {
        job_id: job.id,
        job_status: job.status,
        job_type: job.job_type,
        file_type: job.file_type,
        filename: job.original_filename.clone(),
        file_status: file_status.map(|fs| fs.status),
        missing_headers: file_status
            .map(|fs| fs.missing_headers.clone())
            .unwrap_or_default(),
        duplicated_headers: file_status
            .map(|fs| fs.duplicated_headers.clone())
            .unwrap_or_default(),
        file_size: job.file_size,
        number_of_rows: job.number_of_rows,
        error_type,
        error_data,
        superseded: job.superseded,
    }
}

fn serialize_as_string<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn serialize_file_status<S: Serializer>(
    value: &Option<FileStatusKind>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.map(FileStatusKind::as_str).unwrap_or(""))
}
