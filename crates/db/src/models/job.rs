//! Job entity model and DTOs.

use broker_core::error::CoreError;
use broker_core::lookups::{FileType, JobStatus, JobType};
use broker_core::status::JobRecord;
use broker_core::types::{DbId, LookupId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::resolve_lookup;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub submission_id: DbId,
    pub file_type_id: LookupId,
    pub job_type_id: LookupId,
    pub status_id: LookupId,
    /// Filename as supplied by the client.
    pub original_filename: Option<String>,
    /// Storage key the client uploads to.
    pub filename: Option<String>,
    pub file_size: Option<i64>,
    pub number_of_rows: Option<i64>,
    pub superseded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Job {
    pub fn file_type(&self) -> Result<FileType, CoreError> {
        resolve_lookup("file_types", self.file_type_id, FileType::from_id)
    }

    pub fn job_type(&self) -> Result<JobType, CoreError> {
        resolve_lookup("job_types", self.job_type_id, JobType::from_id)
    }

    pub fn status(&self) -> Result<JobStatus, CoreError> {
        resolve_lookup("job_statuses", self.status_id, JobStatus::from_id)
    }

    pub fn to_record(&self) -> Result<JobRecord, CoreError> {
        Ok(JobRecord {
            id: self.id,
            file_type: self.file_type()?,
            job_type: self.job_type()?,
            status: self.status()?,
            original_filename: self.original_filename.clone(),
            file_size: self.file_size,
            number_of_rows: self.number_of_rows,
            superseded: self.superseded_at.is_some(),
        })
    }
}

/// DTO for inserting a job.
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub submission_id: DbId,
    pub file_type: FileType,
    pub job_type: JobType,
    pub status: JobStatus,
    pub original_filename: Option<String>,
    pub filename: Option<String>,
    pub file_size: Option<i64>,
    pub number_of_rows: Option<i64>,
}

/// One file of a `submit_files` request, ready to become a job.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub file_type: FileType,
    pub original_filename: String,
    pub upload_key: String,
}
