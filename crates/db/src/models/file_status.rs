//! File status entity model and DTOs.

use broker_core::error::CoreError;
use broker_core::lookups::FileStatusKind;
use broker_core::status::FileStatusRecord;
use broker_core::types::{DbId, LookupId, Timestamp};
use sqlx::FromRow;

use super::resolve_lookup;

/// A row from the `file_status` table.
#[derive(Debug, Clone, FromRow)]
pub struct FileStatus {
    pub id: DbId,
    pub job_id: DbId,
    pub filename: String,
    pub status_id: LookupId,
    pub missing_headers: Vec<String>,
    pub duplicated_headers: Vec<String>,
    pub row_errors_present: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FileStatus {
    pub fn to_record(&self) -> Result<FileStatusRecord, CoreError> {
        Ok(FileStatusRecord {
            job_id: self.job_id,
            status: resolve_lookup("file_statuses", self.status_id, FileStatusKind::from_id)?,
            missing_headers: self.missing_headers.clone(),
            duplicated_headers: self.duplicated_headers.clone(),
        })
    }
}

/// DTO for inserting a file status row.
#[derive(Debug, Clone)]
pub struct CreateFileStatus {
    pub job_id: DbId,
    pub filename: String,
    pub status: FileStatusKind,
    pub missing_headers: Vec<String>,
    pub duplicated_headers: Vec<String>,
    pub row_errors_present: bool,
}
