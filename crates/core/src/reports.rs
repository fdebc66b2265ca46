//! Error report descriptors.

use serde::Serialize;

use crate::lookups::FileType;
use crate::naming::error_report_name;
use crate::status::JobRecord;
use crate::types::DbId;

/// A downloadable validation report for one file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub report_name: String,
    /// Where the client fetches the report; resolved by the storage backend.
    pub location: String,
}

/// Distinct file types among `jobs`, in file type order.
pub fn reported_file_types(jobs: &[JobRecord]) -> Vec<FileType> {
    let mut file_types: Vec<FileType> = jobs.iter().map(|job| job.file_type).collect();
    file_types.sort();
    file_types.dedup();
    file_types
}

/// Pair each reported file type with its report name.
pub fn report_names(submission_id: DbId, jobs: &[JobRecord]) -> Vec<(FileType, String)> {
    reported_file_types(jobs)
        .into_iter()
        .map(|file_type| (file_type, error_report_name(submission_id, file_type)))
        .collect()
}
