//! Per-file-type error metrics.

use std::collections::BTreeMap;

use crate::lookups::{FileStatusKind, FileType, JobType};
use crate::status::{ErrorDetail, ErrorRecord, FileStatusRecord, JobRecord};

/// `field_name` used for the synthetic entry describing a file-level failure.
pub const FILE_LEVEL_FIELD: &str = "File Level Error";

/// The job whose results represent `file_type`: the newest non-superseded
/// record validation job.
pub fn current_validation_job(jobs: &[JobRecord], file_type: FileType) -> Option<&JobRecord> {
    jobs.iter()
        .filter(|job| {
            job.file_type == file_type
                && job.job_type == JobType::CsvRecordValidation
                && !job.superseded
        })
        .max_by_key(|job| job.id)
}

/// Build the `error_metrics` payload.
///
/// Keys are the file types that have at least one job in the submission;
/// a file type that was never submitted gets no key. A file status other
/// than `complete` contributes one leading file-level entry, followed by
/// one entry per error row.
pub fn error_metrics(
    jobs: &[JobRecord],
    file_statuses: &[FileStatusRecord],
    errors: &[ErrorRecord],
) -> BTreeMap<&'static str, Vec<ErrorDetail>> {
    let mut metrics = BTreeMap::new();

    for &file_type in FileType::ALL {
        if !jobs.iter().any(|job| job.file_type == file_type) {
            continue;
        }

        let mut details = Vec::new();
        if let Some(job) = current_validation_job(jobs, file_type) {
            let file_status = file_statuses.iter().find(|fs| fs.job_id == job.id);
            if let Some(fs) = file_status.filter(|fs| fs.status != FileStatusKind::Complete) {
                details.push(file_level_detail(fs.status));
            }
            details.extend(
                errors
                    .iter()
                    .filter(|e| e.job_id == job.id)
                    .map(ErrorDetail::from),
            );
        }

        metrics.insert(file_type.as_str(), details);
    }

    metrics
}

fn file_level_detail(status: FileStatusKind) -> ErrorDetail {
    ErrorDetail {
        field_name: FILE_LEVEL_FIELD.to_string(),
        error_name: status.as_str().to_string(),
        error_description: status.description().to_string(),
        occurrences: 1,
        rule_failed: String::new(),
    }
}
