//! Upload key and error report naming conventions.

use crate::lookups::FileType;
use crate::types::DbId;

/// Final path component of a client-supplied filename.
///
/// Clients running against local storage send full paths; only the
/// basename is kept for the generated key. Both `/` and `\` separate.
pub fn file_basename(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .find(|part| !part.is_empty())
        .unwrap_or(filename)
}

/// Storage key for a new upload.
///
/// Convention: `{user_id}/{unix_seconds}_{file_type}_{basename}`. The
/// timestamp separates repeated uploads; the file type separates files of one
/// request that share a basename.
///
/// ```
/// use broker_core::lookups::FileType;
/// use broker_core::naming::upload_key;
///
/// assert_eq!(
///     upload_key(7, 1_460_000_000, FileType::Award, "test1.csv"),
///     "7/1460000000_award_test1.csv"
/// );
/// assert_eq!(
///     upload_key(7, 1_460_000_000, FileType::Appropriations, "/tmp/files/test1.csv"),
///     "7/1460000000_appropriations_test1.csv"
/// );
/// ```
pub fn upload_key(user_id: DbId, unix_seconds: i64, file_type: FileType, filename: &str) -> String {
    format!(
        "{user_id}/{unix_seconds}_{}_{}",
        file_type.as_str(),
        file_basename(filename)
    )
}

/// Name of the validation error report for one file type of a submission.
///
/// ```
/// use broker_core::lookups::FileType;
/// use broker_core::naming::error_report_name;
///
/// assert_eq!(
///     error_report_name(12, FileType::AwardFinancial),
///     "submission_12_award_financial_error_report.csv"
/// );
/// ```
pub fn error_report_name(submission_id: DbId, file_type: FileType) -> String {
    format!("submission_{submission_id}_{}_error_report.csv", file_type.as_str())
}
