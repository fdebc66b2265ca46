//! Error data entity model and DTOs.

use broker_core::error::CoreError;
use broker_core::lookups::ErrorType;
use broker_core::status::ErrorRecord;
use broker_core::types::{DbId, LookupId, Timestamp};
use sqlx::FromRow;

use super::resolve_lookup;

/// A row from the `error_data` table.
#[derive(Debug, Clone, FromRow)]
pub struct ErrorData {
    pub id: DbId,
    pub job_id: DbId,
    pub filename: String,
    pub field_name: String,
    pub error_type_id: LookupId,
    pub occurrences: i64,
    pub first_row: Option<i64>,
    pub rule_failed: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ErrorData {
    pub fn to_record(&self) -> Result<ErrorRecord, CoreError> {
        Ok(ErrorRecord {
            job_id: self.job_id,
            field_name: self.field_name.clone(),
            error_type: resolve_lookup("error_types", self.error_type_id, ErrorType::from_id)?,
            occurrences: self.occurrences,
            rule_failed: self.rule_failed.clone(),
        })
    }
}

/// DTO for inserting an error data row.
#[derive(Debug, Clone)]
pub struct CreateErrorData {
    pub job_id: DbId,
    pub filename: String,
    pub field_name: String,
    pub error_type: ErrorType,
    pub occurrences: i64,
    pub first_row: Option<i64>,
    pub rule_failed: Option<String>,
}
