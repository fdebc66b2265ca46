//! Submission entity model and DTOs.

use broker_core::status::SubmissionRecord;
use broker_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub user_id: DbId,
    pub agency_name: Option<String>,
    pub reporting_start_date: Option<NaiveDate>,
    pub reporting_end_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Submission {
    pub fn to_record(&self) -> SubmissionRecord {
        SubmissionRecord {
            id: self.id,
            agency_name: self.agency_name.clone(),
            reporting_start_date: self.reporting_start_date,
            reporting_end_date: self.reporting_end_date,
            created_at: self.created_at,
        }
    }
}

/// DTO for inserting a new submission.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub user_id: DbId,
    pub agency_name: Option<String>,
    pub reporting_start_date: Option<NaiveDate>,
    pub reporting_end_date: Option<NaiveDate>,
}

/// Reporting-period overrides applied when a submission is re-submitted.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateReportingPeriod {
    pub reporting_start_date: Option<NaiveDate>,
    pub reporting_end_date: Option<NaiveDate>,
}
