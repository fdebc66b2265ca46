//! Reporting-period dates.
//!
//! Clients send and receive dates as `MM/DD/YYYY`. Internally they are
//! `chrono::NaiveDate`.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::Timestamp;

/// The only accepted textual date format.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a `MM/DD/YYYY` date. `field` names the request field in the error.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "{field} must be a date in MM/DD/YYYY format, got '{value}'"
        ))
    })
}

/// Parse an optional date field, passing `None` through.
pub fn parse_optional_date(
    field: &str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, CoreError> {
    value.map(|v| parse_date(field, v)).transpose()
}

/// Render a date as `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render the UTC calendar day of a timestamp as `MM/DD/YYYY`.
pub fn format_timestamp_date(ts: Timestamp) -> String {
    format_date(ts.date_naive())
}

/// Check that a reporting period is a valid interval.
///
/// Either bound may be missing; when both are present the start must not
/// fall after the end.
pub fn validate_reporting_period(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CoreError::Validation(format!(
                "Reporting period start date {} is after end date {}",
                format_date(start),
                format_date(end)
            )));
        }
    }
    Ok(())
}
