//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - A conversion into the matching `broker_core::status` record

pub mod error_data;
pub mod file_status;
pub mod job;
pub mod submission;

use broker_core::error::CoreError;
use broker_core::types::LookupId;

/// Resolve a lookup id read from the database into its enum.
///
/// An unknown id means the seed data and `broker_core::lookups` disagree,
/// which is an internal error rather than bad input.
pub(crate) fn resolve_lookup<T>(
    table: &str,
    id: LookupId,
    from_id: fn(LookupId) -> Option<T>,
) -> Result<T, CoreError> {
    from_id(id).ok_or_else(|| CoreError::Internal(format!("Unknown {table} id {id}")))
}
