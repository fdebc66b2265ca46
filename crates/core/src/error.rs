use crate::types::DbId;

/// Domain errors raised by submission and job operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input: unparseable dates, missing required fields, bad intervals.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller is neither the owner of the resource nor an admin.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The entity exists but is not in a state that allows the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
