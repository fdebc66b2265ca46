//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-row writes run inside a
//! single transaction.

pub mod error_data_repo;
pub mod file_status_repo;
pub mod job_repo;
pub mod submission_repo;

pub use error_data_repo::ErrorDataRepo;
pub use file_status_repo::FileStatusRepo;
pub use job_repo::JobRepo;
pub use submission_repo::SubmissionRepo;
