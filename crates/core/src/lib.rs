//! Domain types and pure logic for the submission broker.
//!
//! Nothing in this crate touches the database or HTTP; the `db` crate
//! loads rows and the `api` crate renders results.

pub mod dates;
pub mod error;
pub mod lookups;
pub mod metrics;
pub mod naming;
pub mod reports;
pub mod roles;
pub mod status;
pub mod types;
