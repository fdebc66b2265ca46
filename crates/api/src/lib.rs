//! Submission broker API server library.
//!
//! Exposes config, state, error handling, the permission gate, storage
//! backends and routes so integration tests and the binary entrypoint can
//! both build the same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
