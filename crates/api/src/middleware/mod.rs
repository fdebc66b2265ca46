//! Request interceptors and the principal they produce.
//!
//! - [`auth::require_login`] -- Permission gate layered over every `/v1` route.
//! - [`auth::AuthUser`] -- Extracts the authenticated principal in handlers.

pub mod auth;
