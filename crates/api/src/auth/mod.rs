//! Session token verification.
//!
//! Sessions are issued by the external login service; this crate only
//! validates them.

pub mod session;
