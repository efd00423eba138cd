//! Authentication primitives.
//!
//! - [`session_token`] -- admin session-token (HS256 JWT) validation.
//! - [`app_proxy`] -- app proxy query-signature verification.

pub mod app_proxy;
pub mod session_token;
