//! Middleware and request extractors for the web interface.

pub mod auth;
pub mod security;

pub use auth::{session_cookie, session_removal_cookie, CurrentUser, SESSION_COOKIE};
pub use security::security_headers;
