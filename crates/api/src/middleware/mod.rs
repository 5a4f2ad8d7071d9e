//! Request extractors for authentication.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//!   Use `Option<AuthUser>` on endpoints that serve anonymous callers too.

pub mod auth;
