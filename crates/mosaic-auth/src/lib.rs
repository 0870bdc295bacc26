//! # mosaic-auth
//!
//! Durable storage for the backend's access/refresh token pair.
//!
//! Tokens are opaque bearer strings; this crate never inspects them. The
//! store persists to the OS keychain (`keyring`) with a `0600` credentials
//! file fallback, plus a read-only environment-variable tier for CI.

pub mod error;
pub mod token_store;

pub use error::AuthError;
pub use token_store::TokenStore;
