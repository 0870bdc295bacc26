//! # mosaic-core
//!
//! Foundational types shared across all Mosaic crates:
//! - Entity structs mirroring the backend wire contract (users, posts, images)
//! - Request payloads with client-side validation
//! - Response envelope normalization (`{success, data}` or bare)
//! - The cross-cutting [`ApiError`] taxonomy

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod validate;

pub use errors::ApiError;
