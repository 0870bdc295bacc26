//! Typed resource clients — one method per REST operation.
//!
//! These are thin: parameter defaulting, client-side validation, envelope
//! unwrapping. No business logic.

mod auth;
mod images;
mod posts;
mod users;

pub use auth::AuthApi;
pub use images::ImagesApi;
pub use posts::PostsApi;
pub use users::UsersApi;

use mosaic_core::entities::Ack;
use mosaic_core::envelope::unwrap_envelope;
use mosaic_core::ApiError;

/// Decode an acknowledgement body, tolerating the empty body some
/// deployments return for logout/delete.
fn ack_from(value: serde_json::Value) -> Result<Ack, ApiError> {
    if value.is_null() {
        return Ok(Ack {
            message: String::new(),
        });
    }
    unwrap_envelope(value)
}
