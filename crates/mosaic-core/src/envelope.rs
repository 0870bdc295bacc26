//! Response envelope normalization.
//!
//! The backend wraps most bodies as `{"success": true, "data": T}` but some
//! deployments return the bare `T`. Every decode goes through an explicit
//! two-step: peel the envelope if one is present, then decode the payload.
//! A body matching neither shape is a [`ApiError::ResponseFormat`] error,
//! never a silently-empty value.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::entities::{Post, PostsPage};
use crate::errors::ApiError;

/// Normalize an enveloped-or-bare body into `T`.
///
/// # Errors
///
/// `ApiError::ResponseFormat` if the envelope is malformed (`success: false`
/// on a 2xx body, or missing `data`) or the payload does not decode as `T`.
pub fn unwrap_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let payload = peel(value)?;
    serde_json::from_value(payload).map_err(|e| ApiError::ResponseFormat(e.to_string()))
}

/// Remove the `{success, data}` wrapper if one is present.
///
/// A body is treated as enveloped only when it is an object with a boolean
/// `success` field — tagged detection, not property probing on the payload.
fn peel(value: Value) -> Result<Value, ApiError> {
    match value {
        Value::Object(mut map) => {
            let Some(success) = map.get("success").and_then(Value::as_bool) else {
                return Ok(Value::Object(map));
            };
            if !success {
                return Err(ApiError::ResponseFormat(
                    "envelope reported success=false on a successful response".into(),
                ));
            }
            map.remove("data").ok_or_else(|| {
                ApiError::ResponseFormat("envelope missing the data field".into())
            })
        }
        other => Ok(other),
    }
}

/// The two payload shapes the posts endpoint is known to produce.
#[derive(Deserialize)]
#[serde(untagged)]
enum PostsBody {
    Paged {
        posts: Vec<Post>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default)]
        limit: Option<u32>,
    },
    Bare(Vec<Post>),
}

/// Normalize a feed response into a [`PostsPage`].
///
/// Accepts `{posts, total, page, limit}` or a bare array, each optionally
/// enveloped. `requested_page`/`requested_limit` fill in pagination fields
/// the body omits.
///
/// # Errors
///
/// `ApiError::ResponseFormat` if the body matches neither shape.
pub fn decode_posts_page(
    value: Value,
    requested_page: u32,
    requested_limit: u32,
) -> Result<PostsPage, ApiError> {
    let payload = peel(value)?;
    let body: PostsBody = serde_json::from_value(payload)
        .map_err(|e| ApiError::ResponseFormat(format!("posts list: {e}")))?;

    Ok(match body {
        PostsBody::Paged {
            posts,
            total,
            page,
            limit,
        } => {
            let total = total.unwrap_or(posts.len() as u64);
            PostsPage {
                data: posts,
                total,
                page: page.unwrap_or(requested_page),
                limit: limit.unwrap_or(requested_limit),
            }
        }
        PostsBody::Bare(posts) => {
            let total = posts.len() as u64;
            PostsPage {
                data: posts,
                total,
                page: requested_page,
                limit: requested_limit,
            }
        }
    })
}
