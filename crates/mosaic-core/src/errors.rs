//! Cross-cutting error taxonomy for the Mosaic client.
//!
//! Every failure a caller can observe from a resource client or the session
//! context is one of these variants. The split between `NetworkUnreachable`
//! (no response at all) and `Application` (response received, error status)
//! matters to callers: the former is retryable operator error, the latter is
//! a message to surface to the user.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response reached the server (connection refused, DNS, timeout).
    #[error("could not reach the backend: {0}")]
    NetworkUnreachable(String),

    /// The endpoint answered with a non-API document (HTML). Almost always a
    /// misconfigured base URL pointing at a web server instead of the API.
    #[error("endpoint returned a non-API document — check that the backend URL points at the API")]
    BackendUnreachable,

    /// The refresh exchange failed or no refresh token was available. Tokens
    /// have already been cleared when this is returned.
    #[error("session expired — sign in again")]
    SessionExpired,

    /// A 2xx body matched neither the `{success, data}` envelope nor the
    /// bare payload shape.
    #[error("unexpected response shape: {0}")]
    ResponseFormat(String),

    /// Client-side input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The server returned a structured error payload.
    #[error("request rejected (HTTP {status}): {message}")]
    Application { status: u16, message: String },

    /// Durable token storage failed (keyring and file tiers both).
    #[error("token store error: {0}")]
    TokenStore(String),
}

impl ApiError {
    /// Extract a human-readable message from a structured server error body.
    ///
    /// The backend reports validation failures as `{"message": [..]}` (array
    /// of strings) and other errors as `{"message": "..."}`. Anything else
    /// falls back to the raw body or the status line.
    #[must_use]
    pub fn application_from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| extract_message(&value))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            });
        Self::Application { status, message }
    }
}

fn extract_message(value: &serde_json::Value) -> Option<String> {
    let message = &value["message"];
    if let Some(text) = message.as_str() {
        return Some(text.to_string());
    }
    if let Some(parts) = message.as_array() {
        let joined: Vec<&str> = parts.iter().filter_map(|p| p.as_str()).collect();
        if !joined.is_empty() {
            return Some(joined.join(", "));
        }
    }
    value.as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_message_is_extracted() {
        let err = ApiError::application_from_body(409, r#"{"message":"email already in use"}"#);
        assert_eq!(
            err.to_string(),
            "request rejected (HTTP 409): email already in use"
        );
    }

    #[test]
    fn message_array_is_joined() {
        let err = ApiError::application_from_body(
            400,
            r#"{"statusCode":400,"message":["email must be an email","password too short"]}"#,
        );
        let ApiError::Application { status, message } = err else {
            panic!("expected Application");
        };
        assert_eq!(status, 400);
        assert_eq!(message, "email must be an email, password too short");
    }

    #[test]
    fn unstructured_body_falls_back_to_raw_text() {
        let err = ApiError::application_from_body(500, "something broke");
        let ApiError::Application { message, .. } = err else {
            panic!("expected Application");
        };
        assert_eq!(message, "something broke");
    }

    #[test]
    fn empty_body_falls_back_to_status_line() {
        let err = ApiError::application_from_body(503, "   ");
        let ApiError::Application { message, .. } = err else {
            panic!("expected Application");
        };
        assert_eq!(message, "HTTP 503");
    }
}
