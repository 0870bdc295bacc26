//! The 401 refresh-and-replay protocol.
//!
//! Entered exactly once per logical request (the caller reaching this module
//! is itself the "already replayed" marker — a 401 on the replay falls
//! through to a plain application error instead of re-entering). The
//! exchange with `/auth/refresh` is a plain, non-intercepted call so its own
//! 401 cannot recurse.
//!
//! Concurrent 401s coalesce: the exchange runs under the client's refresh
//! gate, and a task that acquires the gate after another task already
//! rotated the access token skips straight to the replay.

use serde::Deserialize;
use serde_json::Value;

use mosaic_core::entities::RefreshTokenRequest;
use mosaic_core::envelope::unwrap_envelope;
use mosaic_core::ApiError;

use crate::endpoints;
use crate::http::{finish, read_body, ApiClient, RequestSpec};

/// Body of a successful refresh exchange, enveloped or bare.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintedToken {
    access_token: String,
}

impl ApiClient {
    /// Run the refresh exchange (or adopt a concurrent one) and replay the
    /// original request once.
    pub(crate) async fn refresh_and_replay(
        &self,
        spec: RequestSpec,
        sent_with: Option<String>,
    ) -> Result<Value, ApiError> {
        let _guard = self.refresh_gate().lock().await;

        // If the stored access token no longer matches the one this request
        // was sent with, another task completed the exchange while we waited
        // on the gate. Replay with that token instead of refreshing again.
        let current = self.tokens().access_token();
        let replay_token = if current.is_some() && current != sent_with {
            tracing::debug!("adopting access token refreshed by a concurrent request");
            current
        } else {
            Some(self.exchange_refresh_token().await?)
        };

        tracing::debug!(path = %spec.path, "replaying request after token refresh");
        let response = self.dispatch(&spec, replay_token.as_deref()).await?;
        let (status, body) = read_body(response).await?;
        // A second 401 propagates as an application error — the replay
        // budget for this request is spent.
        finish(status, &body)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On any failure (missing refresh token, network error, non-2xx,
    /// malformed body) the store is cleared and the session is over: the
    /// caller gets `SessionExpired`, never a stale success.
    async fn exchange_refresh_token(&self) -> Result<String, ApiError> {
        let Some(refresh_token) = self.tokens().refresh_token() else {
            tracing::warn!("401 received but no refresh token is stored; clearing session");
            self.tokens().clear_all();
            return Err(ApiError::SessionExpired);
        };

        match self.plain_refresh_call(&refresh_token).await {
            Ok(access) => {
                // Only the access token is replaced; the refresh token that
                // minted it stays valid.
                self.tokens()
                    .set_access_token(&access)
                    .map_err(|e| ApiError::TokenStore(e.to_string()))?;
                tracing::debug!("access token refreshed");
                Ok(access)
            }
            Err(error) => {
                tracing::warn!(%error, "refresh exchange failed; clearing session");
                self.tokens().clear_all();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// The raw `POST /auth/refresh` call. Deliberately not routed through
    /// `send()` so it can never trigger another refresh.
    async fn plain_refresh_call(&self, refresh_token: &str) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url(), endpoints::AUTH_REFRESH);
        let request = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .dispatch(
                &RequestSpec::post_json(endpoints::AUTH_REFRESH, &request)?,
                None,
            )
            .await;
        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(%url, "refresh exchange transport failure");
                return Err(e);
            }
        };

        let (status, body) = read_body(response).await?;
        let value = finish(status, &body)?;
        let minted: MintedToken = unwrap_envelope(value)?;
        if minted.access_token.is_empty() {
            return Err(ApiError::ResponseFormat(
                "refresh response carried an empty access token".into(),
            ));
        }
        Ok(minted.access_token)
    }
}
