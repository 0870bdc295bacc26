use serde::Deserialize;

use mosaic_core::entities::{
    Ack, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};
use mosaic_core::envelope::unwrap_envelope;
use mosaic_core::{validate, ApiError};

use crate::endpoints;
use crate::http::{ApiClient, RequestSpec};

/// Client for the `/auth/*` endpoints.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. Does not touch the token store — storing the
    /// returned pair is the session's job.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` before any network call for blank input;
    /// otherwise any transport/application error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        validate::login_input(email, password)?;
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let value = self
            .client
            .send(RequestSpec::post_json(endpoints::AUTH_LOGIN, &request)?)
            .await?;
        unwrap_envelope(value)
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for input failing the registration rules;
    /// otherwise any transport/application error.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<AuthResponse, ApiError> {
        validate::register_input(email, password, nickname)?;
        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            nickname: nickname.trim().to_string(),
        };
        let value = self
            .client
            .send(RequestSpec::post_json(endpoints::AUTH_REGISTER, &request)?)
            .await?;
        unwrap_envelope(value)
    }

    /// `POST /auth/refresh`: mint a new access token from a refresh token.
    ///
    /// Rarely called directly — the client's refresh protocol performs this
    /// exchange itself on 401. Exposed for completeness of the REST surface.
    ///
    /// # Errors
    ///
    /// Any transport/application error; `ResponseFormat` if the body carries
    /// no access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Minted {
            access_token: String,
        }

        let request = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let value = self
            .client
            .send(RequestSpec::post_json(endpoints::AUTH_REFRESH, &request)?)
            .await?;
        let minted: Minted = unwrap_envelope(value)?;
        Ok(minted.access_token)
    }

    /// `POST /auth/logout`: invalidate a refresh token server-side.
    ///
    /// # Errors
    ///
    /// Any transport/application error. Callers that must always succeed
    /// locally (the session) swallow this.
    pub async fn logout(&self, refresh_token: &str) -> Result<Ack, ApiError> {
        let request = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let value = self
            .client
            .send(RequestSpec::post_json(endpoints::AUTH_LOGOUT, &request)?)
            .await?;
        super::ack_from(value)
    }
}
