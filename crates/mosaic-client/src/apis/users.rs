use mosaic_core::entities::{UpdateProfileRequest, User};
use mosaic_core::envelope::unwrap_envelope;
use mosaic_core::ApiError;

use crate::endpoints;
use crate::http::{ApiClient, RequestSpec};

/// Client for the `/users/*` endpoints.
#[derive(Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /users/profile` — the authenticated user's own record.
    ///
    /// # Errors
    ///
    /// Any transport/application error; `SessionExpired` if the tokens are
    /// stale and the refresh exchange fails.
    pub async fn profile(&self) -> Result<User, ApiError> {
        let value = self
            .client
            .send(RequestSpec::get(endpoints::USERS_PROFILE))
            .await?;
        unwrap_envelope(value)
    }

    /// `PATCH /users/profile` — partial update, `None` fields untouched.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` for an out-of-range nickname; otherwise any
    /// transport/application error.
    pub async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<User, ApiError> {
        if let Some(nickname) = &update.nickname {
            let len = nickname.trim().chars().count();
            if !(2..=50).contains(&len) {
                return Err(ApiError::Validation(
                    "nickname must be between 2 and 50 characters".into(),
                ));
            }
        }
        let value = self
            .client
            .send(RequestSpec::patch_json(endpoints::USERS_PROFILE, update)?)
            .await?;
        unwrap_envelope(value)
    }

    /// `GET /users/:id`.
    ///
    /// # Errors
    ///
    /// Any transport/application error.
    pub async fn user_by_id(&self, id: u64) -> Result<User, ApiError> {
        let value = self
            .client
            .send(RequestSpec::get(endpoints::user_by_id(id)))
            .await?;
        unwrap_envelope(value)
    }
}
