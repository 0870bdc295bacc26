//! Process-wide authentication state.
//!
//! [`Session`] is the client-held belief about the current user, derived
//! from the token store plus a profile fetch — never persisted itself. It is
//! created once at startup and injected wherever auth state is needed; all
//! mutation goes through its declared operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use mosaic_core::entities::{UpdateProfileRequest, UserInfo};
use mosaic_core::ApiError;

use crate::apis::{AuthApi, UsersApi};
use crate::http::ApiClient;

pub struct Session {
    client: ApiClient,
    auth: AuthApi,
    users: UsersApi,
    user: RwLock<Option<UserInfo>>,
    loading: AtomicBool,
}

impl Session {
    /// A fresh session: no user, `is_loading` true until [`Self::bootstrap`]
    /// completes.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: AuthApi::new(client.clone()),
            users: UsersApi::new(client.clone()),
            client,
            user: RwLock::new(None),
            loading: AtomicBool::new(true),
        }
    }

    /// Startup path: if both tokens are stored, try to restore the user from
    /// the profile endpoint.
    ///
    /// A failure here is the expected stale-session case — tokens are
    /// cleared silently and the session stays unauthenticated. Nothing is
    /// surfaced to the caller.
    pub async fn bootstrap(&self) {
        if self.client.tokens().has_both() {
            match self.users.profile().await {
                Ok(profile) => {
                    self.set_user(Some(profile.into()));
                }
                Err(error) => {
                    tracing::debug!(%error, "stored session is stale; clearing tokens");
                    self.client.tokens().clear_all();
                }
            }
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    /// Log in and establish the session.
    ///
    /// On success both tokens are stored and the user is set from the
    /// response payload. On failure prior state is left untouched and the
    /// error propagates for the caller to render.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`], including `Validation` before the network call.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo, ApiError> {
        let response = self.auth.login(email, password).await?;
        self.client
            .tokens()
            .set_pair(&response.access_token, &response.refresh_token)
            .map_err(|e| ApiError::TokenStore(e.to_string()))?;
        self.set_user(Some(response.user.clone()));
        Ok(response.user)
    }

    /// Register a new account and establish the session, same shape as
    /// [`Self::login`].
    ///
    /// # Errors
    ///
    /// Any [`ApiError`], including `Validation` before the network call.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
    ) -> Result<UserInfo, ApiError> {
        let response = self.auth.register(email, password, nickname).await?;
        self.client
            .tokens()
            .set_pair(&response.access_token, &response.refresh_token)
            .map_err(|e| ApiError::TokenStore(e.to_string()))?;
        self.set_user(Some(response.user.clone()));
        Ok(response.user)
    }

    /// Log out. The backend call is best-effort — logout always succeeds
    /// locally: tokens are cleared and the user nulled regardless.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.client.tokens().refresh_token() {
            if let Err(error) = self.auth.logout(&refresh_token).await {
                tracing::warn!(%error, "backend logout failed; clearing local session anyway");
            }
        }
        self.client.tokens().clear_all();
        self.set_user(None);
    }

    /// Re-fetch the profile into the session.
    ///
    /// Failure is logged, not surfaced: the previous user value stays —
    /// unless the session itself has expired, which nulls it.
    pub async fn refresh_user(&self) {
        match self.users.profile().await {
            Ok(profile) => self.set_user(Some(profile.into())),
            Err(ApiError::SessionExpired) => {
                tracing::warn!("session expired while refreshing the user");
                self.set_user(None);
            }
            Err(error) => {
                tracing::warn!(%error, "failed to refresh the user; keeping previous value");
            }
        }
    }

    /// Update the profile and reflect the result into the session user.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; the session user is untouched on failure.
    pub async fn update_profile(
        &self,
        update: &UpdateProfileRequest,
    ) -> Result<UserInfo, ApiError> {
        let updated = self.users.update_profile(update).await?;
        let info: UserInfo = updated.into();
        self.set_user(Some(info.clone()));
        Ok(info)
    }

    /// The current user, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<UserInfo> {
        self.user.read().map(|guard| guard.clone()).unwrap_or(None)
    }

    /// True while the user is set. Equivalent to `current_user().is_some()`.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.read().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// True until [`Self::bootstrap`] has completed.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn set_user(&self, user: Option<UserInfo>) {
        if let Ok(mut guard) = self.user.write() {
            *guard = user;
        }
    }
}
