//! # mosaic-client
//!
//! The Mosaic SDK: a single [`ApiClient`] carrying all outbound traffic
//! (bearer injection, envelope-aware decoding, 401 refresh-and-replay),
//! typed resource clients for the auth/users/posts/images endpoints, and the
//! [`Session`] context that holds the authenticated-user state.
//!
//! Construction is explicit — config and token store are injected, nothing
//! is ambient:
//!
//! ```no_run
//! use mosaic_auth::TokenStore;
//! use mosaic_client::{ApiClient, Session};
//! use mosaic_config::MosaicConfig;
//!
//! # async fn example() -> Result<(), mosaic_core::ApiError> {
//! let config = MosaicConfig::load_with_dotenv().expect("config");
//! let tokens = TokenStore::new(&config.auth.keyring_service, config.auth.credentials_dir.clone());
//! let client = ApiClient::new(&config, tokens);
//! let session = Session::new(client.clone());
//! session.bootstrap().await;
//! # Ok(())
//! # }
//! ```

pub mod apis;
pub mod endpoints;
mod http;
mod refresh;
pub mod session;

pub use apis::{AuthApi, ImagesApi, PostsApi, UsersApi};
pub use http::ApiClient;
pub use session::Session;
