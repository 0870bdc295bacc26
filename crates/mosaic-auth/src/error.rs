use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token store error: {0}")]
    TokenStore(String),
}
