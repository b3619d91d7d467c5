use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("login token not found on the page")]
    TokenNotFound,
    #[error("authentication failed. Server message: {0}")]
    Rejected(String),
}
