use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `jobsuite auth login`")]
    MissingToken,

    #[error("token expired — run `jobsuite auth login` to refresh")]
    TokenExpired,

    #[error("malformed token: {0}")]
    InvalidToken(String),

    #[error("token store error: {0}")]
    TokenStore(String),

    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
