use subtrack_endpoint::ApiError;
use subtrack_notify::ErrorDetail;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("No refresh token found")]
    MissingRefreshToken,
}

impl ErrorDetail for AuthError {
    fn detail(&self) -> Option<&str> {
        match self {
            AuthError::Api(err) => err.detail(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
