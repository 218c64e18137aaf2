use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("not signed in (no session token)")]
    MissingToken,

    #[error("invalid request: {0}")]
    Invalid(String),
}

impl ApiError {
    /// Local rejections never reached the network; everything else did (or
    /// tried to).
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ApiError::Invalid(_) | ApiError::MissingToken | ApiError::InvalidBaseUrl(_)
        )
    }
}
