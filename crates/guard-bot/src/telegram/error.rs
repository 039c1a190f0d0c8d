//! Chat platform errors

use guard_common::AppError;

/// Errors from Bot API calls
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Transport failure or a body that could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered `ok: false`
    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    /// The API answered `ok: true` without a usable result
    #[error("Unexpected Bot API response: {0}")]
    Decode(String),
}

impl PlatformError {
    /// Whether the API rejected the call because of flood control
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { code: 429, .. })
    }
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        AppError::platform(err)
    }
}

/// Result type alias for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;
