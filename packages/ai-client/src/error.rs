use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed provider output: {0}")]
    Malformed(String),
}

impl AiError {
    /// Authentication/authorization rejections cannot succeed on retry with
    /// the same credentials, so callers fail fast instead of falling back.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AiError::Provider { status: 401 | 403, .. })
    }
}
