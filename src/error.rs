use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    UnexpectedShape(String),

    #[error("invalid chapter: {0}")]
    Validation(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ConsoleError {
    /// Maps a reqwest failure, keeping timeouts distinct from other transport errors.
    pub fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ConsoleError::Timeout(timeout_ms)
        } else {
            ConsoleError::Transport(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ConsoleError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
