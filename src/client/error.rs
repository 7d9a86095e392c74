use thiserror::Error;

/// Boxed error from the underlying body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while sending a request or reading its response.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to marshal request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("failed to send request: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to read response: {0}")]
    Read(#[source] BoxError),

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("server error: {0}")]
    Server(String),

    #[error("response ended before generation was done")]
    Incomplete,
}
