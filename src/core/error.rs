use thiserror::Error;

/// Crate-wide error type.
///
/// The four pipeline variants map onto the faults a caller must tell apart:
/// bad input before any network activity (`Validation`), an upstream that
/// answered badly or not at all (`Transport`), a request that outlived its
/// wall-clock budget (`Timeout`), and a response that could not be reduced
/// to a connection object (`Parse`).
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("invalid request: {0}")]
    Validation(String),

    /// Non-success HTTP response or network-level failure.
    /// `status` is 0 when no HTTP response was received at all.
    #[error("inference request failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("inference request exceeded {0}s timeout")]
    Timeout(u64),

    #[error("{message} (response excerpt: {excerpt})")]
    Parse { message: String, excerpt: String },

    #[error("renderer error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl VisionError {
    /// HTTP-equivalent status for API-boundary callers: client-input faults
    /// are 4xx, upstream faults 5xx.
    pub fn status_code(&self) -> u16 {
        match self {
            VisionError::Validation(_) => 400,
            VisionError::Transport { .. } => 502,
            VisionError::Timeout(_) => 504,
            VisionError::Parse { .. } => 502,
            VisionError::Render(_) => 500,
            VisionError::Io(_) => 500,
            VisionError::Serde(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
