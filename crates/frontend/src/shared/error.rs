use thiserror::Error;

/// Failure of a call to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("failed to send request: {0}")]
    Transport(String),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn transport(e: impl std::fmt::Display) -> Self {
        Self::Transport(e.to_string())
    }

    pub fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }
}
