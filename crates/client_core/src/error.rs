//! Failure taxonomy for calls against the activity service.

use shared::error::ApiException;
use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    /// The request never produced a complete response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body was not the JSON shape the endpoint promises.
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Rejected(#[from] ApiException),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Decode,
    Rejected,
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidServerUrl { .. } | Self::Transport { .. } => FailureKind::Transport,
            Self::Decode { .. } => FailureKind::Decode,
            Self::Rejected(_) => FailureKind::Rejected,
        }
    }

    /// The server-side rejection, if this failure is one.
    pub fn rejection(&self) -> Option<&ApiException> {
        match self {
            Self::Rejected(exception) => Some(exception),
            _ => None,
        }
    }
}
