//! Error types shared by the catalog client, the wish list and the controllers.

use thiserror::Error;

/// Errors surfaced by catalog and storage operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Request failed: {0}")]
    Http(#[from] wreq::Error),

    #[error("Request failed with status: {0}")]
    Status(u16),

    #[error("Product {0} not found")]
    NotFound(u64),

    #[error("Empty response from {0}")]
    EmptyResponse(String),

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Saved wish list is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to encode wish list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Coarse classification used by callers that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Endpoint unreachable or answered with a non-2xx status.
    Network,
    /// 2xx answer without the expected payload.
    EmptyResponse,
    /// Payload (remote or persisted) could not be decoded or encoded.
    Parse,
    /// Local persistence failed.
    Storage,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Http(_) | Error::Status(_) | Error::NotFound(_) => ErrorKind::Network,
            Error::EmptyResponse(_) => ErrorKind::EmptyResponse,
            Error::Decode { .. } | Error::Corrupt(_) | Error::Encode(_) => ErrorKind::Parse,
            Error::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
