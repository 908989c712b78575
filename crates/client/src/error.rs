use storygrid_core::error::CoreError;

/// Errors surfaced by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response envelope, or the raw body.
        message: String,
    },

    /// The intent is invalid against the current grid.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Refused locally before any request was sent.
    #[error("Rejected: {0}")]
    Rejected(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
