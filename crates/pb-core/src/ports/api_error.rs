use thiserror::Error;

/// Failures reported by remote banking API adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request did not complete before the client deadline.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or other transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status the adapter does not map.
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}
