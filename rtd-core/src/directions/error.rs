use thiserror::Error;

/// Errors from [`crate::directions::DirectionsProvider::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The service answered with a non-success status such as
    /// `ZERO_RESULTS` or `OVER_QUERY_LIMIT`.
    #[error("directions service returned {code}: {message}")]
    Status {
        /// Status code reported by the service.
        code: String,
        /// Optional detail supplied with the status.
        message: String,
    },
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded the client timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The request itself was unusable, e.g. an out-of-range coordinate.
    #[error("invalid directions request: {message}")]
    InvalidRequest {
        /// Why the request was rejected.
        message: String,
    },
}
