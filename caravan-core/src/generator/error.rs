use thiserror::Error;

/// Errors from [`crate::generator::ActivityGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The prompt was empty.
    #[error("prompt must not be empty")]
    EmptyPrompt,
    /// The service could not be reached.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Endpoint that was called.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was called.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("generation service returned status {status}: {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Body or reason phrase returned by the service.
        message: String,
    },
    /// The service answered but the payload could not be decoded.
    #[error("malformed generation response: {message}")]
    MalformedResponse {
        /// Decoding error description.
        message: String,
    },
}
