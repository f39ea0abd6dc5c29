//! Federation error types.
//!
//! [`FederationError`] is the single error type returned by every fallible
//! operation in this crate.  Each variant stops the exchange at the step
//! where it occurred; nothing is retried.

use reqwest::StatusCode;

/// Boxed cause of a credential-resolution failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for the credential → console URL exchange.
#[derive(Debug, thiserror::Error)]
pub enum FederationError {
    /// Invalid configuration (e.g. unparseable endpoint URL or timeout).
    #[error("configuration error: {0}")]
    Config(String),

    /// The session payload could not be encoded as JSON.
    #[error("failed to encode federation session: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The federation endpoint could not be reached, or the response body
    /// could not be read.
    #[error("failed to reach federation endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The federation endpoint answered with a non-200 status.
    ///
    /// `message` is the raw response body, kept as opaque diagnostic text.
    #[error("federation endpoint rejected the request ({status}): {message}")]
    RemoteRejection {
        /// HTTP status returned by the endpoint.
        status: StatusCode,
        /// Raw response body.
        message: String,
    },

    /// Status 200, but the body was not JSON or had no `SigninToken`.
    #[error("malformed federation response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The upstream credential resolver failed.
    #[error("failed to resolve credentials: {0}")]
    UpstreamCredential(#[source] BoxError),
}
