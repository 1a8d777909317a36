//! Errors raised at the backend gateway boundary.
//!
//! Everything above the gateway (repository, requirement) passes these
//! through untouched.  Only the view-model looks at them, and it only logs
//! the detail before turning them into a fixed user-facing message.

use thiserror::Error;

/// Result alias for gateway-facing operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Everything that can go wrong while calling a cloud function.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a Parse error body.
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Parse reported an error (`{"code": .., "error": ..}`).
    #[error("backend error {code}: {message}")]
    Backend { code: i64, message: String },

    /// The reply does not have the structure the caller expects.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// An entry could not be decoded and the policy is to reject the call.
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}
