//! Error types for the session layer.

/// Errors from obtaining or refreshing credentials.
///
/// Every variant means the same thing to the executor: the client has no
/// usable credentials for this call. It is surfaced to the caller as an
/// `Unauthorized` failure and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The authentication endpoint rejected the client's identity
    /// (revoked certificate, unknown service account, ...).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The authentication endpoint could not be reached.
    #[error("authentication endpoint unreachable: {0}")]
    Unreachable(String),

    /// The endpoint answered 2xx but without a usable token.
    #[error("invalid authentication response: {0}")]
    InvalidResponse(String),
}
