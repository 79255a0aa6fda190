use std::fmt;

/// Errors a [`Transport`](crate::Transport) can return for one request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The pod answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request or its answer was lost on the way (DNS, refused,
    /// reset, truncated body, TLS).
    #[error("network failure: {0}")]
    Network(String),

    /// The transport's own deadline elapsed.
    #[error("request timed out")]
    Timeout,

    /// The request could not be built (bad URL, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Shorthand for a status error, mostly used by fake transports.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Classifies this error into the stable [`FailureKind`] taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Status { status, .. } => FailureKind::from_status(*status),
            Self::Network(_) | Self::Timeout => FailureKind::Transient,
            Self::InvalidRequest(_) => FailureKind::Malformed,
        }
    }
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Every failure a caller can see falls into exactly one of these.
///
/// Only [`Unauthorized`](Self::Unauthorized) is recovered automatically
/// (refresh the credentials, retry once). Everything else is the caller's
/// to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The credentials were rejected (401/403).
    Unauthorized,
    /// The target does not exist (404).
    NotFound,
    /// The request conflicts with the current state (409).
    Conflict,
    /// Network trouble or a 5xx. May succeed if tried later.
    Transient,
    /// Bad arguments or a response of the wrong shape (other 4xx).
    Malformed,
    /// Anything else, e.g. an unexpected 3xx.
    Unknown,
}

impl FailureKind {
    /// Maps an HTTP status code onto the taxonomy.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::Transient,
            400..=499 => Self::Malformed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::Transient => "Transient",
            Self::Malformed => "Malformed",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
