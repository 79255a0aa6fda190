//! Unified error type for the Parley client.

use parley_model::ModelError;
use parley_protocol::ProtocolError;
use parley_session::SessionError;
use parley_transport::{FailureKind, TransportError};

use crate::Operation;

/// Top-level error that wraps all crate-specific errors.
///
/// Errors produced by a call carry the [`Operation`] that failed, so a
/// caller juggling several requests can tell which one broke. Use
/// [`kind()`](Self::kind) to branch on the failure class:
///
/// ```rust,ignore
/// match client.rooms().room_info(&id).await {
///     Err(e) if e.kind() == FailureKind::NotFound => create_it().await,
///     other => other,
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ParleyError {
    /// The pod answered with an error, or could not be reached. After the
    /// executor's recovery (one refresh, optional transient retries) ran
    /// out.
    #[error("{operation} failed: {source}")]
    Api {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    /// The call's credentials were rejected and obtaining new ones failed.
    #[error("{operation} failed: could not refresh credentials: {source}")]
    Refresh {
        operation: Operation,
        #[source]
        source: SessionError,
    },

    /// The pod's answer could not be decoded (or the request body could not
    /// be encoded).
    #[error("{operation} failed: {source}")]
    Protocol {
        operation: Operation,
        #[source]
        source: ProtocolError,
    },

    /// The pod's answer decoded but lacks something the entity requires.
    #[error("{operation} failed: {source}")]
    Model {
        operation: Operation,
        #[source]
        source: ModelError,
    },

    /// The arguments were rejected before anything was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The initial authentication failed; no client was built.
    #[error(transparent)]
    Connect(#[from] SessionError),

    /// The transport could not be set up (bad pod URL, TLS init).
    #[error("transport setup failed: {0}")]
    Setup(#[source] TransportError),
}

impl ParleyError {
    /// The failure class, as defined by [`FailureKind`].
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Api { source, .. } => source.kind(),
            Self::Refresh { .. } | Self::Connect(_) => FailureKind::Unauthorized,
            Self::Protocol { .. }
            | Self::Model { .. }
            | Self::InvalidArgument(_)
            | Self::Setup(_) => FailureKind::Malformed,
        }
    }

    /// The operation that failed, if the error came from a call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Api { operation, .. }
            | Self::Refresh { operation, .. }
            | Self::Protocol { operation, .. }
            | Self::Model { operation, .. } => Some(*operation),
            Self::InvalidArgument(_) | Self::Connect(_) | Self::Setup(_) => None,
        }
    }

    // The constructors below log as they build, so failures that never
    // reach the executor still leave a trace under the call's span.

    pub(crate) fn model(operation: Operation) -> impl FnOnce(ModelError) -> Self {
        move |source| {
            tracing::warn!(%operation, kind = %FailureKind::Malformed, error = %source, "pod answer incomplete");
            Self::Model { operation, source }
        }
    }

    pub(crate) fn protocol(operation: Operation) -> impl FnOnce(ProtocolError) -> Self {
        move |source| {
            tracing::warn!(%operation, kind = %FailureKind::Malformed, error = %source, "codec failure");
            Self::Protocol { operation, source }
        }
    }

    pub(crate) fn invalid_argument(operation: Operation, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(%operation, %reason, "arguments rejected before dispatch");
        Self::InvalidArgument(reason)
    }
}
