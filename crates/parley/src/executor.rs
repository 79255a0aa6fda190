//! The authenticated execution strategy.
//!
//! Every façade call goes through [`Executor::execute`]. It binds the call
//! to the current credentials, runs it, and decides what to do with a
//! failure:
//!
//! ```text
//!              ┌──────────── success ───────────────→ Ok(value)
//!              │
//! current() → call ── Unauthorized (first time) → refresh_stale() → call again
//!              │
//!              ├── Transient, retries left ──→ backoff → call again
//!              │
//!              └── anything else ───────────────────→ Err(Api { operation, .. })
//! ```
//!
//! The refresh happens at most once per `execute`, so a pod that rejects
//! every credential costs two calls and one exchange, never a loop.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parley_protocol::Credentials;
use parley_retry::{Backoff, RetryPolicy};
use parley_session::{Authenticator, CredentialStore};
use parley_transport::{FailureKind, TransportError};
use tracing::{Instrument, Span};

use crate::{Operation, ParleyError};

/// Which try of a call is running. Recorded on every log line the
/// executor emits for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// First dispatch with the credentials read from the store.
    Initial,
    /// The one re-dispatch after the credentials were refreshed.
    AfterRefresh,
    /// Re-dispatch number `n` after a transient failure.
    Transient(u32),
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::AfterRefresh => f.write_str("after-refresh"),
            Self::Transient(n) => write!(f, "transient-retry-{n}"),
        }
    }
}

/// Runs remote operations with credential binding and recovery.
///
/// Stateless between calls: two `execute`s only interact through the
/// shared [`CredentialStore`]. Cloning is cheap.
pub struct Executor<A: Authenticator> {
    store: Arc<CredentialStore<A>>,
    retry: RetryPolicy,
    span: Span,
}

impl<A: Authenticator> Clone for Executor<A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            retry: self.retry.clone(),
            span: self.span.clone(),
        }
    }
}

impl<A: Authenticator> Executor<A> {
    /// An executor without transient retries, logging under no parent
    /// span.
    pub fn new(store: Arc<CredentialStore<A>>) -> Self {
        Self {
            store,
            retry: RetryPolicy::disabled(),
            span: Span::none(),
        }
    }

    /// Enables transient retries according to `policy`.
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy.validated();
        self
    }

    /// Makes every execution span a child of `span`, so the host
    /// application's context (request id, tenant, ...) shows up on the
    /// executor's log lines. Without one, the caller's current span is
    /// the parent.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn store(&self) -> &Arc<CredentialStore<A>> {
        &self.store
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Runs `call` bound to the current credentials.
    ///
    /// `call` receives the credential pair to use and returns the raw
    /// outcome of one dispatch. It may be invoked more than once: again
    /// with refreshed credentials after an `Unauthorized`, and again after
    /// each transient failure the retry policy allows. The success value is
    /// returned untouched.
    ///
    /// # Errors
    /// - [`ParleyError::Api`] — a failure that wasn't recovered, including
    ///   a second consecutive `Unauthorized`.
    /// - [`ParleyError::Refresh`] — the first `Unauthorized` triggered a
    ///   refresh, and the refresh failed.
    pub async fn execute<T, F, Fut>(
        &self,
        operation: Operation,
        call: F,
    ) -> Result<T, ParleyError>
    where
        F: FnMut(Credentials) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let parent = self.span.id().or_else(|| Span::current().id());
        let span = tracing::debug_span!(
            parent: parent,
            "parley.execute",
            %operation
        );
        self.run(operation, call).instrument(span).await
    }

    async fn run<T, F, Fut>(
        &self,
        operation: Operation,
        mut call: F,
    ) -> Result<T, ParleyError>
    where
        F: FnMut(Credentials) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut credentials = self.store.current();
        let mut backoff = Backoff::new(&self.retry);
        let mut attempt = Attempt::Initial;
        let mut refreshed = false;

        loop {
            tracing::debug!(%attempt, generation = credentials.generation(), "dispatching");
            let error = match call(credentials.clone()).await {
                Ok(value) => {
                    tracing::debug!(%attempt, "operation succeeded");
                    return Ok(value);
                }
                Err(error) => error,
            };

            let kind = error.kind();
            match kind {
                FailureKind::Unauthorized if !refreshed => {
                    tracing::warn!(%attempt, %kind, error = %error, "credentials rejected, refreshing");
                    credentials = self
                        .store
                        .refresh_stale(&credentials)
                        .await
                        .map_err(|source| ParleyError::Refresh { operation, source })?;
                    refreshed = true;
                    attempt = Attempt::AfterRefresh;
                }
                FailureKind::Transient => match backoff.next_delay() {
                    Some(delay) => {
                        tracing::warn!(
                            %attempt,
                            %kind,
                            error = %error,
                            delay_ms = delay.as_millis() as u64,
                            "transient failure, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt = Attempt::Transient(backoff.retries());
                    }
                    None => return Err(Self::surface(operation, attempt, error)),
                },
                _ => return Err(Self::surface(operation, attempt, error)),
            }
        }
    }

    fn surface(operation: Operation, attempt: Attempt, source: TransportError) -> ParleyError {
        tracing::warn!(%attempt, kind = %source.kind(), error = %source, "operation failed");
        ParleyError::Api { operation, source }
    }
}
