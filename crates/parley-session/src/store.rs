//! The credential store: the one place the current credential pair lives.
//!
//! Every outbound call reads the pair from here, and every expiry is
//! repaired here. It's responsible for:
//! - Handing out the current session/signing pair without blocking
//! - Replacing both tokens together, never one at a time
//! - Collapsing concurrent refresh requests into one exchange
//!
//! # Concurrency note
//!
//! Two locks with different jobs:
//!
//! - a `parking_lot::RwLock` around the pair itself. It's only held for a
//!   clone or an assignment, never across an `.await`, so readers never
//!   wait on network I/O.
//! - a `tokio::sync::Mutex` that serializes refreshes. Whoever holds it
//!   performs the exchange; everybody else queues behind it and, once
//!   inside, sees that the pair already moved on (or that the exchange
//!   they waited for failed, and gets the same error).
//!
//! Each stored pair carries a generation number. A caller that saw
//! generation N fail asks for a refresh "from N"; if the store is already
//! past N, the caller gets the newer pair without a second exchange.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use parley_protocol::Credentials;
use tokio::sync::Mutex;

use crate::{Authenticator, SessionError};

/// Holds the current credential pair and refreshes it on demand.
///
/// ## Lifecycle
///
/// ```text
/// connect() ──→ [gen 1] ──→ refresh() ──→ [gen 2] ──→ refresh() ──→ ...
///                  │                          │
///                  ▼                          ▼
///              current()                  current()
/// ```
///
/// A failed refresh leaves the previous generation in place.
pub struct CredentialStore<A: Authenticator> {
    authenticator: A,

    /// The pair every call is bound to.
    current: RwLock<Credentials>,

    /// Held for the whole duration of an exchange. Guards the outcome of
    /// the last failed exchange so queued callers can share it.
    refresh_gate: Mutex<Option<SessionError>>,

    /// Exchanges finished since construction, failed ones included.
    settled: AtomicU64,

    /// Successful exchanges since construction (the initial login excluded).
    refreshes: AtomicU64,
}

impl<A: Authenticator> CredentialStore<A> {
    /// Authenticates once and returns a store holding generation 1.
    ///
    /// # Errors
    /// Whatever the authenticator returns. No store exists without a
    /// valid pair.
    pub async fn connect(authenticator: A) -> Result<Self, SessionError> {
        let credentials = authenticator.authenticate().await?;
        tracing::info!("session established");
        Ok(Self::with_credentials(authenticator, credentials))
    }

    /// Builds a store around a pair obtained elsewhere (a cached login, a
    /// token handed over by a parent process). The pair becomes
    /// generation 1; `authenticator` is only used for later refreshes.
    pub fn with_credentials(authenticator: A, credentials: Credentials) -> Self {
        Self {
            authenticator,
            current: RwLock::new(credentials.with_generation(1)),
            refresh_gate: Mutex::new(None),
            settled: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    /// The pair to bind the next call to.
    ///
    /// Cheap: clones two `Arc<str>` handles under a read lock. Never waits
    /// for an in-flight refresh.
    pub fn current(&self) -> Credentials {
        self.current.read().clone()
    }

    /// Replaces the pair with a freshly exchanged one.
    ///
    /// Single-flight: callers that arrive while an exchange is running
    /// wait for it and receive its result instead of starting their own.
    ///
    /// # Errors
    /// The authenticator's error. The old pair stays current.
    pub async fn refresh(&self) -> Result<Credentials, SessionError> {
        let seen = self.current.read().generation();
        self.refresh_from(seen).await
    }

    /// Refreshes only if `stale` is still the current pair.
    ///
    /// This is what the executor calls after a call bound to `stale` came
    /// back unauthorized. If another task already refreshed past `stale`,
    /// the newer pair is returned without touching the network.
    ///
    /// A pair this store never issued (generation 0 from
    /// [`Credentials::new`], or one ahead of the current generation) can't
    /// be placed relative to the current pair, so it behaves like
    /// [`refresh`](Self::refresh).
    ///
    /// # Errors
    /// The authenticator's error, when an exchange was needed and failed.
    pub async fn refresh_stale(
        &self,
        stale: &Credentials,
    ) -> Result<Credentials, SessionError> {
        let issued = self.current.read().generation();
        let seen = match stale.generation() {
            0 => issued,
            generation if generation > issued => issued,
            generation => generation,
        };
        self.refresh_from(seen).await
    }

    /// Number of successful exchanges performed by `refresh`/`refresh_stale`.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    async fn refresh_from(&self, seen: u64) -> Result<Credentials, SessionError> {
        let settled_before = self.settled.load(Ordering::Acquire);
        let mut last_failure = self.refresh_gate.lock().await;

        {
            let current = self.current.read();
            if current.generation() != seen {
                tracing::debug!(
                    seen,
                    current = current.generation(),
                    "credentials already refreshed, reusing"
                );
                return Ok(current.clone());
            }
        }

        // An exchange finished while we were queued and the generation
        // didn't move, so it failed. Share its outcome.
        if self.settled.load(Ordering::Acquire) != settled_before {
            if let Some(e) = last_failure.as_ref() {
                tracing::debug!(generation = seen, "joining failed refresh");
                return Err(e.clone());
            }
        }

        tracing::debug!(generation = seen, "refreshing credentials");
        let outcome = self.authenticator.authenticate().await;
        self.settled.fetch_add(1, Ordering::AcqRel);
        let fresh = match outcome {
            Ok(credentials) => credentials.with_generation(seen + 1),
            Err(e) => {
                tracing::error!(error = %e, generation = seen, "credential refresh failed");
                *last_failure = Some(e.clone());
                return Err(e);
            }
        };

        *self.current.write() = fresh.clone();
        *last_failure = None;
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        tracing::info!(generation = fresh.generation(), "credentials refreshed");
        Ok(fresh)
    }
}

impl<A: Authenticator> std::fmt::Debug for CredentialStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("current", &*self.current.read())
            .field("refreshes", &self.refresh_count())
            .finish_non_exhaustive()
    }
}
