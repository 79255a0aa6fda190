//! Authentication hook for obtaining a fresh credential pair.
//!
//! Parley doesn't care HOW the client proves its identity: certificate
//! authentication, an RSA-signed JWT, a test double. It only needs
//! something that implements [`Authenticator`]: a single async method that
//! performs the out-of-band exchange and returns a new session/signing
//! pair.

use std::future::Future;
use std::sync::Arc;

use parley_protocol::Credentials;

use crate::SessionError;

/// Performs the out-of-band exchange that yields a new credential pair.
///
/// # Trait bounds
///
/// - `Send + Sync` → the store calls it from whichever task hit the
///   expired credential.
/// - `'static` → it lives as long as the client session.
///
/// The returned future is `Send` so a refresh can run inside a spawned
/// task.
///
/// # Example
///
/// ```rust
/// use parley_protocol::Credentials;
/// use parley_session::{Authenticator, SessionError};
///
/// /// Hands out the same fixed pair every time. Test use only.
/// struct StaticAuthenticator;
///
/// impl Authenticator for StaticAuthenticator {
///     async fn authenticate(&self) -> Result<Credentials, SessionError> {
///         Ok(Credentials::new("session-token", "signing-token"))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Obtains a brand-new pair. Both tokens come from the same exchange;
    /// an implementation must never return a pair mixing a fresh session
    /// token with an old signing token.
    ///
    /// # Errors
    /// Any [`SessionError`]; the store leaves its current pair untouched.
    fn authenticate(
        &self,
    ) -> impl Future<Output = Result<Credentials, SessionError>> + Send;
}

impl<A: Authenticator> Authenticator for Arc<A> {
    fn authenticate(
        &self,
    ) -> impl Future<Output = Result<Credentials, SessionError>> + Send {
        (**self).authenticate()
    }
}
