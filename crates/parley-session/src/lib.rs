//! Credential management for Parley.
//!
//! This crate owns the client's identity towards the platform:
//!
//! 1. **Authentication** — obtaining a session/signing pair
//!    ([`Authenticator`] trait, [`HttpAuthenticator`])
//! 2. **Storage** — one current pair shared by every call
//!    ([`CredentialStore`])
//! 3. **Refresh** — replacing an expired pair exactly once, no matter how
//!    many calls noticed the expiry at the same time
//!
//! # How it fits in the stack
//!
//! ```text
//! Executor (above)  ← binds calls to current(), calls refresh_stale() on 401
//!     ↕
//! Session Layer (this crate)  ← owns the credential pair
//!     ↕
//! Protocol Layer (below)  ← provides Credentials, Token, AuthToken
//! ```

mod auth;
mod error;
#[cfg(feature = "http")]
mod http;
mod store;

pub use auth::Authenticator;
pub use error::SessionError;
#[cfg(feature = "http")]
pub use http::{HttpAuthConfig, HttpAuthenticator};
pub use store::CredentialStore;
