//! Credentials: the token pair every outbound call is bound to.
//!
//! The platform uses two bearer tokens:
//! - the **session token** proves who the caller is;
//! - the **signing token** (key-manager token) is used by some operations
//!   for message-level signing.
//!
//! Neither token carries a client-side expiry. A token is valid until the
//! pod rejects it with a 401/403, at which point both are replaced
//! together.

use std::fmt;
use std::sync::Arc;

/// An opaque bearer token.
///
/// Backed by `Arc<str>` so cloning a [`Credentials`] pair for every call
/// is a reference-count bump, not a string copy.
///
/// `Debug` is written by hand so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(Arc<str>);

impl Token {
    /// Wraps a raw token string.
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for placing into a request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} bytes redacted>)", self.0.len())
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The session/signing token pair, tagged with the generation that
/// produced it.
///
/// The generation is assigned by the credential store: the first pair it
/// holds is generation 1 and every completed refresh increments it. Two
/// pairs with the same generation came from the same exchange, which is
/// how the store tells a stale pair from a fresh one without comparing
/// token bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    session: Token,
    signing: Token,
    generation: u64,
}

impl Credentials {
    /// Creates a pair with generation 0 (not yet owned by a store).
    pub fn new(session: impl Into<Token>, signing: impl Into<Token>) -> Self {
        Self {
            session: session.into(),
            signing: signing.into(),
            generation: 0,
        }
    }

    /// Returns the same pair stamped with `generation`.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// The session token (primary identity proof).
    pub fn session(&self) -> &Token {
        &self.session
    }

    /// The signing (key-manager) token.
    pub fn signing(&self) -> &Token {
        &self.signing
    }

    /// Which exchange produced this pair.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::from("super-secret");
        let printed = format!("{token:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("12 bytes"));
    }

    #[test]
    fn test_credentials_debug_never_prints_tokens() {
        let creds = Credentials::new("sess-abc", "km-def").with_generation(3);
        let printed = format!("{creds:?}");
        assert!(!printed.contains("sess-abc"));
        assert!(!printed.contains("km-def"));
        assert!(printed.contains("generation: 3"));
    }

    #[test]
    fn test_with_generation_keeps_tokens() {
        let creds = Credentials::new("s", "k").with_generation(9);
        assert_eq!(creds.session().expose(), "s");
        assert_eq!(creds.signing().expose(), "k");
        assert_eq!(creds.generation(), 9);
    }
}
