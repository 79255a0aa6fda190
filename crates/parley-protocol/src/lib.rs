//! Wire protocol for Parley.
//!
//! This crate defines the "language" the client speaks with the remote
//! messaging platform:
//!
//! - **Identity types** ([`UserId`], [`StreamId`], [`RoomId`]) — newtype
//!   wrappers so a room id can never be passed where a user id belongs.
//! - **Credentials** ([`Credentials`], [`Token`]) — the session/signing
//!   token pair every outbound call is bound to.
//! - **Wire objects** ([`wire`]) — the request/response shapes exactly as
//!   the pod serializes them.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those objects are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits at the bottom of the stack. It knows nothing
//! about HTTP, retries, or refresh. It only knows what travels on the wire.
//!
//! ```text
//! Façades (domain) → Executor → Transport (HTTP) → Protocol (wire objects)
//! ```

mod codec;
mod credentials;
mod error;
mod types;
pub mod wire;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use credentials::{Credentials, Token};
pub use error::ProtocolError;
pub use types::{RoomId, StreamId, UserId};
