//! # Parley
//!
//! Authenticated client access layer for a messaging platform's HTTP API.
//!
//! Parley binds every call to the client's current session and signing
//! tokens, classifies whatever goes wrong, and recovers from expired
//! credentials by refreshing them once (shared by every concurrent caller)
//! and retrying. Callers only ever see domain entities or a classified
//! [`ParleyError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parley::prelude::*;
//!
//! # async fn run() -> Result<(), ParleyError> {
//! let auth = HttpAuthenticator::new(&HttpAuthConfig::single_host("https://acme.example.com"))?;
//! let client = ParleyClient::builder()
//!     .pod_url("https://acme.example.com")
//!     .connect(auth)
//!     .await?;
//!
//! let im = client.streams().create_conversation(&[UserId(101)]).await?;
//! let info = client.streams().stream_info(&im.id).await?;
//! println!("{} is a {} with {} members", info.id, info.kind, info.members.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! ```text
//! StreamsApi / RoomsApi   (this crate)     domain in, domain out
//!         ↓
//! Executor                (this crate)     bind credentials, refresh once, classify
//!         ↓
//! Transport               parley-transport HTTP request/response
//!         ↓
//! wire objects            parley-protocol  JSON shapes
//! ```

mod client;
mod config;
mod error;
mod executor;
mod operation;
mod path;
mod rooms;
mod streams;

pub use client::{ParleyClient, ParleyClientBuilder};
pub use config::ClientConfig;
pub use error::ParleyError;
pub use executor::Executor;
pub use operation::Operation;
pub use rooms::RoomsApi;
pub use streams::StreamsApi;

pub use parley_model as model;
pub use parley_protocol as protocol;
pub use parley_retry as retry;
pub use parley_session as session;
pub use parley_transport as transport;

/// Everything needed to build a client and call it.
pub mod prelude {
    pub use crate::{ClientConfig, Operation, ParleyClient, ParleyError};
    pub use parley_model::{
        Keyword, Room, RoomDetail, RoomFlags, RoomMember, RoomSearchCriteria, RoomSearchResults,
        SortOrder, Stream, StreamInfo, StreamKind,
    };
    pub use parley_protocol::{Credentials, RoomId, StreamId, UserId};
    pub use parley_retry::RetryPolicy;
    pub use parley_session::{
        Authenticator, CredentialStore, HttpAuthConfig, HttpAuthenticator, SessionError,
    };
    pub use parley_transport::{ApiRequest, FailureKind, Transport, TransportError};
}
