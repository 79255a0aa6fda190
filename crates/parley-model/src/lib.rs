//! Domain entities for Parley.
//!
//! The wire objects in `parley_protocol::wire` mirror the pod's JSON, with
//! every field optional. The types here are what callers actually work
//! with: required attributes are plain fields, nested attribute bags are
//! flattened, keyword tag lists become an ordered `Vec<Keyword>`.
//!
//! # Mapping
//!
//! Each entity converts from its wire counterpart with `TryFrom`; the only
//! failure is [`ModelError::MissingField`]. Outgoing bodies convert the
//! other way with `From<&Entity>`. For room attributes the two directions
//! are exact inverses:
//!
//! ```text
//! wire::RoomAttributes ──TryFrom──→ Room ──From──→ wire::RoomAttributes   (equal)
//! ```
//!
//! # Key types
//!
//! - [`Stream`], [`StreamInfo`] — conversations
//! - [`Room`], [`RoomDetail`] — room attributes and the server's view
//! - [`RoomSearchCriteria`], [`RoomSearchResults`] — room search
//! - [`RoomMember`] — membership lists

mod error;
mod member;
mod room;
mod search;
mod stream;

pub use error::ModelError;
pub use member::RoomMember;
pub use room::{Keyword, Room, RoomDetail, RoomFlags};
pub use search::{FacetCount, RoomSearchCriteria, RoomSearchResults, SortOrder};
pub use stream::{Stream, StreamInfo, StreamKind};
