//! Identity types shared by every layer.
//!
//! These are "newtype wrappers": a `RoomId` and a `StreamId` are both
//! strings on the wire, but wrapping them means a function signature like
//! `fn room_info(id: &RoomId)` can't be called with a stream id by
//! accident.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// A platform user identifier.
///
/// `#[serde(transparent)]` serializes `UserId(101)` as just `101`, which is
/// what the pod expects in member lists and the create-conversation body.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// StreamId
// ---------------------------------------------------------------------------

/// Identifier of a conversation stream (IM, multi-party IM, or room).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(pub String);

impl StreamId {
    /// Returns the id as a string slice, e.g. for building a URL path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

// ---------------------------------------------------------------------------
// RoomId
// ---------------------------------------------------------------------------

/// Identifier of a chat room.
///
/// On the platform a room *is* a stream, so a `RoomId` converts into a
/// [`StreamId`] for free. The reverse is not provided: not every stream is
/// a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<RoomId> for StreamId {
    fn from(value: RoomId) -> Self {
        Self(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId(101)).unwrap();
        assert_eq!(json, "101");
    }

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomId::from("room-7")).unwrap();
        assert_eq!(json, "\"room-7\"");
    }

    #[test]
    fn test_room_id_converts_into_stream_id() {
        let stream: StreamId = RoomId::from("room-7").into();
        assert_eq!(stream.as_str(), "room-7");
    }

    #[test]
    fn test_display_prints_raw_value() {
        assert_eq!(UserId(7).to_string(), "7");
        assert_eq!(StreamId::from("abc").to_string(), "abc");
    }
}
