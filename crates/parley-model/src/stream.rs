//! Conversations and stream metadata.

use std::fmt;

use parley_protocol::{StreamId, UserId, wire};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::error::required;

// ---------------------------------------------------------------------------
// Stream
// ---------------------------------------------------------------------------

/// A conversation handle, as returned when a conversation is created.
///
/// Creating a conversation between the same participants twice yields the
/// same `Stream`; the pod returns the existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stream {
    pub id: StreamId,
}

impl TryFrom<wire::StreamIdResponse> for Stream {
    type Error = ModelError;

    fn try_from(value: wire::StreamIdResponse) -> Result<Self, ModelError> {
        Ok(Self {
            id: StreamId(required(value.id, "id")?),
        })
    }
}

// ---------------------------------------------------------------------------
// StreamKind
// ---------------------------------------------------------------------------

/// What kind of conversation a stream is.
///
/// Unknown kinds are kept verbatim in [`StreamKind::Other`] so a pod that
/// introduces a new stream type doesn't break `stream_info`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    /// One-to-one instant message.
    Im,
    /// Multi-party instant message.
    Mim,
    /// A chat room.
    Room,
    /// A user's wall.
    Post,
    Other(String),
}

impl StreamKind {
    /// The pod's name for this kind (`"IM"`, `"ROOM"`, ...).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Im => "IM",
            Self::Mim => "MIM",
            Self::Room => "ROOM",
            Self::Post => "POST",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for StreamKind {
    fn from(value: &str) -> Self {
        match value {
            "IM" => Self::Im,
            "MIM" => Self::Mim,
            "ROOM" => Self::Room,
            "POST" => Self::Post,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StreamInfo
// ---------------------------------------------------------------------------

/// Metadata about an existing stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub id: StreamId,
    pub kind: StreamKind,
    /// `false` once the stream has been deactivated.
    pub active: bool,
    pub cross_pod: bool,
    /// Participants, for IM and MIM streams. Empty for rooms.
    pub members: Vec<UserId>,
    /// Room name, for room streams.
    pub room_name: Option<String>,
}

impl StreamInfo {
    /// `true` if `user` is one of the stream's listed members.
    pub fn has_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }
}

impl TryFrom<wire::StreamAttributes> for StreamInfo {
    type Error = ModelError;

    fn try_from(value: wire::StreamAttributes) -> Result<Self, ModelError> {
        let kind = required(
            value.stream_type.and_then(|t| t.kind),
            "streamType.type",
        )?;
        Ok(Self {
            id: StreamId(required(value.id, "id")?),
            kind: StreamKind::from(kind.as_str()),
            active: required(value.active, "active")?,
            cross_pod: value.cross_pod.unwrap_or(false),
            members: value
                .stream_attributes
                .map(|attrs| attrs.members)
                .unwrap_or_default(),
            room_name: value.room_attributes.and_then(|attrs| attrs.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_requires_id() {
        let err = Stream::try_from(wire::StreamIdResponse { id: None }).unwrap_err();
        assert_eq!(err, ModelError::MissingField("id"));
    }

    #[test]
    fn test_stream_kind_keeps_unknown_values() {
        assert_eq!(StreamKind::from("IM"), StreamKind::Im);
        assert_eq!(StreamKind::from("ROOM"), StreamKind::Room);
        let other = StreamKind::from("CHANNEL");
        assert_eq!(other, StreamKind::Other("CHANNEL".into()));
        assert_eq!(other.to_string(), "CHANNEL");
    }

    #[test]
    fn test_stream_info_flattens_nested_attributes() {
        let attrs = wire::StreamAttributes {
            id: Some("s-1".into()),
            cross_pod: None,
            active: Some(true),
            stream_type: Some(wire::StreamType {
                kind: Some("MIM".into()),
            }),
            stream_attributes: Some(wire::ConversationAttributes {
                members: vec![UserId(7), UserId(101), UserId(102)],
            }),
            room_attributes: None,
        };

        let info = StreamInfo::try_from(attrs).unwrap();

        assert_eq!(info.id, StreamId::from("s-1"));
        assert_eq!(info.kind, StreamKind::Mim);
        assert!(info.active);
        assert!(!info.cross_pod);
        assert!(info.has_member(UserId(101)));
        assert_eq!(info.room_name, None);
    }

    #[test]
    fn test_stream_info_without_type_is_malformed() {
        let attrs = wire::StreamAttributes {
            id: Some("s-1".into()),
            active: Some(true),
            ..Default::default()
        };
        let err = StreamInfo::try_from(attrs).unwrap_err();
        assert_eq!(err, ModelError::MissingField("streamType.type"));
    }
}
