//! Rooms: the editable attributes and the server-side detail view.

use parley_protocol::{RoomId, UserId, wire};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::error::required;

// ---------------------------------------------------------------------------
// Keyword
// ---------------------------------------------------------------------------

/// A `key = value` tag on a room. A room's keywords keep the order the pod
/// returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub key: String,
    pub value: String,
}

impl Keyword {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RoomFlags
// ---------------------------------------------------------------------------

/// Boolean room settings.
///
/// Every flag is tri-state: `None` means "not stated". On create the pod
/// applies its own default, and on update the flag is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoomFlags {
    /// Any member may add others, not just owners.
    pub members_can_invite: Option<bool>,
    /// Shows up in room search for non-members.
    pub discoverable: Option<bool>,
    /// Visible to users outside the owning company.
    pub public: Option<bool>,
    /// Only owners may post.
    pub read_only: Option<bool>,
    pub copy_protected: Option<bool>,
    pub cross_pod: Option<bool>,
    /// New members can see messages sent before they joined.
    pub view_history: Option<bool>,
    pub multi_lateral_room: Option<bool>,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// The caller-editable attributes of a room.
///
/// Built with [`Room::new`] and the chained setters, then passed to
/// `create_room` or `update_room`. The same type comes back inside every
/// [`RoomDetail`].
///
/// ```rust
/// use parley_model::Room;
///
/// let room = Room::new("Incident 4711")
///     .description("War room for the outage")
///     .keyword("severity", "1")
///     .discoverable(false)
///     .view_history(true);
///
/// assert_eq!(room.keywords.len(), 1);
/// assert_eq!(room.flags.discoverable, Some(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub description: Option<String>,
    pub keywords: Vec<Keyword>,
    pub flags: RoomFlags,
}

impl Room {
    /// A room with only a name; every flag unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            keywords: Vec::new(),
            flags: RoomFlags::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a keyword; earlier keywords keep their position.
    pub fn keyword(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.keywords.push(Keyword::new(key, value));
        self
    }

    pub fn flags(mut self, flags: RoomFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn members_can_invite(mut self, value: bool) -> Self {
        self.flags.members_can_invite = Some(value);
        self
    }

    pub fn discoverable(mut self, value: bool) -> Self {
        self.flags.discoverable = Some(value);
        self
    }

    pub fn public(mut self, value: bool) -> Self {
        self.flags.public = Some(value);
        self
    }

    pub fn read_only(mut self, value: bool) -> Self {
        self.flags.read_only = Some(value);
        self
    }

    pub fn copy_protected(mut self, value: bool) -> Self {
        self.flags.copy_protected = Some(value);
        self
    }

    pub fn cross_pod(mut self, value: bool) -> Self {
        self.flags.cross_pod = Some(value);
        self
    }

    pub fn view_history(mut self, value: bool) -> Self {
        self.flags.view_history = Some(value);
        self
    }

    pub fn multi_lateral_room(mut self, value: bool) -> Self {
        self.flags.multi_lateral_room = Some(value);
        self
    }

    /// Value of the first keyword named `key`.
    pub fn keyword_value(&self, key: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| k.key == key)
            .map(|k| k.value.as_str())
    }
}

impl TryFrom<wire::RoomAttributes> for Room {
    type Error = ModelError;

    fn try_from(value: wire::RoomAttributes) -> Result<Self, ModelError> {
        let keywords = value
            .keywords
            .into_iter()
            .map(|pair| -> Result<Keyword, ModelError> {
                Ok(Keyword {
                    key: required(pair.key, "keywords.key")?,
                    value: required(pair.value, "keywords.value")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: required(value.name, "name")?,
            description: value.description,
            keywords,
            flags: RoomFlags {
                members_can_invite: value.members_can_invite,
                discoverable: value.discoverable,
                public: value.public,
                read_only: value.read_only,
                copy_protected: value.copy_protected,
                cross_pod: value.cross_pod,
                view_history: value.view_history,
                multi_lateral_room: value.multi_lateral_room,
            },
        })
    }
}

impl From<&Room> for wire::RoomAttributes {
    fn from(room: &Room) -> Self {
        let flags = room.flags;
        Self {
            name: Some(room.name.clone()),
            keywords: room
                .keywords
                .iter()
                .map(|k| wire::KeywordPair {
                    key: Some(k.key.clone()),
                    value: Some(k.value.clone()),
                })
                .collect(),
            description: room.description.clone(),
            members_can_invite: flags.members_can_invite,
            discoverable: flags.discoverable,
            public: flags.public,
            read_only: flags.read_only,
            copy_protected: flags.copy_protected,
            cross_pod: flags.cross_pod,
            view_history: flags.view_history,
            multi_lateral_room: flags.multi_lateral_room,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomDetail
// ---------------------------------------------------------------------------

/// A room as the pod reports it: its attributes plus server-owned facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetail {
    pub id: RoomId,
    pub room: Room,
    /// `false` once the room has been deactivated.
    pub active: bool,
    /// Milliseconds since the Unix epoch.
    pub creation_date: Option<i64>,
    pub created_by: Option<UserId>,
}

impl TryFrom<wire::RoomDetail> for RoomDetail {
    type Error = ModelError;

    fn try_from(value: wire::RoomDetail) -> Result<Self, ModelError> {
        let system = required(value.room_system_info, "roomSystemInfo")?;
        let attributes = required(value.room_attributes, "roomAttributes")?;
        Ok(Self {
            id: RoomId(required(system.id, "roomSystemInfo.id")?),
            room: Room::try_from(attributes)?,
            active: required(system.active, "roomSystemInfo.active")?,
            creation_date: system.creation_date,
            created_by: system.created_by_user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_keyword_order() {
        let room = Room::new("ops")
            .keyword("b", "2")
            .keyword("a", "1")
            .keyword("b", "3");
        let keys: Vec<_> = room.keywords.iter().map(|k| k.key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "b"]);
        assert_eq!(room.keyword_value("b"), Some("2"));
    }

    #[test]
    fn test_room_requires_name() {
        let err = Room::try_from(wire::RoomAttributes::default()).unwrap_err();
        assert_eq!(err, ModelError::MissingField("name"));
    }

    #[test]
    fn test_room_rejects_keyword_without_value() {
        let attrs = wire::RoomAttributes {
            name: Some("ops".into()),
            keywords: vec![wire::KeywordPair {
                key: Some("team".into()),
                value: None,
            }],
            ..Default::default()
        };
        let err = Room::try_from(attrs).unwrap_err();
        assert_eq!(err, ModelError::MissingField("keywords.value"));
    }

    #[test]
    fn test_detail_flattens_system_info() {
        let detail = wire::RoomDetail {
            room_attributes: Some(wire::RoomAttributes {
                name: Some("ops".into()),
                ..Default::default()
            }),
            room_system_info: Some(wire::RoomSystemInfo {
                id: Some("r-1".into()),
                creation_date: Some(1_700_000_000_000),
                created_by_user_id: Some(UserId(7)),
                active: Some(true),
            }),
        };

        let detail = RoomDetail::try_from(detail).unwrap();

        assert_eq!(detail.id, RoomId::from("r-1"));
        assert_eq!(detail.room.name, "ops");
        assert!(detail.active);
        assert_eq!(detail.created_by, Some(UserId(7)));
    }

    #[test]
    fn test_detail_without_active_flag_is_malformed() {
        let detail = wire::RoomDetail {
            room_attributes: Some(wire::RoomAttributes {
                name: Some("ops".into()),
                ..Default::default()
            }),
            room_system_info: Some(wire::RoomSystemInfo {
                id: Some("r-1".into()),
                ..Default::default()
            }),
        };
        let err = RoomDetail::try_from(detail).unwrap_err();
        assert_eq!(err, ModelError::MissingField("roomSystemInfo.active"));
    }
}
