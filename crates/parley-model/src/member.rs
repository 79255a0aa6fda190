//! Room membership entries.

use parley_protocol::{UserId, wire};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::error::required;

/// One member of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMember {
    pub user: UserId,
    /// Owners can edit the room and manage its members.
    pub owner: bool,
    /// Milliseconds since the Unix epoch.
    pub join_date: Option<i64>,
}

impl TryFrom<wire::MemberInfo> for RoomMember {
    type Error = ModelError;

    fn try_from(value: wire::MemberInfo) -> Result<Self, ModelError> {
        Ok(Self {
            user: required(value.id, "id")?,
            owner: value.owner.unwrap_or(false),
            join_date: value.join_date,
        })
    }
}
