//! Names of the remote operations, for logs and errors.

use std::fmt;

/// Which pod operation a call was performing.
///
/// Carried by every [`ParleyError`](crate::ParleyError) that came from the
/// pod, and recorded as the `operation` field of the executor's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateConversation,
    StreamInfo,
    CreateRoom,
    RoomInfo,
    UpdateRoom,
    SearchRooms,
    SetRoomActive,
    RoomMembers,
    AddMember,
    RemoveMember,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateConversation => "create_conversation",
            Self::StreamInfo => "stream_info",
            Self::CreateRoom => "create_room",
            Self::RoomInfo => "room_info",
            Self::UpdateRoom => "update_room",
            Self::SearchRooms => "search_rooms",
            Self::SetRoomActive => "set_room_active",
            Self::RoomMembers => "room_members",
            Self::AddMember => "add_member",
            Self::RemoveMember => "remove_member",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
