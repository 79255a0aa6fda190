//! Room façade.

use parley_model::{Room, RoomDetail, RoomMember, RoomSearchCriteria, RoomSearchResults};
use parley_protocol::{RoomId, UserId, wire};
use parley_session::Authenticator;
use parley_transport::{ApiRequest, Transport};

use crate::client::ClientInner;
use crate::path::segment;
use crate::{Operation, ParleyError};

/// Room operations, borrowed from a [`ParleyClient`](crate::ParleyClient).
pub struct RoomsApi<'a, T: Transport, A: Authenticator> {
    inner: &'a ClientInner<T, A>,
}

impl<'a, T: Transport, A: Authenticator> RoomsApi<'a, T, A> {
    pub(crate) fn new(inner: &'a ClientInner<T, A>) -> Self {
        Self { inner }
    }

    /// Creates a room owned by the calling user.
    pub async fn create_room(&self, room: &Room) -> Result<RoomDetail, ParleyError> {
        let operation = Operation::CreateRoom;
        let request = self.inner.encode(
            operation,
            ApiRequest::post("/pod/v2/room/create"),
            &wire::RoomAttributes::from(room),
        )?;
        let detail = self.detail(operation, request).await?;
        tracing::info!(room_id = %detail.id, name = %detail.room.name, "room created");
        Ok(detail)
    }

    /// Current attributes and state of a room.
    pub async fn room_info(&self, room_id: &RoomId) -> Result<RoomDetail, ParleyError> {
        let operation = Operation::RoomInfo;
        let room = segment(operation, room_id.as_str())?;
        let request = ApiRequest::get(format!("/pod/v2/room/{room}/info"));
        self.detail(operation, request).await
    }

    /// Replaces the room's attributes with `room`. Flags left unset in
    /// `room` keep their current value.
    pub async fn update_room(&self, room_id: &RoomId, room: &Room) -> Result<RoomDetail, ParleyError> {
        let operation = Operation::UpdateRoom;
        let path = format!("/pod/v2/room/{}/update", segment(operation, room_id.as_str())?);
        let request = self.inner.encode(
            operation,
            ApiRequest::post(path),
            &wire::RoomAttributes::from(room),
        )?;
        let detail = self.detail(operation, request).await?;
        tracing::info!(%room_id, "room updated");
        Ok(detail)
    }

    /// One page of rooms matching `criteria`, starting at result `skip`.
    ///
    /// # Errors
    /// [`ParleyError::InvalidArgument`] for a blank query or a zero
    /// `limit`; otherwise whatever the executor surfaces.
    pub async fn search_rooms(
        &self,
        criteria: &RoomSearchCriteria,
        skip: u64,
        limit: u64,
    ) -> Result<RoomSearchResults, ParleyError> {
        let operation = Operation::SearchRooms;
        if !criteria.has_query() {
            return Err(ParleyError::invalid_argument(operation, "room search needs a non-empty query"));
        }
        if limit == 0 {
            return Err(ParleyError::invalid_argument(operation, "room search limit must be at least 1"));
        }

        let request = self.inner.encode(
            operation,
            ApiRequest::post("/pod/v2/room/search")
                .query("skip", skip)
                .query("limit", limit),
            &wire::RoomSearchCriteria::from(criteria),
        )?;
        let response: wire::RoomSearchResults = self.inner.dispatch(operation, request).await?;
        let results = RoomSearchResults::try_from(response).map_err(ParleyError::model(operation))?;

        tracing::debug!(query = %criteria.query, count = results.count, page = results.rooms.len(), "rooms searched");
        Ok(results)
    }

    /// Activates or deactivates a room. A deactivated room keeps its
    /// history but accepts no new messages.
    pub async fn set_room_active(&self, room_id: &RoomId, active: bool) -> Result<RoomDetail, ParleyError> {
        let operation = Operation::SetRoomActive;
        let room = segment(operation, room_id.as_str())?;
        let request = ApiRequest::post(format!("/pod/v1/room/{room}/setActive")).query("active", active);
        let detail = self.detail(operation, request).await?;
        tracing::info!(%room_id, active = detail.active, "room activity changed");
        Ok(detail)
    }

    /// Everyone currently in the room.
    pub async fn room_members(&self, room_id: &RoomId) -> Result<Vec<RoomMember>, ParleyError> {
        let operation = Operation::RoomMembers;
        let room = segment(operation, room_id.as_str())?;
        let request = ApiRequest::get(format!("/pod/v2/room/{room}/membership/list"));
        let response: Vec<wire::MemberInfo> = self.inner.dispatch(operation, request).await?;
        response
            .into_iter()
            .map(RoomMember::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ParleyError::model(operation))
    }

    /// Adds `user` to the room. Adding an existing member is a no-op.
    pub async fn add_member(&self, room_id: &RoomId, user: UserId) -> Result<(), ParleyError> {
        self.membership(Operation::AddMember, room_id, "add", user).await?;
        tracing::info!(%room_id, %user, "member added");
        Ok(())
    }

    /// Removes `user` from the room.
    pub async fn remove_member(&self, room_id: &RoomId, user: UserId) -> Result<(), ParleyError> {
        self.membership(Operation::RemoveMember, room_id, "remove", user).await?;
        tracing::info!(%room_id, %user, "member removed");
        Ok(())
    }

    async fn detail(&self, operation: Operation, request: ApiRequest) -> Result<RoomDetail, ParleyError> {
        let response: wire::RoomDetail = self.inner.dispatch(operation, request).await?;
        RoomDetail::try_from(response).map_err(ParleyError::model(operation))
    }

    async fn membership(
        &self,
        operation: Operation,
        room_id: &RoomId,
        action: &str,
        user: UserId,
    ) -> Result<wire::SuccessResponse, ParleyError> {
        let room = segment(operation, room_id.as_str())?;
        let request = self.inner.encode(
            operation,
            ApiRequest::post(format!("/pod/v1/room/{room}/membership/{action}")),
            &wire::UserRef { id: user },
        )?;
        self.inner.dispatch(operation, request).await
    }
}
