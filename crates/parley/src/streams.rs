//! Conversation façade.

use parley_model::{Stream, StreamInfo};
use parley_protocol::{StreamId, UserId, wire};
use parley_session::Authenticator;
use parley_transport::{ApiRequest, Transport};

use crate::client::ClientInner;
use crate::path::segment;
use crate::{Operation, ParleyError};

/// Conversation operations, borrowed from a [`ParleyClient`](crate::ParleyClient).
pub struct StreamsApi<'a, T: Transport, A: Authenticator> {
    inner: &'a ClientInner<T, A>,
}

impl<'a, T: Transport, A: Authenticator> StreamsApi<'a, T, A> {
    pub(crate) fn new(inner: &'a ClientInner<T, A>) -> Self {
        Self { inner }
    }

    /// Opens (or finds) the conversation between the calling user and
    /// `participants`.
    ///
    /// One participant gives a one-to-one IM, several give a multi-party
    /// IM. If such a conversation already exists the pod returns it, so
    /// calling this twice yields the same [`Stream`].
    ///
    /// # Errors
    /// [`ParleyError::InvalidArgument`] for an empty participant list;
    /// otherwise whatever the executor surfaces.
    pub async fn create_conversation(&self, participants: &[UserId]) -> Result<Stream, ParleyError> {
        let operation = Operation::CreateConversation;
        if participants.is_empty() {
            return Err(ParleyError::invalid_argument(
                operation,
                "a conversation needs at least one participant",
            ));
        }

        let request = self
            .inner
            .encode(operation, ApiRequest::post("/pod/v1/im/create"), &participants)?;
        let response: wire::StreamIdResponse = self.inner.dispatch(operation, request).await?;
        let stream = Stream::try_from(response).map_err(ParleyError::model(operation))?;

        tracing::debug!(stream_id = %stream.id, participants = participants.len(), "conversation ready");
        Ok(stream)
    }

    /// Metadata of an existing stream (IM, MIM or room).
    pub async fn stream_info(&self, stream_id: &StreamId) -> Result<StreamInfo, ParleyError> {
        let operation = Operation::StreamInfo;
        let stream = segment(operation, stream_id.as_str())?;
        let request = ApiRequest::get(format!("/pod/v1/streams/{stream}/info"));
        let response: wire::StreamAttributes = self.inner.dispatch(operation, request).await?;
        StreamInfo::try_from(response).map_err(ParleyError::model(operation))
    }
}
