//! `ParleyClient` builder and the shared call path used by the façades.
//!
//! This is the entry point for talking to a pod. It ties together all the
//! layers: façade → executor → transport → protocol.

use std::sync::Arc;
use std::time::Duration;

use parley_protocol::{Codec, JsonCodec};
use parley_retry::RetryPolicy;
use parley_session::{Authenticator, CredentialStore, HttpAuthenticator};
use parley_transport::{ApiRequest, HttpTransport, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Span;

use crate::{ClientConfig, Executor, Operation, ParleyError, RoomsApi, StreamsApi};

/// State shared by every façade handle of one client.
pub(crate) struct ClientInner<T: Transport, A: Authenticator> {
    pub(crate) transport: T,
    pub(crate) executor: Executor<A>,
    pub(crate) codec: JsonCodec,
}

impl<T: Transport, A: Authenticator> ClientInner<T, A> {
    /// Sends `request` through the executor and decodes the answer.
    pub(crate) async fn dispatch<R: DeserializeOwned>(
        &self,
        operation: Operation,
        request: ApiRequest,
    ) -> Result<R, ParleyError> {
        let transport = &self.transport;
        let request = &request;
        let body = self
            .executor
            .execute(operation, move |credentials| async move {
                transport.send(request, &credentials).await
            })
            .await?;
        self.codec
            .decode(&body)
            .map_err(ParleyError::protocol(operation))
    }

    /// Serializes a request body with the client's codec.
    pub(crate) fn encode<B: Serialize>(
        &self,
        operation: Operation,
        request: ApiRequest,
        body: &B,
    ) -> Result<ApiRequest, ParleyError> {
        let bytes = self
            .codec
            .encode(body)
            .map_err(ParleyError::protocol(operation))?;
        Ok(request.body(bytes, self.codec.content_type()))
    }
}

/// Builder for configuring and connecting a [`ParleyClient`].
///
/// # Example
///
/// ```rust,ignore
/// use parley::prelude::*;
///
/// let auth = HttpAuthenticator::new(&HttpAuthConfig::single_host(pod))?;
/// let client = ParleyClient::builder()
///     .pod_url(pod)
///     .retry(RetryPolicy::with_retries(2))
///     .connect(auth)
///     .await?;
/// let room = client.rooms().room_info(&room_id).await?;
/// ```
pub struct ParleyClientBuilder {
    config: ClientConfig,
    span: Span,
}

impl ParleyClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            span: Span::none(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the pod base URL.
    pub fn pod_url(mut self, url: &str) -> Self {
        self.config.pod_url = url.to_string();
        self
    }

    /// Sets the per-request timeout of the HTTP transport.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Sets the transient-failure retry policy.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Parent span for every call the client makes.
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Authenticates with `authenticator` and builds a client that talks
    /// to the configured pod over HTTP.
    ///
    /// # Errors
    /// - [`ParleyError::Setup`] — the pod URL is invalid.
    /// - [`ParleyError::Connect`] — the initial authentication failed.
    pub async fn connect<A: Authenticator>(
        self,
        authenticator: A,
    ) -> Result<ParleyClient<HttpTransport, A>, ParleyError> {
        let transport = HttpTransport::new(&self.config.pod_url, self.config.request_timeout)
            .map_err(ParleyError::Setup)?;
        let store = CredentialStore::connect(authenticator).await?;
        tracing::info!(pod = %transport.base_url(), "client connected");
        Ok(self.build(transport, store))
    }

    /// Builds a client around an existing transport and credential store.
    /// No network I/O; `pod_url` and `request_timeout` are ignored.
    pub fn build<T: Transport, A: Authenticator>(
        self,
        transport: T,
        store: CredentialStore<A>,
    ) -> ParleyClient<T, A> {
        let executor = Executor::new(Arc::new(store))
            .with_retry(self.config.retry)
            .with_span(self.span);
        ParleyClient {
            inner: Arc::new(ClientInner {
                transport,
                executor,
                codec: JsonCodec,
            }),
        }
    }
}

impl Default for ParleyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A connected client.
///
/// Cheap to clone; clones share the transport and the credential store, so
/// a refresh triggered through one clone benefits all of them.
pub struct ParleyClient<T: Transport = HttpTransport, A: Authenticator = HttpAuthenticator> {
    inner: Arc<ClientInner<T, A>>,
}

impl<T: Transport, A: Authenticator> Clone for ParleyClient<T, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ParleyClient {
    /// Creates a new builder.
    pub fn builder() -> ParleyClientBuilder {
        ParleyClientBuilder::new()
    }
}

impl<T: Transport, A: Authenticator> ParleyClient<T, A> {
    /// Conversation operations.
    pub fn streams(&self) -> StreamsApi<'_, T, A> {
        StreamsApi::new(&self.inner)
    }

    /// Room operations.
    pub fn rooms(&self) -> RoomsApi<'_, T, A> {
        RoomsApi::new(&self.inner)
    }

    /// The credential store every call is bound to.
    pub fn credentials(&self) -> &CredentialStore<A> {
        self.inner.executor.store()
    }

    pub fn executor(&self) -> &Executor<A> {
        &self.inner.executor
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }
}
