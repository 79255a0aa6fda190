//! Remote operation boundary for Parley.
//!
//! Provides the [`Transport`] trait that abstracts over how a request
//! reaches the pod, the [`ApiRequest`] description of one endpoint call,
//! and the [`FailureKind`] taxonomy every transport error is classified
//! into.
//!
//! # Feature Flags
//!
//! - `http` (default) — HTTP transport via `reqwest`

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::{FailureKind, TransportError};
#[cfg(feature = "http")]
pub use http::{HttpTransport, SESSION_TOKEN_HEADER, SIGNING_TOKEN_HEADER};

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parley_protocol::Credentials;

/// HTTP verbs the pod API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// A fully-bound call to one pod endpoint, minus the credentials.
///
/// Credentials are not part of the request: the executor
/// supplies them at dispatch time, so the same request can be re-sent
/// after a refresh with a different token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the pod base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<&'static str>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Attaches an encoded body and its content type.
    pub fn body(mut self, body: Vec<u8>, content_type: &'static str) -> Self {
        self.body = Some(body);
        self.content_type = Some(content_type);
        self
    }

    /// Looks up a query parameter by name.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Sends one request to the pod and returns the raw response body.
///
/// Implementations only move bytes and report failures; they never retry,
/// refresh, or decode. The returned future must be `Send` so calls can be
/// issued from any Tokio task.
pub trait Transport: Send + Sync + 'static {
    /// Sends `request` authenticated with `credentials`.
    ///
    /// # Errors
    /// Any non-2xx answer or I/O failure, as a [`TransportError`] whose
    /// [`kind()`](TransportError::kind) drives the caller's recovery.
    fn send(
        &self,
        request: &ApiRequest,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: &ApiRequest,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        (**self).send(request, credentials)
    }
}
