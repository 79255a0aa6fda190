//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use parley_protocol::{Codec, Credentials, JsonCodec, wire::ErrorBody};

use crate::{ApiRequest, Method, Transport, TransportError};

/// Header carrying the session token.
pub const SESSION_TOKEN_HEADER: &str = "sessionToken";

/// Header carrying the signing (key-manager) token.
pub const SIGNING_TOKEN_HEADER: &str = "keyManagerToken";

/// A [`Transport`] that talks to the pod over HTTPS.
///
/// `reqwest::Client` keeps a connection pool internally and is cheap to
/// clone, so one `HttpTransport` serves every concurrent call.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport with its own client and request timeout.
    ///
    /// # Errors
    /// [`TransportError::InvalidRequest`] if the base URL doesn't parse or
    /// the TLS backend can't be initialized.
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Self::with_client(client, base_url)
    }

    /// Builds a transport around an existing client (e.g. one configured
    /// with a client certificate).
    ///
    /// # Errors
    /// [`TransportError::InvalidRequest`] if the base URL doesn't parse.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
    ) -> Result<Self, TransportError> {
        reqwest::Url::parse(base_url).map_err(|e| {
            TransportError::InvalidRequest(format!("{base_url}: {e}"))
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The pod base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        let raw = format!("{}{}", self.base_url, path);
        reqwest::Url::parse(&raw)
            .map_err(|e| TransportError::InvalidRequest(format!("{raw}: {e}")))
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        credentials: &Credentials,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.url_for(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, url)
            .query(&request.query)
            .header(SESSION_TOKEN_HEADER, credentials.session().expose())
            .header(SIGNING_TOKEN_HEADER, credentials.signing().expose());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error);

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            body_read = body.is_ok(),
            "pod request completed"
        );

        finish(status, body)
    }
}

/// Turns a status and the result of reading the body into the call's
/// outcome.
///
/// A non-2xx status wins over a failed body read: a 503 whose body was cut
/// off is still a 503. On a 2xx the read failure itself is the outcome.
fn finish<B: AsRef<[u8]>>(
    status: reqwest::StatusCode,
    body: Result<B, TransportError>,
) -> Result<Vec<u8>, TransportError> {
    if status.is_success() {
        return body.map(|bytes| bytes.as_ref().to_vec());
    }
    let message = match &body {
        Ok(bytes) => error_message(bytes.as_ref(), status),
        Err(_) => reason(status),
    };
    Err(TransportError::Status {
        status: status.as_u16(),
        message,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Pulls the human-readable message out of an error body.
///
/// The pod usually answers `{"code": 404, "message": "..."}`, but a proxy
/// in front of it may answer with plain text or HTML instead.
fn error_message(body: &[u8], status: reqwest::StatusCode) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
        ..
    }) = JsonCodec.decode::<ErrorBody>(body)
    {
        return message;
    }
    let text = String::from_utf8_lossy(body).trim().to_owned();
    if text.is_empty() {
        reason(status)
    } else {
        text
    }
}

fn reason(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("no reason given")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_client_rejects_unparseable_base_url() {
        let result = HttpTransport::with_client(reqwest::Client::new(), "not a url");
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let transport =
            HttpTransport::with_client(reqwest::Client::new(), "https://pod.example.com/")
                .unwrap();
        assert_eq!(transport.base_url(), "https://pod.example.com");
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        let msg = error_message(
            br#"{"code": 404, "message": "Stream not found"}"#,
            reqwest::StatusCode::NOT_FOUND,
        );
        assert_eq!(msg, "Stream not found");
    }

    #[test]
    fn test_finish_keeps_status_when_body_read_fails() {
        let outcome = finish::<Vec<u8>>(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            Err(TransportError::Network("connection reset".into())),
        );
        let err = outcome.unwrap_err();
        assert_eq!(err, TransportError::status(503, "Service Unavailable"));
        assert_eq!(err.kind(), crate::FailureKind::Transient);
    }

    #[test]
    fn test_finish_surfaces_body_read_failure_on_success_status() {
        let outcome = finish::<Vec<u8>>(
            reqwest::StatusCode::OK,
            Err(TransportError::Network("connection reset".into())),
        );
        assert_eq!(outcome.unwrap_err().kind(), crate::FailureKind::Transient);
    }

    #[test]
    fn test_error_message_falls_back_to_text_then_reason() {
        let msg = error_message(b" upstream down ", reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "upstream down");

        let msg = error_message(b"", reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(msg, "Service Unavailable");
    }
}
