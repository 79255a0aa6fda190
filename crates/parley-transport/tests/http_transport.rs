//! Integration tests for `HttpTransport` against a wiremock pod.

use std::time::Duration;

use parley_protocol::Credentials;
use parley_transport::{
    ApiRequest, FailureKind, HttpTransport, Transport, TransportError,
};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =========================================================================
// Helpers
// =========================================================================

fn creds() -> Credentials {
    Credentials::new("sess-1", "km-1").with_generation(1)
}

/// Builds a transport that ignores any proxy configured in the
/// environment, so requests really reach the local mock server.
fn transport_with_timeout(base_url: &str, timeout: Duration) -> HttpTransport {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .unwrap();
    HttpTransport::with_client(client, base_url).unwrap()
}

fn transport_for(server: &MockServer) -> HttpTransport {
    transport_with_timeout(&server.uri(), Duration::from_secs(5))
}

// =========================================================================
// Success path
// =========================================================================

#[tokio::test]
async fn test_send_attaches_both_credential_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pod/v2/room/room-7/info"))
        .and(header("sessionToken", "sess-1"))
        .and(header("keyManagerToken", "km-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let body = transport_for(&server)
        .send(&ApiRequest::get("/pod/v2/room/room-7/info"), &creds())
        .await
        .unwrap();

    assert_eq!(body, b"{}");
}

#[tokio::test]
async fn test_send_posts_body_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pod/v2/room/search"))
        .and(query_param("skip", "10"))
        .and(query_param("limit", "5"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"query":"ops"}"#))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"rooms":[]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::post("/pod/v2/room/search")
        .query("skip", 10)
        .query("limit", 5)
        .body(br#"{"query":"ops"}"#.to_vec(), "application/json");
    let body = transport_for(&server).send(&request, &creds()).await.unwrap();

    assert_eq!(body, br#"{"rooms":[]}"#);
}

// =========================================================================
// Failure classification
// =========================================================================

#[tokio::test]
async fn test_send_401_is_classified_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"code": 401, "message": "Invalid session"}"#,
        ))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&ApiRequest::get("/pod/v1/streams/s/info"), &creds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Unauthorized);
    assert_eq!(err, TransportError::status(401, "Invalid session"));
}

#[tokio::test]
async fn test_send_404_keeps_pod_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"code": 404, "message": "Stream 404 not found"}"#,
        ))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&ApiRequest::get("/pod/v1/streams/404/info"), &creds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::NotFound);
    assert!(err.to_string().contains("Stream 404 not found"));
}

#[tokio::test]
async fn test_send_503_is_classified_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&ApiRequest::get("/pod/v1/streams/s/info"), &creds())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transient);
}

#[tokio::test]
async fn test_send_slow_response_times_out_as_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let transport =
        transport_with_timeout(&server.uri(), Duration::from_millis(50));
    let err = transport
        .send(&ApiRequest::get("/pod/v1/streams/s/info"), &creds())
        .await
        .unwrap_err();

    assert_eq!(err, TransportError::Timeout);
    assert_eq!(err.kind(), FailureKind::Transient);
}

#[tokio::test]
async fn test_send_unreachable_host_is_network_failure() {
    // Nothing listens on port 1; the connect is refused immediately.
    let transport =
        transport_with_timeout("http://127.0.0.1:1", Duration::from_secs(2));

    let err = transport
        .send(&ApiRequest::get("/pod/v1/streams/s/info"), &creds())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::Transient);
}

/// Answers one request with `head` and a body shorter than its
/// `Content-Length`, then closes the connection.
async fn serve_truncated(head: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let response = format!("{head}\r\nContent-Length: 100\r\n\r\n{{\"id\"");
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_send_truncated_body_is_network_failure() {
    let base = serve_truncated("HTTP/1.1 200 OK").await;

    let err = transport_with_timeout(&base, Duration::from_secs(5))
        .send(&ApiRequest::get("/pod/v1/streams/s/info"), &creds())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::Transient);
}

#[tokio::test]
async fn test_send_truncated_error_body_keeps_status() {
    let base = serve_truncated("HTTP/1.1 503 Service Unavailable").await;

    let err = transport_with_timeout(&base, Duration::from_secs(5))
        .send(&ApiRequest::get("/pod/v1/streams/s/info"), &creds())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 503, .. }), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::Transient);
}
