//! Submission round trips against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `SubmissionClient`
//! over real HTTP with the default `UreqTransport`. Validates that request
//! building and status classification agree with an actual server.

use std::net::SocketAddr;

use mock_server::{app_with_inbox, failing_app, Inbox, Router};
use savestring_core::{ErrorKind, SubmissionClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_app(listener, app));
    addr
}

fn client_for(addr: SocketAddr) -> SubmissionClient {
    SubmissionClient::new(&format!("http://{addr}/saveString"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn successful_string_sending() {
    let inbox = Inbox::default();
    let addr = serve(app_with_inbox(inbox.clone())).await;

    client_for(addr)
        .submit("Test for successful string sending")
        .await
        .unwrap();

    let stored = inbox.read().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].value, "Test for successful string sending");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn empty_string_never_reaches_server() {
    let inbox = Inbox::default();
    let addr = serve(app_with_inbox(inbox.clone())).await;

    let err = client_for(addr).submit("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(err.to_string(), "String cannot be empty.");
    assert!(inbox.read().await.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn server_error_is_invalid_response() {
    let addr = serve(failing_app(500)).await;

    let err = client_for(addr).submit("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.message(), "Invalid response");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_route_is_invalid_response() {
    let addr = serve(app_with_inbox(Inbox::default())).await;
    let client = SubmissionClient::new(&format!("http://{addr}/missing"));

    let err = client.submit("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn refused_connection_is_transport_failure() {
    // Bind then drop to get a port nothing is listening on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let err = client_for(addr).submit("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert!(!err.message().is_empty());
}

/// Answer a single connection with `reply` once the request has arrived.
async fn serve_raw(reply: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await;
        stream.write_all(reply).await.unwrap();
        stream.shutdown().await.unwrap();
    });
    addr
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_http_reply_is_invalid_response() {
    let addr = serve_raw(b"garbage\r\n\r\n").await;

    let err = client_for(addr).submit("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    assert_eq!(err.message(), "Invalid response");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unparseable_status_line_is_invalid_response() {
    let addr = serve_raw(b"HTTP/1.1 abc\r\n\r\n").await;

    let err = client_for(addr).submit("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_all_arrive() {
    let inbox = Inbox::default();
    let addr = serve(app_with_inbox(inbox.clone())).await;
    let client = client_for(addr);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.submit(&format!("value-{i}")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut values: Vec<String> = inbox.read().await.iter().map(|s| s.value.clone()).collect();
    values.sort();
    let mut expected: Vec<String> = (0..8).map(|i| format!("value-{i}")).collect();
    expected.sort();
    assert_eq!(values, expected);
}
