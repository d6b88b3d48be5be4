//! Shared helpers for socket-bound integration tests.

#![allow(dead_code)]

use std::net::TcpListener as StdTcpListener;
use std::panic::Location;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::MockServer;

const REQUIRE_ENV: &str = "SCREENSHOT_REQUIRE_SOCKET_TESTS";

/// Returns true when localhost sockets are unavailable and the test should
/// be skipped. Panics instead when `SCREENSHOT_REQUIRE_SOCKET_TESTS` is set.
#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    let Err(error) = StdTcpListener::bind("127.0.0.1:0") else {
        return false;
    };

    let caller = Location::caller();
    let required = std::env::var(REQUIRE_ENV)
        .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
    assert!(
        !required,
        "cannot bind localhost ({error}) at {caller}; unset {REQUIRE_ENV} to skip instead"
    );

    eprintln!("skipping socket-bound test at {caller}: cannot bind localhost ({error})");
    true
}

pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        return None;
    }
    Some(MockServer::start().await)
}

/// Serves one connection that announces `declared` body bytes, sends `body`
/// and closes. Returns the base URL to point a client at.
pub async fn serve_truncated_once(declared: usize, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncating server");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/jpeg\r\nContent-Length: {declared}\r\nConnection: close\r\n\r\n"
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(body).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}/api/v1")
}
