//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Request heads (request line + headers) received by a mock upstream.
pub type RecordedRequests = Arc<Mutex<Vec<String>>>;

/// Start a programmable mock upstream service.
///
/// The closure decides status and body per call; every received request
/// head is recorded for later assertions on paths and propagated headers.
pub async fn start_programmable_upstream<F, Fut>(addr: SocketAddr, f: F) -> RecordedRequests
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let recorded: RecordedRequests = Arc::new(Mutex::new(Vec::new()));
    let seen = recorded.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        // Upstream calls are bodyless GETs: the head is the
                        // whole request.
                        let mut head = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => head.extend_from_slice(&buf[..n]),
                            }
                        }
                        seen.lock()
                            .unwrap()
                            .push(String::from_utf8_lossy(&head).into_owned());

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    recorded
}

/// Start a mock upstream that always answers with a fixed response.
pub async fn start_upstream(
    addr: SocketAddr,
    status: u16,
    body: &'static str,
) -> RecordedRequests {
    start_programmable_upstream(addr, move || async move { (status, body.to_string()) }).await
}
