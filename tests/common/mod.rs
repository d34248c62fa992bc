//! Shared utilities for integration testing.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use session_proxy::config::ProxyConfig;
use session_proxy::lifecycle::Shutdown;
use session_proxy::{CredentialStore, HttpServer};

/// Request head as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Canned response served by the mock upstream.
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Start a programmable mock upstream speaking HTTP/1.1 over raw TCP.
/// Returns the bound address.
pub async fn start_upstream<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(RecordedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                                Err(_) => return,
                            }
                        }
                        let head = String::from_utf8_lossy(&buf).to_string();
                        let request = parse_head(&head);
                        let response = handler(request).await;

                        let mut out = format!(
                            "HTTP/1.1 {} {}\r\n",
                            response.status,
                            status_text(response.status)
                        );
                        for (name, value) in &response.headers {
                            out.push_str(&format!("{}: {}\r\n", name, value));
                        }
                        out.push_str(&format!(
                            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.body.len(),
                            response.body
                        ));
                        let _ = socket.write_all(out.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

fn parse_head(head: &str) -> RecordedRequest {
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            line.split_once(':')
                .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    RecordedRequest {
        method,
        path,
        headers,
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Proxy instance running in the background for a test.
pub struct TestProxy {
    pub addr: SocketAddr,
    pub store: Arc<CredentialStore>,
    pub shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the proxy on an ephemeral port with the given config.
pub async fn start_proxy(config: ProxyConfig) -> TestProxy {
    let store = Arc::new(CredentialStore::new(&config.username, &config.password));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, store.clone()).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy {
        addr,
        store,
        shutdown,
    }
}

/// Base config pointing at a mock upstream.
pub fn proxy_config(upstream: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig {
        upstream_url: format!("http://{}/", upstream),
        external_url: "http://proxy.test:8089/".to_string(),
        username: "inkode".to_string(),
        password: "s3cret".to_string(),
        ..Default::default()
    };
    config.normalize();
    config
}

/// HTTP client that neither follows redirects nor keeps cookies, so the
/// proxy's own behavior is observable.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
