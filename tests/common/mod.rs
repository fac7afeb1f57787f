//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use listen_feed::config::TokenConfig;
use listen_feed::{ApiServer, AppConfig, Shutdown, WebServer};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

pub const ATOM_TWO_SONGS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Listens</title>
  <entry>
    <title>Artist A - Song 1</title>
    <updated>2024-01-01T12:00:00Z</updated>
  </entry>
  <entry>
    <title>Artist B - Song 2</title>
    <updated>2024-01-02T12:00:00Z</updated>
  </entry>
</feed>"#;

/// A mock feed provider recording the request targets it served.
pub struct MockProvider {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock provider answering every request with `f(target)`.
pub async fn start_mock_provider<F>(f: F) -> MockProvider
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or_default()
                    .to_string();
                recorded.lock().unwrap().push(target.clone());

                let (status, body) = f(&target);
                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    503 => "503 Service Unavailable",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/atom+xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockProvider { addr, requests }
}

fn token(token: &str, user_id: &str, username: &str, roles: &[&str]) -> TokenConfig {
    TokenConfig {
        token: token.to_string(),
        user_id: user_id.to_string(),
        username: username.to_string(),
        given_name: String::new(),
        family_name: String::new(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Config with one admin and one regular token, pointed at `provider_url`.
pub fn test_config(provider_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.provider.base_url = provider_url.to_string();
    config.timeouts.upstream_secs = 2;
    config.auth.tokens = vec![
        token(ADMIN_TOKEN, "1", "admin", &["admin"]),
        token(USER_TOKEN, "2", "listener", &[]),
    ];
    config
}

/// A server running in the background until dropped.
pub struct RunningServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_api(config: &AppConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = ApiServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move { server.run(listener, rx).await });
    RunningServer { addr, shutdown }
}

/// Start a web frontend talking to the API at `api`.
pub async fn spawn_web(config: &AppConfig, api: SocketAddr) -> RunningServer {
    let mut config = config.clone();
    config.web.api_hostname = api.ip().to_string();
    config.web.api_port = api.port();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = WebServer::new(&config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move { server.run(listener, rx).await });
    RunningServer { addr, shutdown }
}

/// HTTP client that leaves redirects to the test.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
