//! Tiny HTTP/1.1 responder for the tests (one request per connection).
//!
//! * `GET /secret` answers with the configured handshake.
//! * `POST /execute` answers with the configured execute reply.
//! * Anything else is a 404.
//!
//! A redirecting server adds a `Location` header pointing at the same path on
//! another loopback port to every 3xx it sends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use scriptlink_common::config::Config;
use scriptlink_common::network::range::PortRange;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const SENTINEL: &str = "0xdeadbeef";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Replies {
    handshake: (u16, String),
    execute: (u16, String),
    redirect_to: Option<u16>,
}

pub struct ToyServer {
    pub port: u16,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl ToyServer {
    pub async fn bind(handshake: (u16, &str), execute: (u16, &str)) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        Self::serve(listener, handshake, execute)
    }

    pub fn serve(listener: TcpListener, handshake: (u16, &str), execute: (u16, &str)) -> Self {
        let replies = Replies {
            handshake: (handshake.0, handshake.1.to_string()),
            execute: (execute.0, execute.1.to_string()),
            redirect_to: None,
        };
        Self::spawn(listener, replies)
    }

    /// Like [`ToyServer::serve`], with 3xx replies redirecting to `target_port`.
    pub fn redirecting(
        listener: TcpListener,
        handshake: (u16, &str),
        execute: (u16, &str),
        target_port: u16,
    ) -> Self {
        let replies = Replies {
            handshake: (handshake.0, handshake.1.to_string()),
            execute: (execute.0, execute.1.to_string()),
            redirect_to: Some(target_port),
        };
        Self::spawn(listener, replies)
    }

    fn spawn(listener: TcpListener, replies: Replies) -> Self {
        let port: u16 = listener.local_addr().unwrap().port();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let replies = replies.clone();
                let log = log.clone();
                tokio::spawn(async move {
                    let _ = handle_client(stream, &replies, &log).await;
                });
            }
        });

        Self {
            port,
            requests,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for ToyServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_client(
    mut stream: TcpStream,
    replies: &Replies,
    log: &Mutex<Vec<Recorded>>,
) -> std::io::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end: usize = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head: String = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method: String = request_line.next().unwrap_or_default().to_string();
    let path: String = request_line.next().unwrap_or_default().to_string();

    let mut content_length: usize = 0;
    let mut content_type: Option<String> = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "content-type" => content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end: usize = buf.len().min(header_end + content_length);
    let body: String = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    let (status, reply): (u16, &str) = match (method.as_str(), path.as_str()) {
        ("GET", "/secret") => (replies.handshake.0, replies.handshake.1.as_str()),
        ("POST", "/execute") => (replies.execute.0, replies.execute.1.as_str()),
        _ => (404, "not found"),
    };

    let location: String = match replies.redirect_to {
        Some(target) if (300..400).contains(&status) => {
            format!("Location: http://127.0.0.1:{target}{path}\r\n")
        }
        _ => String::new(),
    };

    log.lock().unwrap().push(Recorded {
        method,
        path,
        content_type,
        body,
    });

    let response: String = format!(
        "HTTP/1.1 {status} {}\r\n{location}Content-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
        reason(status),
        reply.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        307 => "Temporary Redirect",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Binds `count` listeners on consecutive loopback ports.
pub async fn bind_consecutive(count: u16) -> Vec<TcpListener> {
    for _ in 0..50 {
        let first = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base: u16 = first.local_addr().unwrap().port();
        if base.checked_add(count - 1).is_none() {
            continue;
        }

        let mut listeners: Vec<TcpListener> = vec![first];
        for offset in 1..count {
            match TcpListener::bind(("127.0.0.1", base + offset)).await {
                Ok(listener) => listeners.push(listener),
                Err(_) => break,
            }
        }
        if listeners.len() == usize::from(count) {
            return listeners;
        }
    }
    panic!("could not bind {count} consecutive loopback ports");
}

/// A port nothing listens on (at the time of the call).
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

pub fn config_for(ports: PortRange) -> Config {
    Config {
        ports,
        probe_timeout: Some(Duration::from_secs(5)),
        ..Config::default()
    }
}
