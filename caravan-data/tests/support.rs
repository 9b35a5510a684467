//! Shared helpers for `caravan-data` integration tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

/// How the scripted service answers its single request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with the given status line code and JSON body.
    Json { status: u16, body: String },
    /// Accept the connection and stay silent for the given duration.
    Silence(Duration),
}

/// A loopback HTTP server answering exactly one request.
pub struct OneShotServer {
    addr: SocketAddr,
    requests: Receiver<String>,
}

impl OneShotServer {
    /// Bind to an ephemeral port and answer the first request with `reply`.
    pub fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let (sender, requests) = mpsc::channel();
        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let request = read_request(&mut stream);
            sender.send(request).ok();
            match reply {
                Reply::Json { status, body } => {
                    let response = format!(
                        "HTTP/1.1 {status} Scripted\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).ok();
                    stream.flush().ok();
                }
                Reply::Silence(duration) => thread::sleep(duration),
            }
        });
        Self { addr, requests }
    }

    /// Base URL of the scripted API.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Raw text of the request the server received, if any.
    pub fn received(&self) -> Option<String> {
        self.requests.recv_timeout(Duration::from_secs(5)).ok()
    }
}

/// Base URL of a port nothing listens on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}/api")
}

fn read_request(stream: &mut TcpStream) -> String {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .ok();
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let Ok(read) = stream.read(&mut chunk) else {
            break;
        };
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if request_complete(&buffer) {
            break;
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn request_complete(buffer: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buffer);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}
