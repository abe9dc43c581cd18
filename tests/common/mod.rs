//! Shared test doubles: in-process transports and a one-shot loopback server.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::{
    io::{Cursor, Read, Write},
    net::TcpListener,
    sync::Mutex,
    thread::{self, JoinHandle},
};

use solr_connection::transport::{
    Method, Transport, TransportError, TransportRequest, TransportResponse,
};

/// Transport that records every request and answers from a fixed script.
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<TransportRequest>>,
}

#[derive(Debug)]
enum Reply {
    /// 200 with the request entity as body.
    Echo,
    /// 200 with fixed bytes.
    Body(Vec<u8>),
    /// Rejected response with the given status and description.
    Status(u16, String),
    /// No response at all.
    Refused,
}

impl RecordingTransport {
    pub fn echo() -> Self {
        Self::with_reply(Reply::Echo)
    }

    pub fn body(body: impl Into<Vec<u8>>) -> Self {
        Self::with_reply(Reply::Body(body.into()))
    }

    pub fn status(status: u16, reason: &str) -> Self {
        Self::with_reply(Reply::Status(status, reason.to_owned()))
    }

    pub fn refused() -> Self {
        Self::with_reply(Reply::Refused)
    }

    fn with_reply(reply: Reply) -> Self {
        Self { reply, requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests().pop().expect("no request recorded")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let echoed = request.body.clone();
        self.requests.lock().unwrap().push(request);

        let body: Vec<u8> = match &self.reply {
            Reply::Echo => echoed,
            Reply::Body(body) => body.clone(),
            Reply::Status(status, reason) => {
                return Err(TransportError::Status { status: *status, reason: reason.clone() });
            }
            Reply::Refused => {
                return Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
        };

        Ok(TransportResponse {
            status: 200,
            reason: "OK".to_owned(),
            body: Box::new(Cursor::new(body)),
        })
    }
}

/// Returns the decoded `(key, value)` pairs of a recorded request's query.
pub fn query_pairs(request: &TransportRequest) -> Vec<(String, String)> {
    request.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
}

/// A raw request as seen by [`LoopbackServer`].
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn method(&self) -> &str {
        self.request_line.split(' ').next().unwrap_or_default()
    }
}

/// Serves exactly one request on 127.0.0.1 with a canned response.
#[derive(Debug)]
pub struct LoopbackServer {
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl LoopbackServer {
    /// `status_line` is e.g. `"200 OK"`.
    pub fn respond_once(status_line: &str, body: &[u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/solr", listener.local_addr().unwrap());

        let response = {
            let mut response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/xml; charset=utf-8\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .into_bytes();
            response.extend_from_slice(body);
            response
        };

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let captured = read_request(&mut stream);
            stream.write_all(&response).unwrap();
            stream.flush().unwrap();
            captured
        });

        Self { base_url, handle }
    }

    /// Waits for the served request.
    pub fn captured(self) -> CapturedRequest {
        self.handle.join().unwrap()
    }
}

fn read_request(stream: &mut impl Read) -> CapturedRequest {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "client closed before sending headers");
        raw.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8(raw[..header_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_owned();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map_or(0, |(_, v)| v.parse::<usize>().unwrap());

    let mut body = raw[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "client closed before sending body");
        body.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest { request_line, headers, body }
}

/// Asserts the recorded method, for readability in tests.
pub fn assert_method(request: &TransportRequest, method: Method) {
    assert_eq!(request.method, method, "unexpected method for {}", request.url);
}
