//! Transport abstraction layer.
//!
//! [`Connection`](crate::Connection) never touches sockets itself. It builds a
//! [`TransportRequest`] and hands it to a [`Transport`], which executes it and
//! returns the response status plus a readable body stream.
//!
//! # Architecture
//!
//! The transport layer separates protocol mechanics from Solr semantics:
//! - **Transport**: performs the HTTP exchange and rejects error statuses
//! - **`Connection`**: builds URLs and bodies, drains responses, maps failures
//!   to [`SolrError`](crate::SolrError)
//!
//! [`HttpTransport`] is the default implementation. Any other type can be
//! injected, which is how the tests stub the network.
//!
//! # Examples
//!
//! ```rust,no_run
//! use solr_connection::transport::{HttpTransport, Transport, TransportRequest};
//! use url::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new()?;
//! let url = Url::parse("http://localhost:8983/solr/admin/ping")?;
//!
//! let response = transport.execute(TransportRequest::get(url))?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

use std::{fmt, io::Read};

use reqwest::Version;
use thiserror::Error;
use url::Url;

pub mod config;
pub mod http;

pub use config::HttpConfig;
pub use http::HttpTransport;

/// Request method supported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`, used for queries.
    Get,
    /// `POST`, used for XML updates.
    Post,
}

impl Method {
    /// Returns the method token as sent on the request line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Request method.
    pub method: Method,
    /// Absolute target URL, including any query string.
    pub url: Url,
    /// HTTP protocol version for the request line.
    pub version: Version,
    /// `Content-Type` header value, if any.
    pub content_type: Option<String>,
    /// Declared `Content-Length`, if any.
    pub content_length: Option<u64>,
    /// Request entity. Empty for GET.
    pub body: Vec<u8>,
}

impl TransportRequest {
    /// Creates an HTTP/1.0 GET request without a body.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            version: Version::HTTP_10,
            content_type: None,
            content_length: None,
            body: Vec::new(),
        }
    }

    /// Creates an HTTP/1.0 POST request whose declared length matches `body`.
    #[must_use]
    pub fn post(url: Url, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url,
            version: Version::HTTP_10,
            content_type: Some(content_type.to_owned()),
            content_length: Some(body.len() as u64),
            body,
        }
    }
}

/// Response accepted by the transport.
///
/// The body is a stream; dropping the response closes it.
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status description.
    pub reason: String,
    /// Response body stream.
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}

/// Transport-level failure.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server responded, but with a status the transport rejects.
    #[error("server responded with {status} {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Status description.
        reason: String,
    },

    /// The request could not be completed (DNS, connect, timeout, protocol).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O failure while sending or receiving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Returns the response status if the failure carries a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Io(_) => None,
        }
    }

    /// Returns the response status description if the failure carries a response.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Status { reason, .. } => Some(reason.clone()),
            Self::Http(e) => e.status().map(|s| s.canonical_reason().unwrap_or("").to_owned()),
            Self::Io(_) => None,
        }
    }
}

/// Executes HTTP requests on behalf of a [`Connection`](crate::Connection).
///
/// Implementations must:
/// - send the request with the method, version, headers, and body given
/// - return `Ok` only for responses they accept (for [`HttpTransport`], 2xx)
/// - report rejected responses as [`TransportError::Status`] so the status is
///   visible to the caller
pub trait Transport: Send + Sync {
    /// Executes `request` and returns the accepted response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request fails or the response status
    /// is rejected.
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str {
        "http"
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        (**self).execute(request)
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        (**self).execute(request)
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}
