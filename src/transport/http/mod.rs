//! HTTP transport implementation.
//!
//! This module provides the default [`Transport`] on top of reqwest's blocking
//! client. Requests go out on HTTP/1.x with the protocol version chosen by the
//! caller; Solr is addressed with HTTP/1.0.

use hyper::ext::ReasonPhrase;
use reqwest::{
    StatusCode,
    blocking::Client,
    header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use tracing::{debug, instrument};

use super::config::HttpConfig;
use crate::transport::{Method, Transport, TransportError, TransportRequest, TransportResponse};

/// HTTP transport using reqwest's blocking client.
///
/// Responses with a non-2xx status are rejected as
/// [`TransportError::Status`]; accepted responses are returned with their body
/// still unread.
///
/// # Examples
///
/// ```rust,no_run
/// use solr_connection::transport::{HttpConfig, HttpTransport};
///
/// let config = HttpConfig { timeout_secs: 60, ..Default::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Default configuration:
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    /// - System proxy settings honoured
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created (for example, when
    /// the TLS backend fails to initialize).
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// The client is restricted to HTTP/1.x. Config values are not validated
    /// here; call [`HttpConfig::validate`] first if they come from user input.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .http1_only()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str());

        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    #[instrument(
        skip(self, request),
        fields(
            protocol = self.protocol_name(),
            method = %request.method,
            url = %request.url,
            version = ?request.version,
        )
    )]
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest { method, url, version, content_type, content_length, body } =
            request;

        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        builder = builder.version(version);

        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(length) = content_length {
            builder = builder.header(CONTENT_LENGTH, length.to_string());
        }
        if method == Method::Post {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let reason = reason_phrase(status, response.extensions().get::<ReasonPhrase>());
        debug!(status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), reason });
        }

        Ok(TransportResponse { status: status.as_u16(), reason, body: Box::new(response) })
    }

    fn protocol_name(&self) -> &'static str {
        "http/1.x"
    }
}

/// Returns the status description the server sent, or the canonical one.
///
/// hyper only records the phrase when it differs from the canonical reason.
fn reason_phrase(status: StatusCode, phrase: Option<&ReasonPhrase>) -> String {
    match phrase {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_owned(),
    }
}
