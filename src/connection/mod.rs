//! Connection to a Solr server.
//!
//! A [`Connection`] owns a server URL, the text encoding used for XML bodies,
//! and the response syntax version sent with every query. It turns
//! [`get`](Connection::get) and [`post`](Connection::post) calls into
//! [`TransportRequest`]s, drains the whole response, and maps transport
//! failures to [`SolrError`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use solr_connection::Connection;
//!
//! # fn example() -> solr_connection::Result<()> {
//! let connection = Connection::new("http://localhost:8983/solr")?;
//!
//! let xml = connection.get("/select", [("q", "title:rust"), ("rows", "10")])?;
//! println!("{xml}");
//!
//! connection.post("/update", "<add><doc><field name=\"id\">1</field></doc></add>")?;
//! connection.post("/update", "<commit/>")?;
//! # Ok(())
//! # }
//! ```

use encoding_rs::{Encoding, REPLACEMENT, UTF_8, UTF_16BE, UTF_16LE};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::ConnectionConfig,
    error::{Result, SolrError},
    io::read_fully,
    transport::{HttpTransport, Transport, TransportError, TransportRequest, TransportResponse},
};

pub mod query;

/// Response syntax version requested when none is configured.
pub const DEFAULT_VERSION: &str = "2.2";

/// `Content-Type` sent with every update.
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Status Solr uses for unknown fields and malformed queries.
const BAD_REQUEST: u16 = 400;

/// Blocking connection to one Solr server.
///
/// Each call is independent: the connection keeps no cache and no per-request
/// state. Setters take `&mut self`, so the configuration cannot change while a
/// request borrowed from the same connection is in flight.
#[derive(Debug, Clone)]
pub struct Connection<T = HttpTransport> {
    server_url: String,
    base_url: Url,
    xml_encoding: &'static Encoding,
    version: String,
    transport: T,
}

impl Connection<HttpTransport> {
    /// Creates a connection using the default [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::InvalidUrl`] if `server_url` is not an absolute
    /// `http`/`https` URI, or [`SolrError::Connection`] if the HTTP client
    /// cannot be created.
    pub fn new(server_url: &str) -> Result<Self> {
        let base_url = parse_server_url(server_url)?;
        let transport = HttpTransport::new().map_err(SolrError::Connection)?;
        Ok(Self::from_parts(server_url, base_url, transport))
    }

    /// Creates a connection from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Config`] for out-of-range HTTP settings,
    /// [`SolrError::UnknownEncoding`] for an unknown encoding label,
    /// [`SolrError::InvalidUrl`] for a bad server URL, or
    /// [`SolrError::Connection`] if the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use solr_connection::{Connection, ConnectionConfig};
    ///
    /// # fn example() -> solr_connection::Result<()> {
    /// let config = ConnectionConfig::from_toml(
    ///     r#"
    ///     server_url = "http://localhost:8983/solr"
    ///     encoding = "iso-8859-1"
    ///     "#,
    /// )?;
    /// let connection = Connection::from_config(&config)?;
    /// assert_eq!(connection.xml_encoding().name(), "windows-1252");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &ConnectionConfig) -> Result<Self> {
        config.http.validate()?;
        let xml_encoding = config.encoding()?;
        let base_url = parse_server_url(&config.server_url)?;
        let transport = HttpTransport::with_config(&config.http).map_err(SolrError::Connection)?;

        let mut connection = Self::from_parts(&config.server_url, base_url, transport);
        connection.xml_encoding = xml_encoding;
        connection.version.clone_from(&config.version);
        Ok(connection)
    }
}

impl<T: Transport> Connection<T> {
    /// Creates a connection that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::InvalidUrl`] if `server_url` is not an absolute
    /// `http`/`https` URI.
    pub fn with_transport(server_url: &str, transport: T) -> Result<Self> {
        let base_url = parse_server_url(server_url)?;
        Ok(Self::from_parts(server_url, base_url, transport))
    }

    fn from_parts(server_url: &str, base_url: Url, transport: T) -> Self {
        Self {
            server_url: server_url.to_owned(),
            base_url,
            xml_encoding: UTF_8,
            version: DEFAULT_VERSION.to_owned(),
            transport,
        }
    }

    /// Returns the server URL exactly as it was set.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Replaces the server URL.
    ///
    /// The value is stored verbatim once it parses as an absolute `http` or
    /// `https` URI.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::InvalidUrl`] and keeps the previous URL if
    /// `server_url` is malformed, relative, or uses another scheme.
    pub fn set_server_url(&mut self, server_url: &str) -> Result<()> {
        self.base_url = parse_server_url(server_url)?;
        server_url.clone_into(&mut self.server_url);
        Ok(())
    }

    /// Returns the response syntax version sent with every query.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Sets the response syntax version sent with every query.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    /// Returns the encoding used for request bodies and responses.
    #[must_use]
    pub const fn xml_encoding(&self) -> &'static Encoding {
        self.xml_encoding
    }

    /// Sets the encoding used for request bodies and responses.
    ///
    /// UTF-16LE and UTF-16BE bodies are written without a byte order mark.
    pub fn set_xml_encoding(&mut self, encoding: &'static Encoding) {
        self.xml_encoding = encoding;
    }

    /// Sets the encoding from a WHATWG label such as `"utf-8"` or `"latin1"`.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::UnknownEncoding`] and keeps the previous encoding
    /// if the label is not recognized.
    pub fn set_xml_encoding_label(&mut self, label: &str) -> Result<()> {
        self.xml_encoding = encoding_for_label(label)?;
        Ok(())
    }

    /// Returns the transport requests are sent through.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a query and returns the decoded response body.
    ///
    /// `relative_url` is appended verbatim to the server URL's path, so
    /// `"http://host/solr"` plus `"/select"` targets `/solr/select`. The
    /// request carries the form-encoded `parameters` followed by
    /// `version=<version>`; a caller-supplied `version` is replaced. Pass
    /// `None::<(&str, &str)>` for no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::InvalidField`] if Solr responds `400 Bad Request`,
    /// or [`SolrError::Connection`] for any other transport failure.
    #[instrument(skip(self, parameters), fields(server_url = %self.server_url))]
    pub fn get<I, K, V>(&self, relative_url: &str, parameters: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.target_url(relative_url);
        let pairs = query::merge_parameters(parameters, &self.version);
        url.set_query(Some(&query::encode_query(&pairs)));

        let response =
            self.transport.execute(TransportRequest::get(url)).map_err(query_error)?;
        self.read_body(response)
    }

    /// Posts an XML document and returns the decoded response body.
    ///
    /// The body is encoded with the configured encoding and sent as
    /// `text/xml; charset=utf-8` with a `Content-Length` equal to the encoded
    /// byte count. No query string is added.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Connection`] for any transport failure, including
    /// `400 Bad Request`.
    #[instrument(skip(self, body), fields(server_url = %self.server_url))]
    pub fn post(&self, relative_url: &str, body: &str) -> Result<String> {
        debug!(body, "posting XML");
        let url = self.target_url(relative_url);
        let request =
            TransportRequest::post(url, XML_CONTENT_TYPE, encode_body(self.xml_encoding, body));

        let response = self.transport.execute(request).map_err(SolrError::Connection)?;
        self.read_body(response)
    }

    fn target_url(&self, relative_url: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{relative_url}", url.path());
        url.set_path(&path);
        url
    }

    fn read_body(&self, response: TransportResponse) -> Result<String> {
        let TransportResponse { status, body, .. } = response;
        let bytes = read_fully(body).map_err(|e| SolrError::Connection(TransportError::Io(e)))?;
        debug!(status, bytes = bytes.len(), "read response body");

        let (text, _) = self.xml_encoding.decode_without_bom_handling(&bytes);
        Ok(text.into_owned())
    }
}

/// Maps a failed query to [`SolrError`], singling out `400 Bad Request`.
fn query_error(error: TransportError) -> SolrError {
    if error.status() == Some(BAD_REQUEST) {
        let description = error.reason().unwrap_or_default();
        warn!(%description, "Solr rejected query");
        return SolrError::InvalidField { description, source: error };
    }
    SolrError::Connection(error)
}

/// Parses a server URL, accepting only absolute `http`/`https` URIs.
fn parse_server_url(server_url: &str) -> Result<Url> {
    let url = Url::parse(server_url).map_err(|e| SolrError::InvalidUrl {
        url: server_url.to_owned(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(SolrError::InvalidUrl {
            url: server_url.to_owned(),
            reason: "only HTTP or HTTPS protocols are supported".to_owned(),
        }),
    }
}

/// Encodes a request body in `encoding`.
///
/// `encoding_rs` only has decoders for UTF-16, so those are written here.
fn encode_body(encoding: &'static Encoding, body: &str) -> Vec<u8> {
    if encoding == UTF_16LE {
        body.encode_utf16().flat_map(u16::to_le_bytes).collect()
    } else if encoding == UTF_16BE {
        body.encode_utf16().flat_map(u16::to_be_bytes).collect()
    } else {
        encoding.encode(body).0.into_owned()
    }
}

/// Looks up an encoding by WHATWG label.
///
/// Labels that map to `replacement` (ISO-2022-KR and friends) are rejected:
/// it decodes everything to U+FFFD and cannot encode.
pub(crate) fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .filter(|encoding| *encoding != REPLACEMENT)
        .ok_or_else(|| SolrError::UnknownEncoding(label.to_owned()))
}
