//! Connection configuration.
//!
//! [`ConnectionConfig`] is deserialized from TOML and turned into a
//! [`Connection`](crate::Connection) with
//! [`Connection::from_config`](crate::Connection::from_config).
//!
//! # Examples
//!
//! ```toml
//! server_url = "http://localhost:8983/solr"
//! version = "2.2"
//! encoding = "utf-8"
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//! ```

use encoding_rs::Encoding;
use serde::Deserialize;

use crate::{
    connection::{DEFAULT_VERSION, encoding_for_label},
    error::{Result, SolrError},
    transport::HttpConfig,
};

/// Settings for a single Solr connection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Absolute `http`/`https` URL of the Solr server or core.
    pub server_url: String,

    /// Response syntax version sent with every query.
    #[serde(default = "default_version")]
    pub version: String,

    /// WHATWG label of the encoding for request bodies and responses.
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl ConnectionConfig {
    /// Creates a configuration with defaults for everything but the URL.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            version: default_version(),
            encoding: default_encoding(),
            http: HttpConfig::default(),
        }
    }

    /// Parses configuration from TOML.
    ///
    /// Only syntax and types are checked here; values are validated when the
    /// connection is built.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::Config`] if the TOML is malformed or misses
    /// `server_url`.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| SolrError::Config(e.message().to_owned()))
    }

    /// Resolves the configured encoding label.
    ///
    /// # Errors
    ///
    /// Returns [`SolrError::UnknownEncoding`] if the label is not recognized.
    pub fn encoding(&self) -> Result<&'static Encoding> {
        encoding_for_label(&self.encoding)
    }
}

fn default_version() -> String {
    DEFAULT_VERSION.to_owned()
}

fn default_encoding() -> String {
    "utf-8".to_owned()
}
