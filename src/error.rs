//! Error types for the Solr connection layer.
//!
//! Every fallible operation in this crate returns [`Result`], whose error type
//! is [`SolrError`]. Request failures always carry the underlying
//! [`TransportError`] as their [`source`](std::error::Error::source), so the
//! original cause is available for diagnostics.
//!
//! # Error Categories
//!
//! - **Address errors** ([`SolrError::InvalidUrl`]): raised when a server URL is
//!   assigned, never when a request is made
//! - **Query errors** ([`SolrError::InvalidField`]): Solr rejected a GET with
//!   `400 Bad Request`, usually an unknown or malformed field
//! - **Network errors** ([`SolrError::Connection`]): everything else the
//!   transport reports
//! - **Configuration errors** ([`SolrError::UnknownEncoding`],
//!   [`SolrError::Config`]): invalid settings
//!
//! # Examples
//!
//! ```
//! use solr_connection::{Connection, SolrError};
//!
//! let result = Connection::new("ftp://solr.example.com/solr");
//! assert!(matches!(result, Err(SolrError::InvalidUrl { .. })));
//! ```

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for connection operations.
pub type Result<T> = std::result::Result<T, SolrError>;

/// Errors surfaced by [`Connection`](crate::Connection).
///
/// None of these are retried internally. Retry policy, if any, belongs to the
/// caller.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum SolrError {
    /// The server URL is not a well-formed absolute `http` or `https` URI.
    ///
    /// The connection keeps its previous address when this is returned from
    /// [`Connection::set_server_url`](crate::Connection::set_server_url).
    #[error("Invalid Solr URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Solr answered a query with `400 Bad Request`.
    ///
    /// Solr uses this status for unknown fields and unparsable query syntax.
    /// `description` is the status description reported by the server.
    #[error("Invalid field: {description}")]
    InvalidField {
        /// Status description of the 400 response.
        description: String,
        /// The transport failure carrying the response.
        #[source]
        source: TransportError,
    },

    /// Any other transport-level failure.
    ///
    /// Covers DNS and connect failures, timeouts, non-400 error statuses,
    /// protocol violations, and I/O errors while reading the response body.
    #[error("Solr connection failed: {0}")]
    Connection(#[source] TransportError),

    /// The configured text encoding label is not known.
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// Configuration could not be parsed or is out of bounds.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SolrError {
    /// Returns the underlying transport failure, if this is a request error.
    #[must_use]
    pub const fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::InvalidField { source, .. } | Self::Connection(source) => Some(source),
            Self::InvalidUrl { .. } | Self::UnknownEncoding(_) | Self::Config(_) => None,
        }
    }
}
