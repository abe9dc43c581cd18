//! Solr Connection: blocking HTTP transport for Solr
//!
//! A thin request/response layer for Solr's HTTP interface. Queries go out as
//! GET requests with form-encoded parameters, updates as POSTed XML documents.
//! Every response is read to the end and decoded before it is returned, and
//! every failure comes back as a typed [`SolrError`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  Query builders /    │  callers: build parameters and XML, parse results
//! │  result parsers      │
//! └──────────┬───────────┘
//!            │ get(path, params) / post(path, xml)
//! ┌──────────▼───────────┐
//! │     Connection       │  URL building, version injection, encoding,
//! │                      │  full-body drain, error mapping
//! └──────────┬───────────┘
//!            │ TransportRequest / TransportResponse
//! ┌──────────▼───────────┐
//! │  Transport           │  HttpTransport (reqwest blocking, HTTP/1.0)
//! └──────────┬───────────┘  or any injected implementation
//!            │
//! ┌──────────▼───────────┐
//! │     Solr server      │
//! └──────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use solr_connection::Connection;
//!
//! # fn example() -> solr_connection::Result<()> {
//! let connection = Connection::new("http://localhost:8983/solr")?;
//!
//! // GET /solr/select?q=author%3Aknuth&version=2.2
//! let xml = connection.get("/select", [("q", "author:knuth")])?;
//! println!("{xml}");
//!
//! // POST /solr/update
//! connection.post("/update", "<delete><query>*:*</query></delete>")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use solr_connection::{Connection, SolrError};
//!
//! # fn example() -> solr_connection::Result<()> {
//! let connection = Connection::new("http://localhost:8983/solr")?;
//!
//! match connection.get("/select", [("q", "titel:rust")]) {
//!     Ok(xml) => println!("{xml}"),
//!     Err(SolrError::InvalidField { description, .. }) => {
//!         eprintln!("Solr rejected the query: {description}");
//!     }
//!     Err(SolrError::Connection(e)) => {
//!         eprintln!("Solr unreachable: {e}");
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`connection`]: the [`Connection`] and query string construction
//! - [`transport`]: transport abstraction and the reqwest-based [`HttpTransport`]
//! - [`config`]: TOML configuration
//! - [`io`]: stream draining
//! - [`error`]: error types
//!
//! # Logging
//!
//! The crate emits [`tracing`] spans and events (request spans at the default
//! level, bodies and byte counts at `debug`). It never installs a subscriber.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod config;
pub mod connection;
pub mod error;
pub mod io;
pub mod transport;

pub use config::ConnectionConfig;
pub use connection::Connection;
pub use error::{Result, SolrError};
pub use transport::{HttpTransport, Transport};
