//! Query string construction.
//!
//! Parameters are kept as an ordered list of pairs. Solr accepts repeated
//! keys (`fq`, `facet.field`, ...), so duplicates from the caller survive;
//! only the `version` key is owned by the connection.

use url::form_urlencoded::byte_serialize;

/// Query parameter carrying the response syntax version.
pub const VERSION_PARAM: &str = "version";

/// Merges caller parameters with the protocol version tag.
///
/// Caller pairs keep their order. Any caller-supplied `version` pair is
/// dropped and a single `("version", version)` pair is appended.
///
/// # Examples
///
/// ```
/// use solr_connection::connection::query::merge_parameters;
///
/// let pairs = merge_parameters([("q", "*:*"), ("version", "1.0")], "2.2");
/// assert_eq!(
///     pairs,
///     vec![("q".to_owned(), "*:*".to_owned()), ("version".to_owned(), "2.2".to_owned())]
/// );
/// ```
pub fn merge_parameters<I, K, V>(parameters: I, version: &str) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(String, String)> = parameters
        .into_iter()
        .filter(|(key, _)| key.as_ref() != VERSION_PARAM)
        .map(|(key, value)| (key.as_ref().to_owned(), value.as_ref().to_owned()))
        .collect();
    pairs.push((VERSION_PARAM.to_owned(), version.to_owned()));
    pairs
}

/// Form-encodes `pairs` into a query string without the leading `?`.
///
/// Keys and values are encoded separately with
/// `application/x-www-form-urlencoded` rules: space becomes `+`, everything
/// outside `A-Z a-z 0-9 * - . _` is percent-encoded over its UTF-8 bytes.
#[must_use]
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            let key: String = byte_serialize(key.as_bytes()).collect();
            let value: String = byte_serialize(value.as_bytes()).collect();
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}
