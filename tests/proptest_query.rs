//! Property tests for query construction and stream draining.

mod common;

use std::io::{self, Read};

use common::{RecordingTransport, query_pairs};
use proptest::prelude::*;
use solr_connection::{Connection, io::read_fully};

/// Reader returning one scripted chunk per call; empty chunks surface as
/// `Interrupted` so they do not end the stream.
struct ChunkedReader {
    chunks: std::vec::IntoIter<Vec<u8>>,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.next() {
            None => Ok(0),
            Some(chunk) if chunk.is_empty() => Err(io::ErrorKind::Interrupted.into()),
            Some(chunk) => {
                assert!(chunk.len() <= buf.len(), "chunk larger than read buffer");
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
        }
    }
}

fn param_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_.]{1,12}",
        "[ &=+%?#/:\"'<>]{1,8}",
        "[a-z &=]{0,10}",
        "\\PC{0,10}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_query_round_trip(
        parameters in prop::collection::vec((param_text(), param_text()), 0..8),
        version in "[0-9]\\.[0-9]",
    ) {
        let mut conn = Connection::with_transport(
            "http://localhost:8983/solr",
            RecordingTransport::body("<response/>"),
        ).unwrap();
        conn.set_version(version.clone());

        conn.get("/select", parameters.iter().map(|(k, v)| (k.as_str(), v.as_str()))).unwrap();

        let decoded = query_pairs(&conn.transport().last_request());
        let mut expected: Vec<(String, String)> =
            parameters.into_iter().filter(|(k, _)| k != "version").collect();
        expected.push(("version".to_owned(), version));

        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn test_version_present_exactly_once(
        caller_versions in prop::collection::vec("[0-9.]{0,4}", 0..4),
        other in prop::collection::vec(("[a-z]{1,6}", "[a-z0-9 ]{0,6}"), 0..4),
    ) {
        let conn = Connection::with_transport(
            "http://localhost:8983/solr",
            RecordingTransport::body("<response/>"),
        ).unwrap();

        let mut parameters: Vec<(String, String)> = other;
        parameters.extend(caller_versions.into_iter().map(|v| ("version".to_owned(), v)));

        conn.get("/select", parameters.iter().map(|(k, v)| (k, v))).unwrap();

        let decoded = query_pairs(&conn.transport().last_request());
        let versions: Vec<_> = decoded.iter().filter(|(k, _)| k == "version").collect();
        prop_assert_eq!(versions.len(), 1);
        prop_assert_eq!(versions[0].1.as_str(), "2.2");
    }

    #[test]
    fn test_read_fully_reconstructs_chunks(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..512), 0..32),
    ) {
        let expected: Vec<u8> = chunks.concat();
        let reader = ChunkedReader { chunks: chunks.into_iter() };

        let bytes = read_fully(reader).unwrap();
        prop_assert_eq!(bytes, expected);
    }
}
