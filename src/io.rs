//! Stream helpers.

use std::io::{self, Read};

/// Chunk size used when draining a stream.
const CHUNK_SIZE: usize = 32 * 1024;

/// Reads `reader` to the end and returns every byte it produced.
///
/// The stream length is never assumed; reading stops at the first read that
/// returns zero bytes. Interrupted reads are retried.
///
/// # Errors
///
/// Returns the first I/O error other than [`io::ErrorKind::Interrupted`].
///
/// # Examples
///
/// ```
/// use solr_connection::io::read_fully;
///
/// let bytes = read_fully(&b"<response/>"[..]).unwrap();
/// assert_eq!(bytes, b"<response/>");
/// ```
pub fn read_fully<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut out = Vec::new();
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(out),
            Ok(read) => out.extend_from_slice(&buffer[..read]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}
