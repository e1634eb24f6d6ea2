//! Byte decoding for raw page sources.
//!
//! Exported wiki sources are nominally UTF-8 but occasionally carry stray
//! bytes from older encodings pasted into pages. Decoding is therefore
//! tolerant: invalid sequences become the Unicode replacement character
//! rather than failing the page.

use encoding_rs::UTF_8;

/// Decode raw page-source bytes as UTF-8.
///
/// A leading byte-order mark is stripped; invalid sequences are replaced
/// with � instead of causing errors.
#[must_use]
pub fn decode_source(bytes: &[u8]) -> String {
    let (decoded, _encoding_used, _had_errors) = UTF_8.decode(bytes);
    decoded.into_owned()
}
