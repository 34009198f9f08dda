//! Percent-encoding of job identifiers for use in request paths.
//!
//! Job ids are opaque strings chosen by the service. They are always encoded
//! as a single path segment so an id can never add segments, a query string
//! or a fragment to the request URL.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters encoded in a path segment: RFC 3986 delimiters plus characters
/// that commonly break proxies.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode `segment` for interpolation into a URL path.
///
/// The dot segments `.` and `..` are encoded too, since URL normalization
/// would otherwise resolve them.
///
/// ```
/// use pandora_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("job-1"), "job-1");
/// assert_eq!(encode_path_segment("a/b"), "a%2Fb");
/// assert_eq!(encode_path_segment(".."), "%2E%2E");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    match segment {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ids_pass_through() {
        assert_eq!(encode_path_segment("1700000000-abc_DEF.1"), "1700000000-abc_DEF.1");
        assert_eq!(encode_path_segment("job:42"), "job:42");
    }

    #[test]
    fn test_delimiters_are_encoded() {
        assert_eq!(encode_path_segment("a/b"), "a%2Fb");
        assert_eq!(encode_path_segment("a?b"), "a%3Fb");
        assert_eq!(encode_path_segment("a#b"), "a%23b");
        assert_eq!(encode_path_segment("a b"), "a%20b");
        assert_eq!(encode_path_segment("100%"), "100%25");
    }

    #[test]
    fn test_dot_segments_are_encoded() {
        assert_eq!(encode_path_segment("."), "%2E");
        assert_eq!(encode_path_segment(".."), "%2E%2E");
        assert_eq!(encode_path_segment("..."), "...");
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(encode_path_segment("j\u{00e9}"), "j%C3%A9");
    }
}
