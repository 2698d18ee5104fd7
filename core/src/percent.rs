//! `encodeURI` / `decodeURI` compatible percent coding.
//!
//! Query values are decoded the way a page's `decodeURI` does it, which is
//! narrower than full percent-decoding: escapes of the URI reserved
//! characters (`; / ? : @ & = + $ , #`) are left escaped, so `%26` stays
//! `%26` while `%20` becomes a space.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::QueryError;

/// Characters `encodeURI` leaves unescaped besides ASCII alphanumerics.
const URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Percent-encode `input` with the `encodeURI` character set.
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_SET).to_string()
}

/// Decode `input` with `decodeURI` rules.
///
/// Fails on a `%` that is not followed by two hex digits and on escape
/// sequences that do not form valid UTF-8.
pub fn decode_uri(input: &str) -> Result<String, QueryError> {
    // Re-escape the `%` of every reserved-character escape so the decoder
    // below turns it back into the original three characters.
    let mut prepared = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut last = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let byte = bytes
            .get(i + 1..i + 3)
            .and_then(hex_byte)
            .ok_or(QueryError::MalformedEscape { offset: i })?;
        if RESERVED.contains(&byte) {
            prepared.push_str(&input[last..i]);
            prepared.push_str("%25");
            last = i + 1;
        }
        i += 3;
    }
    prepared.push_str(&input[last..]);

    percent_decode_str(&prepared)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| QueryError::InvalidUtf8)
}

fn hex_byte(pair: &[u8]) -> Option<u8> {
    let hi = (pair[0] as char).to_digit(16)?;
    let lo = (pair[1] as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_unreserved_escapes() {
        assert_eq!(decode_uri("hello%20world").unwrap(), "hello world");
        assert_eq!(decode_uri("100%25").unwrap(), "100%");
        assert_eq!(decode_uri("caf%C3%A9").unwrap(), "café");
    }

    #[test]
    fn keeps_reserved_escapes() {
        assert_eq!(decode_uri("a%26b").unwrap(), "a%26b");
        assert_eq!(decode_uri("x%3dy%2F").unwrap(), "x%3dy%2F");
        assert_eq!(decode_uri("%23%20").unwrap(), "%23 ");
    }

    #[test]
    fn plus_is_not_a_space() {
        assert_eq!(decode_uri("a+b").unwrap(), "a+b");
    }

    #[test]
    fn raw_non_ascii_passes_through() {
        assert_eq!(decode_uri("żółw%20").unwrap(), "żółw ");
    }

    #[test]
    fn rejects_truncated_escape() {
        assert_eq!(
            decode_uri("abc%2").unwrap_err(),
            QueryError::MalformedEscape { offset: 3 }
        );
        assert_eq!(
            decode_uri("%zz").unwrap_err(),
            QueryError::MalformedEscape { offset: 0 }
        );
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert_eq!(decode_uri("%C3").unwrap_err(), QueryError::InvalidUtf8);
        assert_eq!(decode_uri("%FF%FE").unwrap_err(), QueryError::InvalidUtf8);
    }

    #[test]
    fn encode_leaves_uri_characters_alone() {
        assert_eq!(encode_uri("a b"), "a%20b");
        assert_eq!(encode_uri("/path?x=1&y=2#frag"), "/path?x=1&y=2#frag");
        assert_eq!(encode_uri("50%"), "50%25");
        assert_eq!(encode_uri("é"), "%C3%A9");
    }

    #[test]
    fn encode_then_decode_recovers_text_without_reserved_escapes() {
        for text in ["plain", "with space", "100%", "ünïcödé", "a%2Fb"] {
            assert_eq!(decode_uri(&encode_uri(text)).unwrap(), text);
        }
    }
}
