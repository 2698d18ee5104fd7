//! Form field validators. All three are total: malformed input is `false`.

use crate::numeric::parse_int;

/// Dotted-quad IPv4 check: exactly four `.`-separated parts, each parsing to
/// 0..=255. Parts are read with `parseInt` rules, so `"1a"` counts as 1.
pub fn is_valid_ip(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts
        .iter()
        .all(|part| matches!(parse_int(part), Some(0..=255)))
}

/// Port number check: the leading integer must be in 1..=65535.
pub fn is_valid_port(value: &str) -> bool {
    matches!(parse_int(value), Some(1..=65535))
}

/// Accepts only `http://...` and `https://...` (scheme is case-sensitive).
pub fn is_valid_url(value: &str) -> bool {
    match value.split_once("://") {
        Some((scheme, _)) => scheme == "http" || scheme == "https",
        None => false,
    }
}
