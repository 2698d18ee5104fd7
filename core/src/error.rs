//! Error types for the parsers and the request helper.
//!
//! # Design
//! A non-200 HTTP status is deliberately absent from `RequestError`: the
//! request helper reports it through the `Notifier` and returns `None`.
//! `RequestError` only covers failures where no status could be read at all.

use thiserror::Error;

/// Errors returned by `parse_url`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The input has no `://` separating the protocol from the authority.
    #[error("missing \"://\" in URL: {0}")]
    MissingScheme(String),
}

/// Errors returned by the query-string parsers and `percent::decode_uri`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A `%` at byte `offset` is not followed by two hex digits.
    #[error("malformed percent escape at byte {offset}")]
    MalformedEscape { offset: usize },

    /// The decoded escapes do not form valid UTF-8.
    #[error("percent escapes do not decode to UTF-8")]
    InvalidUtf8,

    /// Strict parsing only: a segment has no `=`.
    #[error("query segment {segment:?} has no '='")]
    MissingSeparator { segment: String },
}

/// Errors returned by `QueryClient::request` and `request_async`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The transport failed before a status line was received.
    #[error("transport failed: {0}")]
    Transport(String),
}
