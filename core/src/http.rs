//! HTTP request and response values for the host-does-IO pattern.
//!
//! # Design
//! These types describe one round-trip as plain data. `QueryClient` builds
//! `HttpRequest` values and interprets `HttpResponse` values; whichever
//! transport the host plugs in moves the bytes. Owned `String`/`Vec` fields
//! keep the values easy to hand across the C boundary.

use std::fmt;
use std::str::FromStr;

/// HTTP method for a request.
///
/// The common verbs have their own variants; any other valid method token
/// (`PROPFIND`, `MKCOL`, ...) travels as `Extension` with its case kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Extension(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Extension(name) => name,
        }
    }

    /// `GET` and `HEAD` requests never carry a body.
    pub fn carries_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not a valid HTTP token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid HTTP method: {0:?}")]
pub struct InvalidMethod(pub String);

/// RFC 9110 `tchar`.
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

impl FromStr for HttpMethod {
    type Err = InvalidMethod;

    /// The common verbs are matched case-insensitively, as browsers
    /// normalize them. Anything else must be a non-empty token and is kept
    /// verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(is_token_char) {
            return Err(InvalidMethod(s.to_string()));
        }
        let method = match s.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "OPTIONS" => HttpMethod::Options,
            _ => HttpMethod::Extension(s.to_string()),
        };
        Ok(method)
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, filled in by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// `"<status> <status_text>"`, the text shown to the user on failure.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status, self.status_text)
    }
}
