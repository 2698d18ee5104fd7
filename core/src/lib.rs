//! Host-agnostic web page helpers: element lookup, a blocking request
//! helper, query-string and URL parsing, and field validators.
//!
//! # Overview
//! Everything that a page script would reach through `document` or `window`
//! is injected as a capability trait instead (`DocumentAccessor`,
//! `HttpTransport`, `AsyncHttpTransport`, `Notifier`). The parsing and
//! validation functions are pure and need no capability at all.
//!
//! # Design
//! - `QueryClient` follows the host-does-IO split: `build_request` produces
//!   plain data, the transport executes it, `parse_response` interprets it.
//!   `request` and `request_async` wire the three steps together.
//! - Integer parsing in the validators and the URL parser goes through
//!   `numeric::parse_int`, which reproduces `parseInt` prefix semantics.
//! - Query values are decoded with `decodeURI` rules (`percent` module), so
//!   escaped reserved characters stay escaped.

pub mod client;
pub mod dom;
pub mod error;
pub mod http;
pub mod numeric;
pub mod percent;
pub mod query;
pub mod transport;
pub mod url;
pub mod validate;

pub use client::QueryClient;
pub use dom::{by_id, query_from_location, DocumentAccessor, Element, StaticDocument};
pub use error::{QueryError, RequestError, UrlError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, InvalidMethod};
pub use query::{parse_query, parse_query_strict, parse_search, QueryMap};
pub use transport::{AsyncHttpTransport, HttpTransport, Notifier, TracingNotifier};
#[cfg(feature = "blocking")]
pub use transport::UreqTransport;
pub use url::{parse_url, ParsedUrl, Port};
pub use validate::{is_valid_ip, is_valid_port, is_valid_url};
