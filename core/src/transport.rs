//! Capabilities the host injects into `QueryClient`.
//!
//! # Design
//! `HttpTransport` blocks the calling thread until the whole response is in;
//! there is no timeout and no retry at this layer. `AsyncHttpTransport` is
//! the same contract expressed as a future, for hosts that run an executor.
//! A transport reports a non-200 status as an ordinary `HttpResponse`; only
//! failures that leave no status to read become `RequestError::Transport`.

use std::future::Future;

use crate::error::RequestError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one request and blocks until the response is available.
pub trait HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Executes one request, completing the returned future with the response.
pub trait AsyncHttpTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send;
}

/// Shows a message to the user. Called with `"<status> <status_text>"`
/// whenever a request does not come back with 200.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F: Fn(&str)> Notifier for F {
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Notifier for headless hosts: the message becomes a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "webcommon::notify", "{message}");
    }
}

#[cfg(feature = "blocking")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "blocking")]
mod blocking {
    use ureq::http::{self, Method};
    use ureq::typestate::{WithBody, WithoutBody};
    use ureq::{Agent, AsSendBody, RequestBuilder};

    use super::HttpTransport;
    use crate::error::RequestError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport over `ureq`.
    ///
    /// Status-code-as-error is switched off so 4xx/5xx responses come back
    /// as data and `QueryClient::parse_response` decides what they mean.
    /// Extension methods are sent as-is.
    ///
    /// `ureq` does not expose the reason phrase the server sent, so
    /// `HttpResponse::status_text` is the canonical phrase for the status
    /// code, and empty for codes without one (a 599 notifies `"599 "`).
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = Agent::config_builder()
                .http_status_as_error(false)
                .allow_non_standard_methods(true)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HttpTransport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
            let HttpRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let result = match method {
                HttpMethod::Get => without_body(self.agent.get(&url), &headers),
                HttpMethod::Head => without_body(self.agent.head(&url), &headers),
                HttpMethod::Delete => {
                    if body.is_some() {
                        tracing::debug!(%url, "DELETE body dropped by transport");
                    }
                    without_body(self.agent.delete(&url), &headers)
                }
                HttpMethod::Post => with_body(self.agent.post(&url), &headers, body),
                HttpMethod::Put => with_body(self.agent.put(&url), &headers, body),
                HttpMethod::Patch => with_body(self.agent.patch(&url), &headers, body),
                HttpMethod::Options | HttpMethod::Extension(_) => {
                    self.run(method.as_str(), &url, &headers, body)
                }
            };
            let mut response = result.map_err(|e| RequestError::Transport(e.to_string()))?;

            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| RequestError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body,
            })
        }
    }

    impl UreqTransport {
        /// Methods without a typed `ureq` builder go through `Agent::run`.
        fn run(
            &self,
            method: &str,
            url: &str,
            headers: &[(String, String)],
            body: Option<String>,
        ) -> Result<http::Response<ureq::Body>, ureq::Error> {
            let method = Method::from_bytes(method.as_bytes()).map_err(http::Error::from)?;
            let mut builder = http::Request::builder().method(method).uri(url);
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match body {
                Some(body) => self.send(builder, body),
                None => self.send(builder, ()),
            }
        }

        fn send(
            &self,
            builder: http::request::Builder,
            body: impl AsSendBody,
        ) -> Result<http::Response<ureq::Body>, ureq::Error> {
            let request = builder.body(body)?;
            self.agent.run(request)
        }
    }

    fn without_body(
        mut builder: RequestBuilder<WithoutBody>,
        headers: &[(String, String)],
    ) -> Result<http::Response<ureq::Body>, ureq::Error> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.call()
    }

    fn with_body(
        mut builder: RequestBuilder<WithBody>,
        headers: &[(String, String)],
        body: Option<String>,
    ) -> Result<http::Response<ureq::Body>, ureq::Error> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match body {
            Some(body) => builder.send(body.as_bytes()),
            None => builder.send_empty(),
        }
    }
}
