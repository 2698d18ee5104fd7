//! Request helper: build, execute, interpret.
//!
//! # Design
//! `QueryClient` holds only an optional `base_url` and carries no mutable
//! state between calls. `build_request` produces an `HttpRequest`,
//! `parse_response` turns an `HttpResponse` into the body text or `None`.
//! `request` and `request_async` run the transport in between, so hosts
//! that do their own I/O can call the two halves directly.

use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{AsyncHttpTransport, HttpTransport, Notifier};

/// Stateless helper that issues one request and returns the response text.
///
/// A non-200 response is reported through the `Notifier` as
/// `"<status> <status_text>"` and yields `Ok(None)`; it is never an `Err`.
#[derive(Debug, Clone, Default)]
pub struct QueryClient {
    base_url: Option<String>,
}

impl QueryClient {
    /// `base_url` is used to resolve URLs that start with `/`.
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn build_request(&self, method: HttpMethod, url: &str, body: Option<&str>) -> HttpRequest {
        let url = match (&self.base_url, url.starts_with('/')) {
            (Some(base), true) => format!("{base}{url}"),
            _ => url.to_string(),
        };
        let body = if method.carries_body() {
            body.map(str::to_string)
        } else {
            None
        };
        let headers = match body {
            Some(_) => vec![(
                "content-type".to_string(),
                "text/plain;charset=UTF-8".to_string(),
            )],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Body text for a 200 response; otherwise notify and return `None`.
    pub fn parse_response<N: Notifier + ?Sized>(
        &self,
        response: HttpResponse,
        notifier: &N,
    ) -> Option<String> {
        if response.status == 200 {
            tracing::debug!(bytes = response.body.len(), "request succeeded");
            return Some(response.body);
        }
        let message = response.status_line();
        tracing::warn!(status = response.status, status_text = %response.status_text, "request failed");
        notifier.notify(&message);
        None
    }

    /// Issue the request and block until the response is in.
    pub fn request<T, N>(
        &self,
        transport: &T,
        notifier: &N,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> Result<Option<String>, RequestError>
    where
        T: HttpTransport + ?Sized,
        N: Notifier + ?Sized,
    {
        let request = self.build_request(method, url, body);
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = transport.execute(request)?;
        Ok(self.parse_response(response, notifier))
    }

    /// Same as `request`, awaiting an asynchronous transport.
    pub async fn request_async<T, N>(
        &self,
        transport: &T,
        notifier: &N,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> Result<Option<String>, RequestError>
    where
        T: AsyncHttpTransport,
        N: Notifier + ?Sized,
    {
        let request = self.build_request(method, url, body);
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = transport.execute(request).await?;
        Ok(self.parse_response(response, notifier))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::future::Future;

    use super::*;

    /// Replays one canned response and records what it was asked to send.
    struct CannedTransport {
        response: Result<HttpResponse, String>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn status(status: u16, status_text: &str, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    status_text: status_text.to_string(),
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl HttpTransport for CannedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
            self.sent.borrow_mut().push(request);
            self.response.clone().map_err(RequestError::Transport)
        }
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Notifier for Recorder {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn client() -> QueryClient {
        QueryClient::new(Some("http://192.168.1.20/"))
    }

    #[test]
    fn relative_url_resolves_against_base() {
        let req = client().build_request(HttpMethod::Get, "/cgi/status", None);
        assert_eq!(req.url, "http://192.168.1.20/cgi/status");
    }

    #[test]
    fn absolute_url_is_untouched() {
        let req = client().build_request(HttpMethod::Get, "http://other/x", None);
        assert_eq!(req.url, "http://other/x");

        let req = QueryClient::default().build_request(HttpMethod::Get, "/x", None);
        assert_eq!(req.url, "/x");
    }

    #[test]
    fn post_keeps_body_and_sets_content_type() {
        let req = client().build_request(HttpMethod::Post, "/cfg", Some("ip=10.0.0.2"));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some("ip=10.0.0.2"));
        assert_eq!(
            req.headers,
            vec![(
                "content-type".to_string(),
                "text/plain;charset=UTF-8".to_string()
            )]
        );
    }

    #[test]
    fn get_drops_body() {
        let req = client().build_request(HttpMethod::Get, "/cfg", Some("ignored"));
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn ok_returns_body_without_notifying() {
        let transport = CannedTransport::status(200, "OK", "uptime=42");
        let notifier = Recorder::default();
        let text = client()
            .request(&transport, &notifier, HttpMethod::Get, "/status", None)
            .unwrap();
        assert_eq!(text.as_deref(), Some("uptime=42"));
        assert!(notifier.0.borrow().is_empty());
        assert_eq!(transport.sent.borrow()[0].url, "http://192.168.1.20/status");
    }

    #[test]
    fn non_200_notifies_and_returns_none() {
        let transport = CannedTransport::status(404, "Not Found", "missing");
        let notifier = Recorder::default();
        let text = client()
            .request(&transport, &notifier, HttpMethod::Get, "/nope", None)
            .unwrap();
        assert!(text.is_none());
        assert_eq!(*notifier.0.borrow(), vec!["404 Not Found".to_string()]);
    }

    #[test]
    fn other_2xx_is_still_a_failure() {
        let transport = CannedTransport::status(204, "No Content", "");
        let notifier = Recorder::default();
        let text = client()
            .request(&transport, &notifier, HttpMethod::Delete, "/x", None)
            .unwrap();
        assert!(text.is_none());
        assert_eq!(*notifier.0.borrow(), vec!["204 No Content".to_string()]);
    }

    #[test]
    fn transport_failure_is_an_error_and_not_notified() {
        let transport = CannedTransport {
            response: Err("connection refused".to_string()),
            sent: RefCell::new(Vec::new()),
        };
        let notifier = Recorder::default();
        let err = client()
            .request(&transport, &notifier, HttpMethod::Get, "/", None)
            .unwrap_err();
        assert!(matches!(err, RequestError::Transport(ref msg) if msg == "connection refused"));
        assert!(notifier.0.borrow().is_empty());
    }

    #[test]
    fn parse_response_on_its_own() {
        let notifier = Recorder::default();
        let response = HttpResponse {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            headers: Vec::new(),
            body: "boom".to_string(),
        };
        assert!(client().parse_response(response, &notifier).is_none());
        assert_eq!(
            *notifier.0.borrow(),
            vec!["500 Internal Server Error".to_string()]
        );
    }

    struct ReadyTransport(HttpResponse);

    impl AsyncHttpTransport for ReadyTransport {
        fn execute(
            &self,
            _request: HttpRequest,
        ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send {
            let response = self.0.clone();
            async move { Ok(response) }
        }
    }

    #[tokio::test]
    async fn async_request_applies_the_same_status_rules() {
        let notifier = Recorder::default();
        let ok = ReadyTransport(HttpResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: Vec::new(),
            body: "ready".to_string(),
        });
        let text = client()
            .request_async(&ok, &notifier, HttpMethod::Get, "/", None)
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("ready"));

        let forbidden = ReadyTransport(HttpResponse {
            status: 403,
            status_text: "Forbidden".to_string(),
            headers: Vec::new(),
            body: String::new(),
        });
        let text = client()
            .request_async(&forbidden, &notifier, HttpMethod::Post, "/cfg", Some("x=1"))
            .await
            .unwrap();
        assert!(text.is_none());
        assert_eq!(*notifier.0.borrow(), vec!["403 Forbidden".to_string()]);
    }
}
