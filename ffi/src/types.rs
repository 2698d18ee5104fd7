//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer plus length instead of `Vec`,
//! and enums with explicit discriminants. Conversion helpers live here to
//! keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use webcommon_core::{HttpMethod, Notifier, ParsedUrl, Port, QueryError, QueryMap, UrlError};

/// Opaque handle to a `QueryClient`.
pub struct FfiQueryClient {
    pub(crate) inner: webcommon_core::QueryClient,
}

/// Allocate a C string.
///
/// `s` must not contain NUL. Strings read from C input never do; decoded
/// values can (`%00`) and are screened with `has_nul` before they get here.
pub(crate) fn to_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

pub(crate) fn has_nul(s: &str) -> bool {
    s.contains('\0')
}

pub(crate) fn opt_to_c_string(s: Option<String>) -> *mut c_char {
    match s {
        Some(s) => to_c_string(s),
        None => std::ptr::null_mut(),
    }
}

/// Borrow a C string as UTF-8. `None` for null or non-UTF-8 input.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum. `Extension` marks a verb without its own
/// discriminant; its name is in `FfiHttpRequest::method_name`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Head = 1,
    Post = 2,
    Put = 3,
    Patch = 4,
    Delete = 5,
    Options = 6,
    Extension = 7,
}

impl From<&HttpMethod> for FfiHttpMethod {
    fn from(m: &HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Head => FfiHttpMethod::Head,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
            HttpMethod::Options => FfiHttpMethod::Options,
            HttpMethod::Extension(_) => FfiHttpMethod::Extension,
        }
    }
}

impl FfiHttpMethod {
    /// The core method, or `None` for `Extension`, which needs a name.
    pub(crate) fn to_core(self) -> Option<HttpMethod> {
        match self {
            FfiHttpMethod::Get => Some(HttpMethod::Get),
            FfiHttpMethod::Head => Some(HttpMethod::Head),
            FfiHttpMethod::Post => Some(HttpMethod::Post),
            FfiHttpMethod::Put => Some(HttpMethod::Put),
            FfiHttpMethod::Patch => Some(HttpMethod::Patch),
            FfiHttpMethod::Delete => Some(HttpMethod::Delete),
            FfiHttpMethod::Options => Some(HttpMethod::Options),
            FfiHttpMethod::Extension => None,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `wc_build_request`. The C caller executes the request and
/// passes the response back through `wc_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    /// The method token as sent on the wire, set for every method.
    pub method_name: *mut c_char,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: webcommon_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: FfiHttpMethod::from(&req.method),
            method_name: to_c_string(req.method.as_str()),
            url: to_c_string(req.url),
            headers,
            headers_len,
            body: opt_to_c_string(req.body),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller fills this in after executing the request. The FFI layer
/// reads but does not free these fields; null strings read as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub status_text: *const c_char,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> webcommon_core::HttpResponse {
        let text = |ptr| unsafe { read_str(ptr) }.unwrap_or("").to_string();
        webcommon_core::HttpResponse {
            status: self.status,
            status_text: text(self.status_text),
            headers: Vec::new(),
            body: text(self.body),
        }
    }
}

/// Called with the failure message (`"<status> <status_text>"`) and the
/// caller's `user_data` when a response is not 200.
pub type FfiNotifyFn = extern "C" fn(message: *const c_char, user_data: *mut c_void);

pub(crate) struct CallbackNotifier {
    pub(crate) callback: Option<FfiNotifyFn>,
    pub(crate) user_data: *mut c_void,
}

impl Notifier for CallbackNotifier {
    fn notify(&self, message: &str) {
        let Some(callback) = self.callback else {
            return;
        };
        if let Ok(message) = CString::new(message) {
            callback(message.as_ptr(), self.user_data);
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed values
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiPortKind {
    Absent = 0,
    Number = 1,
    NotANumber = 2,
}

/// `ParsedUrl` for C. `user` and `password` are null when absent; `port` is
/// meaningful only when `port_kind` is `Number`.
#[repr(C)]
pub struct FfiParsedUrl {
    pub protocol: *mut c_char,
    pub host: *mut c_char,
    pub port_kind: FfiPortKind,
    pub port: i64,
    pub user: *mut c_char,
    pub password: *mut c_char,
}

impl From<ParsedUrl> for FfiParsedUrl {
    fn from(url: ParsedUrl) -> Self {
        let (port_kind, port) = match url.port {
            None => (FfiPortKind::Absent, 0),
            Some(Port::Number(n)) => (FfiPortKind::Number, n),
            Some(Port::NotANumber(_)) => (FfiPortKind::NotANumber, 0),
        };
        FfiParsedUrl {
            protocol: to_c_string(url.protocol),
            host: to_c_string(url.host),
            port_kind,
            port,
            user: opt_to_c_string(url.user),
            password: opt_to_c_string(url.password),
        }
    }
}

#[repr(C)]
pub struct FfiQueryPair {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// Query parameters for C, sorted by key.
#[repr(C)]
pub struct FfiQueryMap {
    pub items: *mut FfiQueryPair,
    pub len: u32,
}

impl From<QueryMap> for FfiQueryMap {
    fn from(map: QueryMap) -> Self {
        let len = map.len() as u32;
        let pairs: Box<[FfiQueryPair]> = map
            .into_iter()
            .map(|(k, v)| FfiQueryPair {
                key: to_c_string(k),
                value: to_c_string(v),
            })
            .collect();
        let items = if pairs.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(pairs) as *mut FfiQueryPair
        };
        FfiQueryMap { items, len }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    MissingScheme = 1,
    MalformedEscape = 2,
    InvalidUtf8 = 3,
    MissingSeparator = 4,
    HttpStatus = 5,
    Panic = 6,
    NullArg = 7,
    InteriorNul = 8,
}

/// Tag that tells `wc_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    ParsedUrl = 1,
    QueryMap = 2,
    Text = 3,
}

/// Result envelope for every parse operation.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload named by `data_tag` (`Text` data is a C string).
/// On failure `error_code` names the category, `error_message` is a
/// human-readable C string, and `data` is null. `http_status` is set only
/// for `HttpStatus`.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn error(error_code: FfiErrorCode, http_status: u16, message: String) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: to_c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_url(url: ParsedUrl) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiParsedUrl::from(url)));
        Self::ok(FfiDataTag::ParsedUrl, data as *mut c_void)
    }

    /// A decoded `%00` cannot be represented in a C string, so such a map
    /// is reported as `InteriorNul` instead.
    pub(crate) fn ok_query(map: QueryMap) -> *mut Self {
        if let Some((key, _)) = map.iter().find(|(k, v)| has_nul(k) || has_nul(v)) {
            return Self::interior_nul(format!("query parameter {key:?} contains NUL"));
        }
        let data = Box::into_raw(Box::new(FfiQueryMap::from(map)));
        Self::ok(FfiDataTag::QueryMap, data as *mut c_void)
    }

    pub(crate) fn ok_text(text: String) -> *mut Self {
        if has_nul(&text) {
            return Self::interior_nul("text contains NUL".to_string());
        }
        Self::ok(FfiDataTag::Text, to_c_string(text) as *mut c_void)
    }

    pub(crate) fn from_url_error(err: UrlError) -> *mut Self {
        let code = match err {
            UrlError::MissingScheme(_) => FfiErrorCode::MissingScheme,
        };
        Self::error(code, 0, err.to_string())
    }

    pub(crate) fn from_query_error(err: QueryError) -> *mut Self {
        let code = match err {
            QueryError::MalformedEscape { .. } => FfiErrorCode::MalformedEscape,
            QueryError::InvalidUtf8 => FfiErrorCode::InvalidUtf8,
            QueryError::MissingSeparator { .. } => FfiErrorCode::MissingSeparator,
        };
        Self::error(code, 0, err.to_string())
    }

    pub(crate) fn http_status(status: u16, status_line: String) -> *mut Self {
        Self::error(FfiErrorCode::HttpStatus, status, status_line)
    }

    pub(crate) fn interior_nul(message: String) -> *mut Self {
        Self::error(FfiErrorCode::InteriorNul, 0, message)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null or non-UTF-8 argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        tracing::error!("{msg}");
        Self::error(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
