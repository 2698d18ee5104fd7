//! C-ABI wrapper around `webcommon-core`.
//!
//! # Overview
//! Exposes the validators, the URL and query parsers, and the request
//! helper's build/parse halves through `extern "C"` functions, so a C host
//! can perform the HTTP round-trip itself and let this library decide what
//! the response means.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Validators return `bool`; null or non-UTF-8 input is simply invalid.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data`
//!   carries parsed values, response text and errors uniformly.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `wc_free_*` function.

pub mod types;

use std::ffi::c_void;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use webcommon_core::{parse_query, parse_query_strict, parse_url, HttpMethod, QueryClient};

use types::*;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// `true` if `value` is a dotted-quad IPv4 address. Null is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn wc_is_valid_ip(value: *const c_char) -> bool {
    catch_unwind(|| unsafe { read_str(value) }.is_some_and(webcommon_core::is_valid_ip))
        .unwrap_or(false)
}

/// `true` if `value` parses to a port in 1..=65535. Null is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn wc_is_valid_port(value: *const c_char) -> bool {
    catch_unwind(|| unsafe { read_str(value) }.is_some_and(webcommon_core::is_valid_port))
        .unwrap_or(false)
}

/// `true` if `value` starts with `http://` or `https://`. Null is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn wc_is_valid_url(value: *const c_char) -> bool {
    catch_unwind(|| unsafe { read_str(value) }.is_some_and(webcommon_core::is_valid_url))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Parse `url` into protocol, host, port and credentials.
///
/// Returns a result with `data_tag = ParsedUrl` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wc_parse_url(url: *const c_char) -> *mut FfiResult {
    catch_unwind(|| {
        let Some(url) = (unsafe { read_str(url) }) else {
            return FfiResult::null_arg("url");
        };
        match parse_url(url) {
            Ok(parsed) => FfiResult::ok_url(parsed),
            Err(e) => FfiResult::from_url_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in wc_parse_url"))
}

/// Parse a `&`-delimited query string. With `strict`, a segment without `=`
/// is an error instead of a value under the empty key.
///
/// Returns a result with `data_tag = QueryMap` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wc_parse_query(query: *const c_char, strict: bool) -> *mut FfiResult {
    catch_unwind(|| {
        let Some(query) = (unsafe { read_str(query) }) else {
            return FfiResult::null_arg("query");
        };
        let parsed = if strict {
            parse_query_strict(query)
        } else {
            parse_query(query)
        };
        match parsed {
            Ok(map) => FfiResult::ok_query(map),
            Err(e) => FfiResult::from_query_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in wc_parse_query"))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a `QueryClient`. `base_url` may be null; when set, request URLs
/// starting with `/` are resolved against it.
///
/// Returns null if `base_url` is not UTF-8 or if an internal panic occurs.
/// The caller must free the returned pointer with `wc_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn wc_client_new(base_url: *const c_char) -> *mut FfiQueryClient {
    catch_unwind(|| {
        let base_url = if base_url.is_null() {
            None
        } else {
            match unsafe { read_str(base_url) } {
                Some(url) => Some(url),
                None => return std::ptr::null_mut(),
            }
        };
        let client = QueryClient::new(base_url);
        Box::into_raw(Box::new(FfiQueryClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `wc_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wc_client_free(client: *mut FfiQueryClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request helper
// ---------------------------------------------------------------------------

/// Build the request for `method url` with an optional `body` (may be null).
///
/// Returns null if `client` or `url` is null, or if `method` is `Extension`
/// (use `wc_build_request_named` for those).
/// The caller must free the returned pointer with `wc_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn wc_build_request(
    client: *const FfiQueryClient,
    method: FfiHttpMethod,
    url: *const c_char,
    body: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| match method.to_core() {
        Some(method) => build_request(client, method, url, body),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Same as `wc_build_request`, with the method given by name (`"PROPFIND"`,
/// `"options"`). Common verbs are matched case-insensitively; other names
/// must be valid HTTP tokens and are kept as written.
///
/// Returns null if any of `client`, `method` or `url` is null, or if
/// `method` is not a valid token.
#[unsafe(no_mangle)]
pub extern "C" fn wc_build_request_named(
    client: *const FfiQueryClient,
    method: *const c_char,
    url: *const c_char,
    body: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        let Some(method) = (unsafe { read_str(method) }) else {
            return std::ptr::null_mut();
        };
        match method.parse::<HttpMethod>() {
            Ok(method) => build_request(client, method, url, body),
            Err(e) => {
                tracing::debug!(error = %e, "rejected method name");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

fn build_request(
    client: *const FfiQueryClient,
    method: HttpMethod,
    url: *const c_char,
    body: *const c_char,
) -> *mut FfiHttpRequest {
    if client.is_null() {
        return std::ptr::null_mut();
    }
    let Some(url) = (unsafe { read_str(url) }) else {
        return std::ptr::null_mut();
    };
    let client = unsafe { &*client };
    let body = unsafe { read_str(body) };
    let req = client.inner.build_request(method, url, body);
    FfiHttpRequest::from_core(req)
}

/// Interpret the response to a request built by `wc_build_request`.
///
/// Status 200 gives `data_tag = Text` holding the body. Any other status
/// calls `notify(message, user_data)` (when `notify` is non-null) and gives
/// `error_code = HttpStatus` with `http_status` set.
#[unsafe(no_mangle)]
pub extern "C" fn wc_parse_response(
    client: *const FfiQueryClient,
    response: *const FfiHttpResponse,
    notify: Option<FfiNotifyFn>,
    user_data: *mut c_void,
) -> *mut FfiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let response = unsafe { &*response }.to_core();
        let status = response.status;
        let status_line = response.status_line();
        let notifier = CallbackNotifier {
            callback: notify,
            user_data,
        };
        match client.inner.parse_response(response, &notifier) {
            Some(text) => FfiResult::ok_text(text),
            None => FfiResult::http_status(status, status_line),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in wc_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `wc_build_request`. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn wc_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.method_name);
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiResult` returned by any `wc_parse_*` function. Safe with
/// null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn wc_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::ParsedUrl => {
                let url = unsafe { Box::from_raw(result.data as *mut FfiParsedUrl) };
                free_c_string(url.protocol);
                free_c_string(url.host);
                free_c_string(url.user);
                free_c_string(url.password);
            }
            FfiDataTag::QueryMap => {
                let map = unsafe { Box::from_raw(result.data as *mut FfiQueryMap) };
                if !map.items.is_null() && map.len > 0 {
                    let pairs = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            map.items,
                            map.len as usize,
                        ))
                    };
                    for pair in pairs.iter() {
                        free_c_string(pair.key);
                        free_c_string(pair.value);
                    }
                }
            }
            FfiDataTag::Text => free_c_string(result.data as *mut c_char),
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wc_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
