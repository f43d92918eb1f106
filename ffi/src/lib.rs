//! C-ABI wrapper around `booklist-core`.
//!
//! # Overview
//! Lets a mobile host (or anything with a C FFI) build the search request,
//! run it on its own HTTP stack and threads, and hand the response back for
//! status checking and decoding. The host owns the worker/UI split; this
//! layer is synchronous and stateless apart from the client handle.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `booklist_parse_search` mirrors the pipeline: a non-200 status returns
//!   an error code (keep the current list) and skips decoding; a 200 always
//!   yields a book list, possibly empty.
//! - The C caller owns all returned pointers and must call the matching
//!   `booklist_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use booklist_core::{decode_with, AuthorPolicy, BookClient, HttpResponse, SearchConfig};

use types::*;

/// Borrow a C string as UTF-8, replacing invalid sequences.
///
/// # Safety
/// `s` must be non-null and point to a NUL-terminated string.
unsafe fn read_c_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

fn new_client(config: &SearchConfig) -> *mut FfiBookClient {
    Box::into_raw(Box::new(FfiBookClient {
        inner: BookClient::new(&config.endpoint),
        policy: AuthorPolicy::LastWins,
    }))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client that appends queries to `endpoint`, e.g.
/// `https://www.googleapis.com/books/v1/volumes?q=`.
///
/// Returns null if `endpoint` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `booklist_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_client_new(endpoint: *const c_char) -> *mut FfiBookClient {
    catch_unwind(|| {
        if endpoint.is_null() {
            return std::ptr::null_mut();
        }
        let endpoint = unsafe { read_c_str(endpoint) };
        new_client(&SearchConfig::with_endpoint(&endpoint))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a client from a JSON `SearchConfig`. Null means the default
/// (public Google Books) configuration; missing keys take their defaults.
///
/// Returns null if the JSON does not parse.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_client_from_config(config_json: *const c_char) -> *mut FfiBookClient {
    catch_unwind(|| {
        let config = if config_json.is_null() {
            SearchConfig::default()
        } else {
            let raw = unsafe { read_c_str(config_json) };
            match serde_json::from_str::<SearchConfig>(&raw) {
                Ok(config) => config,
                Err(_) => return std::ptr::null_mut(),
            }
        };
        new_client(&config)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Join every author with `separator` instead of keeping only the last one.
/// Passing null restores the last-author behavior.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_client_set_author_separator(
    client: *mut FfiBookClient,
    separator: *const c_char,
) {
    if client.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let client = unsafe { &mut *client };
        client.policy = if separator.is_null() {
            AuthorPolicy::LastWins
        } else {
            AuthorPolicy::Joined(unsafe { read_c_str(separator) })
        };
    });
}

/// Free a client created by `booklist_client_new` or
/// `booklist_client_from_config`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_client_free(client: *mut FfiBookClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Build the GET request for `query`.
///
/// Returns null if `client` or `query` is null, or if the resulting URL is
/// malformed (no request should be sent in that case).
/// The caller must free the returned pointer with `booklist_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_build_search(
    client: *const FfiBookClient,
    query: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || query.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let query = unsafe { read_c_str(query) };
        match client.inner.build_search(&query) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Check a search response and decode its body.
///
/// Non-200 responses come back as `NonSuccessStatus` without decoding.
/// A null `body` on a 200 is treated as an empty body.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_parse_search(
    client: *const FfiBookClient,
    response: *const FfiHttpResponse,
) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiSearchResult::null_arg("client");
        }
        if response.is_null() {
            return FfiSearchResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            unsafe { read_c_str(resp.body) }
        };
        let core_resp = HttpResponse {
            status: resp.status,
            headers: Vec::new(),
            body,
        };
        match client.inner.parse_search(core_resp) {
            Ok(body) => FfiSearchResult::ok_books(decode_with(&body, &client.policy)),
            Err(e) => FfiSearchResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in booklist_parse_search"))
}

/// Decode a body the host already knows came from a 200 response.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_decode(
    client: *const FfiBookClient,
    body: *const c_char,
) -> *mut FfiSearchResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiSearchResult::null_arg("client");
        }
        if body.is_null() {
            return FfiSearchResult::null_arg("body");
        }
        let client = unsafe { &*client };
        let body = unsafe { read_c_str(body) };
        FfiSearchResult::ok_books(decode_with(&body, &client.policy))
    })
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in booklist_decode"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `booklist_build_search`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
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

/// Free an `FfiSearchResult` returned by `booklist_parse_search` or
/// `booklist_decode`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_free_result(result: *mut FfiSearchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if !result.books.is_null() {
            let list = unsafe { Box::from_raw(result.books) };
            if !list.items.is_null() && list.len > 0 {
                let items = unsafe {
                    Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
                };
                for book in items.iter() {
                    free_c_string(book.author);
                    free_c_string(book.title);
                }
            }
        }
    });
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn booklist_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
