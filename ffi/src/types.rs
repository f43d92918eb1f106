//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! instead of `String`, pointer + length instead of `Vec`, explicit enum
//! discriminants. Conversion helpers live here so `lib.rs` stays focused on
//! the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use booklist_core::{AuthorPolicy, Book, BookClient, HttpMethod, HttpRequest, SearchError};

/// Opaque handle to a `BookClient` plus the author policy used when
/// decoding. C callers pass it back into every FFI function.
pub struct FfiBookClient {
    pub(crate) inner: BookClient,
    pub(crate) policy: AuthorPolicy,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs are
/// dropped rather than failing.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A search request as C-compatible plain data.
///
/// Built by `booklist_build_search`. The host executes it with its own HTTP
/// stack (GET, connect timeout 15 s, read timeout 10 s) and passes the
/// response back through `booklist_parse_search`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);

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
            method: req.method.into(),
            url,
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// The host builds this on its side after executing an `FfiHttpRequest`.
/// The FFI layer reads but never frees these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome codes in `FfiSearchResult`.
///
/// Every code other than `Ok` means "no update": the host keeps whatever
/// list it is currently showing.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    MalformedQueryUrl = 1,
    NetworkIo = 2,
    NonSuccessStatus = 3,
    Panic = 4,
    NullArg = 5,
    JsonStructure = 6,
}

#[repr(C)]
pub struct FfiBook {
    pub author: *mut c_char,
    pub title: *mut c_char,
}

#[repr(C)]
pub struct FfiBookList {
    pub items: *mut FfiBook,
    pub len: u32,
}

/// Result envelope for parse and decode calls.
///
/// On `Ok`, `books` points to the decoded list (possibly `len == 0`, which
/// the host shows as its empty state) and `error_message` is null. Otherwise
/// `books` is null and `error_message` describes the failure.
#[repr(C)]
pub struct FfiSearchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub books: *mut FfiBookList,
}

impl FfiSearchResult {
    pub(crate) fn ok_books(books: Vec<Book>) -> *mut Self {
        let len = books.len() as u32;
        let items = if books.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_books: Box<[FfiBook]> = books
                .iter()
                .map(|b| FfiBook {
                    author: to_c_string(b.author()),
                    title: to_c_string(b.title()),
                })
                .collect();
            Box::into_raw(ffi_books) as *mut FfiBook
        };

        Self::boxed(FfiSearchResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 200,
            books: Box::into_raw(Box::new(FfiBookList { items, len })),
        })
    }

    pub(crate) fn from_error(err: SearchError) -> *mut Self {
        let (error_code, http_status) = match &err {
            SearchError::MalformedQueryUrl { .. } => (FfiErrorCode::MalformedQueryUrl, 0),
            SearchError::NetworkIo(_) => (FfiErrorCode::NetworkIo, 0),
            SearchError::JsonStructure(_) => (FfiErrorCode::JsonStructure, 0),
            SearchError::NonSuccessStatus { status } => (FfiErrorCode::NonSuccessStatus, *status),
        };
        Self::failure(error_code, http_status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Self::boxed(FfiSearchResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            books: std::ptr::null_mut(),
        })
    }

    fn boxed(result: FfiSearchResult) -> *mut Self {
        Box::into_raw(Box::new(result))
    }
}
