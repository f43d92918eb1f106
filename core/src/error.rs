//! Error types for the book-search pipeline.
//!
//! # Design
//! Every variant is handled inside the pipeline; none reaches the user as a
//! crash. Fetch-stage variants (`MalformedQueryUrl`, `NetworkIo`,
//! `NonSuccessStatus`) turn a run into "no update". `JsonStructure` is only a
//! diagnostic: the decoder logs it and returns the books built so far.

use thiserror::Error;

/// Errors produced while fetching or decoding a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The endpoint plus query did not form a usable URL. No request was sent.
    #[error("malformed query url {url:?}: {reason}")]
    MalformedQueryUrl { url: String, reason: String },

    /// Connecting, sending, or reading the body failed.
    #[error("network i/o failed: {0}")]
    NetworkIo(String),

    /// The server answered with anything other than 200.
    #[error("unexpected HTTP status {status}")]
    NonSuccessStatus { status: u16 },

    /// The body did not match the expected volumes shape.
    #[error("unexpected json structure: {0}")]
    JsonStructure(String),
}

impl From<ureq::Error> for SearchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => SearchError::NonSuccessStatus { status },
            ureq::Error::BadUri(reason) => SearchError::MalformedQueryUrl {
                url: String::new(),
                reason,
            },
            other => SearchError::NetworkIo(other.to_string()),
        }
    }
}
