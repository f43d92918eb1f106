//! Stateless request builder and response checker for the volumes search.
//!
//! # Design
//! `BookClient` holds only the endpoint base and carries no mutable state
//! between calls. `build_search` produces an `HttpRequest`; `parse_search`
//! consumes the matching `HttpResponse` and hands back the raw body. The
//! caller executes the HTTP round-trip in between, and decoding is left to
//! `decode` so a failed fetch never reaches the decoder.

use ureq::http::Uri;

use crate::error::SearchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct BookClient {
    endpoint: String,
}

impl BookClient {
    /// `endpoint` is the URL prefix the query is appended to, e.g.
    /// `https://www.googleapis.com/books/v1/volumes?q=`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for `query`, encoded by `encode_query`.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}{}", self.endpoint, encode_query(query))
    }

    /// Build the GET request for `query`, rejecting URLs that cannot be sent.
    pub fn build_search(&self, query: &str) -> Result<HttpRequest, SearchError> {
        let url = self.search_url(query);
        validate_url(&url)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    /// Accept only a 200 response and return its body untouched.
    pub fn parse_search(&self, response: HttpResponse) -> Result<String, SearchError> {
        if response.status != 200 {
            return Err(SearchError::NonSuccessStatus {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

/// Spaces become `+`. Characters a URI may not carry (quotes, angle
/// brackets and the like, plus ASCII controls) are percent-encoded. Every
/// other character passes through unchanged.
fn encode_query(query: &str) -> String {
    let mut encoded = String::with_capacity(query.len());
    for c in query.chars() {
        match c {
            ' ' => encoded.push('+'),
            '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' => push_percent(&mut encoded, c),
            c if c.is_ascii_control() => push_percent(&mut encoded, c),
            c => encoded.push(c),
        }
    }
    encoded
}

fn push_percent(encoded: &mut String, c: char) {
    encoded.push_str(&format!("%{:02X}", c as u32));
}

fn validate_url(url: &str) -> Result<(), SearchError> {
    let malformed = |reason: &str| SearchError::MalformedQueryUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    let uri = url.parse::<Uri>().map_err(|e| malformed(&format!("{e}")))?;
    if uri.scheme().is_none() {
        return Err(malformed("missing scheme"));
    }
    if uri.host().is_none() {
        return Err(malformed("missing host"));
    }
    Ok(())
}
