//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the seam between the deterministic client and real I/O.
//! `UreqTransport` is the in-process implementation; tests substitute their
//! own. ureq's status-as-error behavior is disabled so 4xx/5xx come back as
//! data and `BookClient::parse_search` stays the only place that judges a
//! status code. The response (and with it the connection) is dropped before
//! `execute` returns on every path.

use ureq::Agent;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, SearchError>;
}

/// Blocking transport backed by a ureq `Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: &SearchConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(config.connect_timeout()))
            .timeout_recv_response(Some(config.read_timeout()))
            .timeout_recv_body(Some(config.read_timeout()))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, SearchError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let mut response = builder.call()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(key, value)| Some((key.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
