//! One-shot search fetch: build, execute, check.

use tracing::{debug, warn};

use crate::client::BookClient;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::transport::{Transport, UreqTransport};

/// Issues a single GET per call. There is no retry: the first failure is
/// the result.
pub struct Fetcher<T = UreqTransport> {
    client: BookClient,
    transport: T,
}

impl Fetcher<UreqTransport> {
    pub fn new(config: &SearchConfig) -> Self {
        Self::with_transport(BookClient::new(&config.endpoint), UreqTransport::new(config))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn with_transport(client: BookClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Fetch the raw response body for `query`.
    ///
    /// # Errors
    /// `MalformedQueryUrl` without touching the transport, `NetworkIo` when
    /// the round-trip fails, `NonSuccessStatus` for anything but 200.
    pub fn fetch(&self, query: &str) -> Result<String, SearchError> {
        let request = self.client.build_search(query).inspect_err(|err| {
            warn!(error = %err, "error with creating search url");
        })?;
        debug!(url = %request.url, "fetching volumes");

        let response = self.transport.execute(&request)?;
        self.client.parse_search(response).inspect_err(|err| {
            warn!(error = %err, url = %request.url, "error response from volumes endpoint");
        })
    }
}
