//! Book-search client core.
//!
//! # Overview
//! Queries a volumes search endpoint (Google Books by default), decodes the
//! JSON response into `Book` records, and delivers them to a host list UI.
//!
//! # Design
//! - `BookClient` is stateless: `build_search` produces a request,
//!   `parse_search` checks the response. The I/O in between belongs to a
//!   `Transport` (`UreqTransport` here, or the host across the C ABI).
//! - `decode` never fails outward; bad payloads degrade to partial lists.
//! - `SearchController` runs fetch+decode on a worker thread per search and
//!   sends one `Completion` back; `BookListScreen` applies it on the
//!   interactive thread. A failed fetch leaves the visible list alone.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod pipeline;
pub mod screen;
pub mod transport;
pub mod types;

pub use client::BookClient;
pub use config::SearchConfig;
pub use decode::{decode, decode_with, AuthorPolicy};
pub use error::SearchError;
pub use fetcher::Fetcher;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pipeline::{run_pipeline, Completion, Outcome, SearchController};
pub use screen::{BookListScreen, BookListView, Connectivity, SavedState, OFFLINE_NOTICE};
pub use transport::{Transport, UreqTransport};
pub use types::Book;
