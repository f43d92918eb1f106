//! Search pipeline: fetch and decode on a worker thread, deliver once.
//!
//! # Design
//! Each `SearchController::search` call spawns its own worker thread that
//! runs `run_pipeline` and sends exactly one `Completion` back over the
//! channel the interactive side drains. Runs never coordinate: a second
//! search while one is in flight starts another worker, and whichever
//! completion is applied last is what the screen shows. There is no
//! cancellation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::decode::{decode_with, AuthorPolicy};
use crate::error::SearchError;
use crate::fetcher::Fetcher;
use crate::transport::{Transport, UreqTransport};
use crate::types::Book;

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum Outcome {
    /// Fetch succeeded and the body was decoded, possibly to nothing.
    Delivered(Vec<Book>),
    /// Fetch failed; the decoder never ran and the screen keeps its list.
    FetchFailed(SearchError),
}

/// What a worker hands back to the interactive thread.
#[derive(Debug)]
pub struct Completion {
    pub run: u64,
    pub query: String,
    pub outcome: Outcome,
}

/// Fetch then decode, synchronously, on the calling thread.
pub fn run_pipeline<T: Transport>(fetcher: &Fetcher<T>, policy: &AuthorPolicy, query: &str) -> Outcome {
    match fetcher.fetch(query) {
        Ok(body) => Outcome::Delivered(decode_with(&body, policy)),
        Err(err) => Outcome::FetchFailed(err),
    }
}

pub struct SearchController<T = UreqTransport> {
    fetcher: Arc<Fetcher<T>>,
    policy: AuthorPolicy,
    completions: Sender<Completion>,
    next_run: AtomicU64,
}

impl<T: Transport + 'static> SearchController<T> {
    pub fn new(fetcher: Fetcher<T>, policy: AuthorPolicy, completions: Sender<Completion>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            policy,
            completions,
            next_run: AtomicU64::new(1),
        }
    }

    /// Start a pipeline run for `query` on a fresh worker thread.
    ///
    /// The returned handle is only useful for tests and shutdown; delivery
    /// happens through the completion channel either way.
    pub fn search(&self, query: &str) -> JoinHandle<()> {
        let run = self.next_run.fetch_add(1, Ordering::Relaxed);
        let fetcher = Arc::clone(&self.fetcher);
        let policy = self.policy.clone();
        let completions = self.completions.clone();
        let query = query.to_string();

        info!(run, query = %query, "starting search");
        thread::spawn(move || {
            let outcome = run_pipeline(&*fetcher, &policy, &query);
            match &outcome {
                Outcome::Delivered(books) => debug!(run, count = books.len(), "search delivered"),
                Outcome::FetchFailed(err) => warn!(run, error = %err, "search fetch failed"),
            }
            if completions.send(Completion { run, query, outcome }).is_err() {
                debug!(run, "completion dropped, screen is gone");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::client::BookClient;
    use crate::http::{HttpRequest, HttpResponse};

    struct StaticTransport(u16, &'static str);

    impl Transport for StaticTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, SearchError> {
            Ok(HttpResponse {
                status: self.0,
                headers: Vec::new(),
                body: self.1.to_string(),
            })
        }
    }

    fn fetcher(status: u16, body: &'static str) -> Fetcher<StaticTransport> {
        Fetcher::with_transport(
            BookClient::new("http://books.test/volumes?q="),
            StaticTransport(status, body),
        )
    }

    #[test]
    fn success_is_delivered_decoded() {
        let body = r#"{"items":[{"volumeInfo":{"title":"Dune","authors":["Frank Herbert"]}}]}"#;
        let outcome = run_pipeline(&fetcher(200, body), &AuthorPolicy::LastWins, "dune");
        match outcome {
            Outcome::Delivered(books) => assert_eq!(books, vec![Book::new("Frank Herbert", "Dune")]),
            other => panic!("expected delivery, got {other:?}"),
        }
    }

    #[test]
    fn not_found_is_fetch_failed() {
        let body = r#"{"items":[{"volumeInfo":{"title":"Dune"}}]}"#;
        let outcome = run_pipeline(&fetcher(404, body), &AuthorPolicy::LastWins, "dune");
        assert!(matches!(
            outcome,
            Outcome::FetchFailed(SearchError::NonSuccessStatus { status: 404 })
        ));
    }

    #[test]
    fn blank_body_is_delivered_empty() {
        let outcome = run_pipeline(&fetcher(200, "  "), &AuthorPolicy::LastWins, "dune");
        assert!(matches!(outcome, Outcome::Delivered(books) if books.is_empty()));
    }

    #[test]
    fn each_search_delivers_exactly_once() {
        let (tx, rx) = mpsc::channel();
        let controller = SearchController::new(fetcher(200, r#"{"items":[]}"#), AuthorPolicy::LastWins, tx);

        let first = controller.search("one");
        let second = controller.search("two");
        first.join().unwrap();
        second.join().unwrap();
        drop(controller);

        let mut runs: Vec<u64> = rx.iter().map(|c| c.run).collect();
        runs.sort_unstable();
        assert_eq!(runs, vec![1, 2]);
    }

    #[test]
    fn search_survives_a_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let controller = SearchController::new(fetcher(200, ""), AuthorPolicy::LastWins, tx);
        controller.search("dune").join().unwrap();
    }
}
