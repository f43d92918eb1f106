//! Interactive-side model of the book list.
//!
//! # Design
//! `BookListScreen` lives on the interactive thread. It owns the current
//! list, which is only ever written here when a `Completion` is applied, so
//! no lock guards it. Rendering goes through the `BookListView` trait; the
//! host decides what a list, an empty state, or a notice looks like.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::AuthorPolicy;
use crate::fetcher::Fetcher;
use crate::pipeline::{Completion, Outcome, SearchController};
use crate::transport::{Transport, UreqTransport};
use crate::types::Book;

pub const OFFLINE_NOTICE: &str = "Network not available";

/// Rendering surface supplied by the host UI.
pub trait BookListView {
    fn show_books(&mut self, books: &[Book]);
    fn show_empty(&mut self);
    /// Short-lived message, e.g. a toast.
    fn show_notice(&mut self, message: &str);
}

/// Platform connectivity check.
pub trait Connectivity {
    fn is_network_available(&self) -> bool;
}

impl<F: Fn() -> bool> Connectivity for F {
    fn is_network_available(&self) -> bool {
        self()
    }
}

/// Snapshot of the list kept across a save/restore boundary such as a
/// screen rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub books: Vec<Book>,
}

impl SavedState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

pub struct BookListScreen<V, C, T = UreqTransport> {
    view: V,
    connectivity: C,
    controller: SearchController<T>,
    completions: Receiver<Completion>,
    books: Vec<Book>,
}

impl<V, C, T> BookListScreen<V, C, T>
where
    V: BookListView,
    C: Connectivity,
    T: Transport + 'static,
{
    pub fn new(view: V, connectivity: C, fetcher: Fetcher<T>, policy: AuthorPolicy) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut screen = Self {
            view,
            connectivity,
            controller: SearchController::new(fetcher, policy, tx),
            completions: rx,
            books: Vec::new(),
        };
        screen.render();
        screen
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle a search trigger. Offline, this only shows a notice and no
    /// request is made.
    pub fn submit(&mut self, query: &str) -> Option<JoinHandle<()>> {
        if !self.connectivity.is_network_available() {
            self.view.show_notice(OFFLINE_NOTICE);
            return None;
        }
        Some(self.controller.search(query))
    }

    /// Apply every completion that has already arrived. Returns how many
    /// were applied.
    pub fn process_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Block up to `timeout` for the next completion and apply it.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => {
                self.apply(completion);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion.outcome {
            Outcome::Delivered(books) => {
                debug!(run = completion.run, query = %completion.query, count = books.len(), "updating book list");
                self.books = books;
                self.render();
            }
            Outcome::FetchFailed(_) => {
                debug!(run = completion.run, query = %completion.query, "fetch failed, keeping previous list");
            }
        }
    }

    pub fn save_state(&self) -> SavedState {
        SavedState {
            books: self.books.clone(),
        }
    }

    pub fn restore(&mut self, state: SavedState) {
        self.books = state.books;
        self.render();
    }

    fn render(&mut self) {
        if self.books.is_empty() {
            self.view.show_empty();
        } else {
            self.view.show_books(&self.books);
        }
    }
}
