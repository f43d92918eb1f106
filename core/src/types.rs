//! Domain record and the typed shape of a volumes response.
//!
//! # Design
//! `Book` is the only type the UI sees. The `VolumesPage` / `Volume` /
//! `VolumeInfo` structs describe just the parts of the upstream payload the
//! decoder reads; everything else in the response is ignored by serde.

use serde::{Deserialize, Serialize};

/// One search result: a title and the author shown next to it.
///
/// Fields are private so a `Book` cannot change after the decoder builds it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    author: String,
    title: String,
}

impl Book {
    pub fn new(author: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
        }
    }

    /// May be empty when the upstream record lists no authors.
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Top-level search response. `items` is absent upstream when nothing
/// matched, which surfaces as a deserialization error.
#[derive(Debug, Deserialize)]
pub struct VolumesPage<T> {
    pub items: Vec<T>,
}

/// A single entry of `items`.
#[derive(Debug, Deserialize)]
pub struct Volume {
    #[serde(rename = "volumeInfo")]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
pub struct VolumeInfo {
    pub title: String,
    pub authors: Option<Vec<String>>,
}
