//! Turns a volumes response body into `Book` records.
//!
//! # Design
//! The envelope is parsed first with `items` left as raw JSON values, then
//! each item is decoded into the typed `Volume` schema on its own. A bad item
//! stops decoding there, so callers still get every book that came before it.
//! A well-formed item with an empty title is skipped on its own.
//! Nothing here returns an error: structural problems are logged and the
//! partial list is returned.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::types::{Book, Volume, VolumeInfo, VolumesPage};

/// How the `authors` array of a volume is folded into `Book::author`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorPolicy {
    /// Keep only the last listed author, overwriting earlier ones.
    #[default]
    LastWins,
    /// Join every listed author with the given separator.
    Joined(String),
}

impl AuthorPolicy {
    fn author_of(&self, authors: Option<&[String]>) -> String {
        let authors = authors.unwrap_or_default();
        match self {
            AuthorPolicy::LastWins => authors.last().cloned().unwrap_or_default(),
            AuthorPolicy::Joined(separator) => authors.join(separator),
        }
    }
}

/// Decode with the default `LastWins` author policy.
pub fn decode(body: &str) -> Vec<Book> {
    decode_with(body, &AuthorPolicy::default())
}

/// Decode a response body, degrading to a partial or empty list on bad input.
///
/// An empty or blank body means "no results" and yields an empty list
/// without logging anything.
pub fn decode_with(body: &str, policy: &AuthorPolicy) -> Vec<Book> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let mut books = Vec::new();
    if let Err(err) = decode_into(body, policy, &mut books) {
        warn!(error = %err, decoded = books.len(), "problem parsing volumes response");
    }
    debug!(count = books.len(), "decoded volumes response");
    books
}

fn decode_into(body: &str, policy: &AuthorPolicy, books: &mut Vec<Book>) -> Result<(), SearchError> {
    let page: VolumesPage<Value> =
        serde_json::from_str(body).map_err(|e| SearchError::JsonStructure(e.to_string()))?;

    for (index, item) in page.items.into_iter().enumerate() {
        let volume: Volume = serde_json::from_value(item)
            .map_err(|e| SearchError::JsonStructure(format!("item {index}: {e}")))?;
        let VolumeInfo { title, authors } = volume.volume_info;
        if title.is_empty() {
            warn!(index, "skipping volume with empty title");
            continue;
        }
        books.push(Book::new(policy.author_of(authors.as_deref()), title));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_item_with_one_author() {
        let body = r#"{"items":[{"volumeInfo":{"title":"Dune","authors":["Frank Herbert"]}}]}"#;
        assert_eq!(decode(body), vec![Book::new("Frank Herbert", "Dune")]);
    }

    #[test]
    fn last_author_wins() {
        let body = r#"{"items":[{"volumeInfo":{"title":"X","authors":["A","B","C"]}}]}"#;
        assert_eq!(decode(body), vec![Book::new("C", "X")]);
    }

    #[test]
    fn joined_policy_keeps_every_author() {
        let body = r#"{"items":[{"volumeInfo":{"title":"X","authors":["A","B","C"]}}]}"#;
        let books = decode_with(body, &AuthorPolicy::Joined(", ".to_string()));
        assert_eq!(books, vec![Book::new("A, B, C", "X")]);
    }

    #[test]
    fn missing_authors_yields_empty_author() {
        let body = r#"{"items":[{"volumeInfo":{"title":"Beowulf"}}]}"#;
        assert_eq!(decode(body), vec![Book::new("", "Beowulf")]);
    }

    #[test]
    fn empty_authors_array_yields_empty_author() {
        let body = r#"{"items":[{"volumeInfo":{"title":"Beowulf","authors":[]}}]}"#;
        assert_eq!(decode(body), vec![Book::new("", "Beowulf")]);
    }

    #[test]
    fn blank_bodies_decode_to_nothing() {
        assert!(decode("").is_empty());
        assert!(decode("   \n\t ").is_empty());
    }

    #[test]
    fn empty_items_decode_to_nothing() {
        assert!(decode(r#"{"items":[]}"#).is_empty());
    }

    #[test]
    fn missing_items_decodes_to_nothing() {
        assert!(decode(r#"{"kind":"books#volumes","totalItems":0}"#).is_empty());
    }

    #[test]
    fn not_json_decodes_to_nothing() {
        assert!(decode("<html>Service Unavailable</html>").is_empty());
    }

    #[test]
    fn bad_item_keeps_earlier_books() {
        let body = r#"{"items":[
            {"volumeInfo":{"title":"First","authors":["A"]}},
            {"volumeInfo":{"authors":["B"]}},
            {"volumeInfo":{"title":"Third","authors":["C"]}}
        ]}"#;
        assert_eq!(decode(body), vec![Book::new("A", "First")]);
    }

    #[test]
    fn empty_title_skips_only_that_item() {
        let body = r#"{"items":[
            {"volumeInfo":{"title":"First"}},
            {"volumeInfo":{"title":"","authors":["Nobody"]}},
            {"volumeInfo":{"title":"Third","authors":["C"]}}
        ]}"#;
        assert_eq!(decode(body), vec![Book::new("", "First"), Book::new("C", "Third")]);
    }

    #[test]
    fn non_string_author_stops_decoding() {
        let body = r#"{"items":[{"volumeInfo":{"title":"X","authors":[42]}}]}"#;
        assert!(decode(body).is_empty());
    }

    #[test]
    fn preserves_item_order() {
        let body = r#"{"items":[
            {"volumeInfo":{"title":"One","authors":["A"]}},
            {"volumeInfo":{"title":"Two"}},
            {"volumeInfo":{"title":"Three","authors":["B","C"]}}
        ]}"#;
        let titles: Vec<_> = decode(body).iter().map(|b| b.title().to_string()).collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
    }
}
