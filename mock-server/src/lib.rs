use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

pub const VOLUMES_PATH: &str = "/books/v1/volumes";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Volume {
    pub kind: String,
    pub id: String,
    #[serde(rename = "volumeInfo")]
    pub volume_info: VolumeInfo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// Search response. Like the real API, `items` is left out entirely when
/// nothing matched.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    pub kind: String,
    pub total_items: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Volume>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub type Catalog = Arc<Vec<Volume>>;

/// Build a catalog entry. An empty `authors` slice leaves the field out.
pub fn volume(title: &str, authors: &[&str]) -> Volume {
    Volume {
        kind: "books#volume".to_string(),
        id: Uuid::new_v4().simple().to_string(),
        volume_info: VolumeInfo {
            title: title.to_string(),
            authors: if authors.is_empty() {
                None
            } else {
                Some(authors.iter().map(|a| a.to_string()).collect())
            },
            published_date: None,
        },
    }
}

pub fn default_catalog() -> Vec<Volume> {
    vec![
        volume("Dune", &["Frank Herbert"]),
        volume("Dune Messiah", &["Frank Herbert"]),
        volume("Children of Dune", &["Frank Herbert"]),
        volume("Good Omens", &["Terry Pratchett", "Neil Gaiman"]),
        volume("The Left Hand of Darkness", &["Ursula K. Le Guin"]),
        volume("Beowulf", &[]),
    ]
}

pub fn app() -> Router {
    app_with_catalog(default_catalog())
}

pub fn app_with_catalog(volumes: Vec<Volume>) -> Router {
    let catalog: Catalog = Arc::new(volumes);
    Router::new()
        .route(VOLUMES_PATH, get(search_volumes))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_catalog(listener: TcpListener, volumes: Vec<Volume>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_catalog(volumes)).await
}

async fn search_volumes(
    State(catalog): State<Catalog>,
    Query(params): Query<SearchParams>,
) -> Result<Json<VolumesResponse>, (StatusCode, Json<Value>)> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(missing_query());
    }

    let terms: Vec<String> = query
        .split_whitespace()
        .map(|term| term.trim_matches('"').to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();
    let items: Vec<Volume> = catalog
        .iter()
        .filter(|v| terms.iter().all(|term| matches_term(&v.volume_info, term)))
        .cloned()
        .collect();
    debug!(query = %query, matched = items.len(), "volumes search");

    Ok(Json(VolumesResponse {
        kind: "books#volumes".to_string(),
        total_items: items.len(),
        items,
    }))
}

/// `intitle:` and `inauthor:` narrow a term to one field; bare terms match
/// either.
fn matches_term(info: &VolumeInfo, term: &str) -> bool {
    let in_title = |t: &str| info.title.to_lowercase().contains(t);
    let in_authors = |t: &str| {
        info.authors
            .iter()
            .flatten()
            .any(|a| a.to_lowercase().contains(t))
    };

    if let Some(t) = term.strip_prefix("intitle:") {
        in_title(t)
    } else if let Some(t) = term.strip_prefix("inauthor:") {
        in_authors(t)
    } else {
        in_title(term) || in_authors(term)
    }
}

fn missing_query() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": {
                "code": 400,
                "message": "Missing query.",
                "errors": [{ "message": "Missing query.", "domain": "global", "reason": "queryRequired" }]
            }
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str, authors: &[&str]) -> VolumeInfo {
        volume(title, authors).volume_info
    }

    #[test]
    fn volume_serializes_with_upstream_field_names() {
        let json = serde_json::to_value(volume("Dune", &["Frank Herbert"])).unwrap();
        assert_eq!(json["kind"], "books#volume");
        assert_eq!(json["volumeInfo"]["title"], "Dune");
        assert_eq!(json["volumeInfo"]["authors"][0], "Frank Herbert");
    }

    #[test]
    fn volume_without_authors_omits_the_field() {
        let json = serde_json::to_value(volume("Beowulf", &[])).unwrap();
        assert!(json["volumeInfo"].get("authors").is_none());
    }

    #[test]
    fn empty_response_omits_items() {
        let response = VolumesResponse {
            kind: "books#volumes".to_string(),
            total_items: 0,
            items: Vec::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalItems"], 0);
        assert!(json.get("items").is_none());
    }

    #[test]
    fn bare_term_matches_title_or_author() {
        assert!(matches_term(&info("Dune", &["Frank Herbert"]), "dune"));
        assert!(matches_term(&info("Dune", &["Frank Herbert"]), "herbert"));
        assert!(!matches_term(&info("Dune", &["Frank Herbert"]), "gaiman"));
    }

    #[test]
    fn field_prefixes_narrow_the_match() {
        let good_omens = info("Good Omens", &["Terry Pratchett", "Neil Gaiman"]);
        assert!(matches_term(&good_omens, "inauthor:gaiman"));
        assert!(!matches_term(&good_omens, "intitle:gaiman"));
        assert!(matches_term(&good_omens, "intitle:omens"));
    }
}
