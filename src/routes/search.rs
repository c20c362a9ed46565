//! IIIF Content Search routes
//!
//! Search and autocomplete over the texts of one document, optionally narrowed
//! to a text type and language:
//!
//! - `GET /iiif/search/:id[/:text_type[/:language]]?q=`
//! - `GET /iiif/autocomplete/:id[/:text_type[/:language]]?q=`

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::db::ItemRepository;
use crate::error::{AppError, Result};
use crate::iiif::{
    annotation_list, term_list, AnnotationList, JsonLd, SearchScope, TermList, SEARCH_1_CONTEXT,
};
use crate::search::{collect_results, suggest_terms, TextFilter, TextIndex};
use crate::state::AppState;
use crate::text::TextType;

/// Create the search router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search/:id", get(search))
        .route("/search/:id/:text_type", get(search))
        .route("/search/:id/:text_type/:language", get(search))
        .route("/autocomplete/:id", get(autocomplete))
        .route("/autocomplete/:id/:text_type", get(autocomplete))
        .route("/autocomplete/:id/:text_type/:language", get(autocomplete))
}

/// Path parameters shared by search and autocomplete
#[derive(Debug, Deserialize)]
pub struct SearchPath {
    pub id: String,
    #[serde(default)]
    pub text_type: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl SearchPath {
    fn text_type(&self) -> Result<Option<TextType>> {
        self.text_type
            .as_deref()
            .map(|t| t.parse().map_err(AppError::BadRequest))
            .transpose()
    }
}

/// Split query parameters into the query and the unsupported rest
fn query_and_ignored(mut params: HashMap<String, String>) -> Result<(String, Vec<String>)> {
    let query = params
        .remove("q")
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing query parameter q".to_string()))?;

    let mut ignored: Vec<String> = params.into_keys().collect();
    ignored.sort();

    Ok((query, ignored))
}

/// Search endpoint
///
/// GET /iiif/search/letters-1875/translation/en?q=dear sir
async fn search(
    State(state): State<AppState>,
    Path(path): Path<SearchPath>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<JsonLd<AnnotationList>> {
    let text_type = path.text_type()?;
    let (query, ignored) = query_and_ignored(params)?;
    let filter = TextFilter {
        text_type,
        language: path.language.as_deref(),
    };

    let texts = TextIndex::new(state.db())
        .search(&path.id, &query, &filter, state.config().search.max_results)
        .await?;
    let results = collect_results(texts, &query, state.config().search.context_words);
    let items = ItemRepository::new(state.db()).children(&path.id).await?;

    tracing::debug!(
        "Search {:?} in {}: {} texts with matches",
        query,
        path.id,
        results.len()
    );

    let scope = SearchScope {
        collection_id: &path.id,
        query: &query,
        text_type,
        language: path.language.as_deref(),
        ignored,
    };
    let list = annotation_list(state.uris(), &scope, &results, &items, state.word_streams()).await?;

    Ok(JsonLd::new(list, SEARCH_1_CONTEXT, &headers))
}

/// Autocomplete endpoint
///
/// GET /iiif/autocomplete/letters-1875?q=dea
async fn autocomplete(
    State(state): State<AppState>,
    Path(path): Path<SearchPath>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<JsonLd<TermList>> {
    let text_type = path.text_type()?;
    let (query, ignored) = query_and_ignored(params)?;
    let filter = TextFilter {
        text_type,
        language: path.language.as_deref(),
    };

    let texts = TextIndex::new(state.db())
        .search_prefix(&path.id, &query, &filter, state.config().search.max_results)
        .await?;
    let suggestions: Vec<Vec<String>> = texts
        .iter()
        .flat_map(|text| suggest_terms(&text.text, &query))
        .collect();

    let scope = SearchScope {
        collection_id: &path.id,
        query: &query,
        text_type,
        language: path.language.as_deref(),
        ignored,
    };

    Ok(JsonLd::new(
        term_list(state.uris(), &scope, &suggestions),
        SEARCH_1_CONTEXT,
        &headers,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_and_ignored() {
        let params = HashMap::from([
            ("q".to_string(), " sea ".to_string()),
            ("motivation".to_string(), "painting".to_string()),
            ("date".to_string(), "1875".to_string()),
        ]);

        let (query, ignored) = query_and_ignored(params).unwrap();
        assert_eq!(query, "sea");
        assert_eq!(ignored, vec!["date", "motivation"]);
    }

    #[test]
    fn test_missing_query_rejected() {
        let params = HashMap::from([("q".to_string(), "  ".to_string())]);
        assert!(matches!(query_and_ignored(params), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_unknown_text_type_rejected() {
        let path = SearchPath {
            id: "doc".to_string(),
            text_type: Some("summary".to_string()),
            language: None,
        };
        assert!(path.text_type().is_err());
    }
}
