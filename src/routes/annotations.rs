//! Annotation page routes

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::get,
    Router,
};

use crate::db::{ItemRepository, TextRepository};
use crate::error::{AppError, Result};
use crate::iiif::{annotation_page, AnnotationPage, JsonLd, PRESENTATION_3_CONTEXT};
use crate::state::AppState;

/// Create the annotations router
pub fn router() -> Router<AppState> {
    Router::new().route("/annopage/:collection_id/:text_id", get(get_annotation_page))
}

/// Annotation page of a text, linked to its neighbours in the document
///
/// GET /iiif/annopage/letters-1875/t-0003-en
async fn get_annotation_page(
    State(state): State<AppState>,
    Path((collection_id, text_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<JsonLd<AnnotationPage>> {
    let texts = TextRepository::new(state.db());

    let text = texts
        .get(&text_id)
        .await?
        .filter(|text| text.collection_id == collection_id)
        .ok_or_else(|| AppError::NotFound(format!("Text {} not found", text_id)))?;

    let items = ItemRepository::new(state.db()).children(&collection_id).await?;
    let siblings = texts
        .list_for_resource(&collection_id, text.text_type, text.language.as_deref())
        .await?;

    let words = if text.source.is_positional() {
        Some(state.word_streams().words(&text).await?)
    } else {
        None
    };

    let page = annotation_page(
        state.uris(),
        &text,
        &items,
        &siblings,
        words.as_deref().map(Vec::as_slice),
    )?;

    Ok(JsonLd::new(page, PRESENTATION_3_CONTEXT, &headers))
}
