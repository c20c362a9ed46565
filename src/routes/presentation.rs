//! Presentation routes
//!
//! The manifest of a document, and the texts its canvases point to.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::db::{ItemRepository, TextRepository};
use crate::error::{AppError, Result};
use crate::iiif::{manifest, JsonLd, Manifest, PRESENTATION_3_CONTEXT};
use crate::state::AppState;
use crate::text::{Text, TextSource};

/// Create the manifest router, nested below `/iiif`
pub fn router() -> Router<AppState> {
    Router::new().route("/presentation/:id/manifest", get(get_manifest))
}

/// Create the text router, nested below `/text`
pub fn text_router() -> Router<AppState> {
    Router::new()
        .route("/:text_id", get(get_text_file))
        .route("/:text_id/plain", get(get_text_plain))
}

/// GET /iiif/presentation/letters-1875/manifest
async fn get_manifest(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<JsonLd<Manifest>> {
    let items = ItemRepository::new(state.db());
    let pages = items.children(&id).await?;
    if pages.is_empty() {
        return Err(AppError::NotFound(format!("Manifest {} not found", id)));
    }

    let title = items.get(&id).await?.and_then(|root| root.label);
    let texts = TextRepository::new(state.db())
        .list_for_collection(&id, None, None)
        .await?;
    let profile = state.image_server().kind().profile().profile;

    let manifest = manifest(state.uris(), &id, title.as_deref(), &pages, &texts, &profile);
    Ok(JsonLd::new(manifest, PRESENTATION_3_CONTEXT, &headers))
}

async fn find_text(state: &AppState, text_id: &str) -> Result<Text> {
    TextRepository::new(state.db())
        .get(text_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Text {} not found", text_id)))
}

/// Source file of a text; ALTO is served as XML
///
/// GET /text/t-0003
async fn get_text_file(
    State(state): State<AppState>,
    Path(text_id): Path<String>,
) -> Result<impl IntoResponse> {
    let text = find_text(&state, &text_id).await?;

    let (content_type, body) = match (text.source, text.file_path.as_deref()) {
        (TextSource::Alto, Some(file_path)) => (
            "application/xml",
            state.word_streams().provider().read_plain(file_path).await?,
        ),
        (TextSource::Plain, Some(file_path)) => (
            "text/plain; charset=utf-8",
            state.word_streams().provider().read_plain(file_path).await?,
        ),
        (_, None) => ("text/plain; charset=utf-8", text.text),
    };

    Ok(([(header::CONTENT_TYPE, content_type)], body))
}

/// Running text of a text
///
/// GET /text/t-0003/plain
async fn get_text_plain(
    State(state): State<AppState>,
    Path(text_id): Path<String>,
) -> Result<impl IntoResponse> {
    let text = find_text(&state, &text_id).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text.text))
}
