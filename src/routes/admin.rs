//! Admin routes
//!
//! Registration of access tokens, pages and texts. Every request carries the
//! configured admin token in the `X-Access-Token` header; without a
//! configured token the routes refuse all requests.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{Item, ItemRepository, RegisterToken, TextRepository, Token, TokenRepository, UpsertItem};
use crate::error::{AppError, Result};
use crate::search::TextIndex;
use crate::state::AppState;
use crate::text::{words_to_text, Text, TextSource, TextType};

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Create the admin router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register_token", post(register_token))
        .route("/items", post(upsert_item))
        .route("/texts", post(index_text))
        .route("/reindex", post(reindex))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.config().admin.access_token.as_deref() else {
        return Err(AppError::Forbidden("Admin access is disabled".to_string()));
    };

    let given = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if given != expected {
        tracing::warn!("Rejected admin request with invalid access token");
        return Err(AppError::Forbidden("Invalid access token".to_string()));
    }

    Ok(())
}

/// Register an access token for a collection
///
/// POST /admin/register_token
async fn register_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterToken>,
) -> Result<(StatusCode, Json<Token>)> {
    authorize(&state, &headers)?;

    let token = TokenRepository::new(state.db()).register(&request).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// Create or replace a page record
///
/// POST /admin/items
async fn upsert_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpsertItem>,
) -> Result<Json<Item>> {
    authorize(&state, &headers)?;

    let item = ItemRepository::new(state.db()).upsert(&request).await?;
    Ok(Json(item))
}

/// Index text request
#[derive(Debug, Deserialize)]
pub struct IndexText {
    pub id: String,
    pub item_id: String,
    pub collection_id: String,
    pub text_type: TextType,
    pub language: Option<String>,
    pub source: TextSource,
    /// Path below the data directory; required for ALTO
    pub file_path: Option<String>,
    /// Running text of a plain source; read from `file_path` when absent
    pub text: Option<String>,
}

/// Index the text of a page
///
/// POST /admin/texts
async fn index_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<IndexText>,
) -> Result<(StatusCode, Json<Text>)> {
    authorize(&state, &headers)?;

    let streams = state.word_streams();
    let body = match (request.source, request.file_path.as_deref(), request.text) {
        (TextSource::Alto, Some(file_path), _) => {
            streams.invalidate(file_path);
            words_to_text(&streams.provider().read_words(file_path).await?)
        }
        (TextSource::Alto, None, _) => {
            return Err(AppError::BadRequest(
                "ALTO texts require a file_path".to_string(),
            ))
        }
        (TextSource::Plain, _, Some(text)) => text,
        (TextSource::Plain, Some(file_path), None) => streams.provider().read_plain(file_path).await?,
        (TextSource::Plain, None, None) => {
            return Err(AppError::BadRequest(
                "Plain texts require a text or a file_path".to_string(),
            ))
        }
    };

    let text = Text {
        id: request.id,
        item_id: request.item_id,
        collection_id: request.collection_id,
        text_type: request.text_type,
        language: request.language.filter(|l| !l.is_empty()),
        source: request.source,
        file_path: request.file_path,
        text: body,
    };

    TextRepository::new(state.db()).upsert(&text).await?;
    tracing::info!(
        "Indexed {} text {} of {} ({} chars)",
        text.text_type.as_str(),
        text.id,
        text.collection_id,
        text.text.len()
    );

    Ok((StatusCode::CREATED, Json(text)))
}

#[derive(Debug, Serialize)]
pub struct ReindexResponse {
    pub texts_indexed: usize,
}

/// Rebuild the full-text index from the stored texts
///
/// POST /admin/reindex
async fn reindex(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ReindexResponse>> {
    authorize(&state, &headers)?;

    let texts_indexed = TextIndex::new(state.db()).rebuild().await?;
    tracing::info!("Rebuilt text index over {} texts", texts_indexed);

    Ok(Json(ReindexResponse { texts_indexed }))
}
