//! IIIF Image API routes
//!
//! `info.json` is answered locally from the page record; image requests are
//! proxied to the configured image server.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::db::{Item, ItemRepository};
use crate::error::{AppError, Result};
use crate::iiif::{image_info, ImageInfo, JsonLd, IMAGE_2_CONTEXT};
use crate::image::ImageOptions;
use crate::state::AppState;

/// Create the image router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/image/:id/info.json", get(get_info))
        .route(
            "/image/:id/:region/:size/:rotation/:quality_format",
            get(get_image),
        )
}

async fn find_item(state: &AppState, id: &str) -> Result<Item> {
    ItemRepository::new(state.db())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
}

/// GET /iiif/image/:id/info.json
async fn get_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<JsonLd<ImageInfo>> {
    let item = find_item(&state, &id).await?;
    let client = state.image_server();

    Ok(JsonLd::new(
        image_info(state.uris(), &item, client.kind(), client.max_size()),
        IMAGE_2_CONTEXT,
        &headers,
    ))
}

/// GET /iiif/image/:id/full/!400,400/0/default.jpg
async fn get_image(
    State(state): State<AppState>,
    Path((id, region, size, rotation, quality_format)): Path<(String, String, String, String, String)>,
) -> Result<Response> {
    let options = ImageOptions::from_segments(&region, &size, &rotation, &quality_format)?;
    let item = find_item(&state, &id).await?;
    let image_path = item
        .image_path
        .as_deref()
        .ok_or_else(|| AppError::NotFound(format!("Item {} has no image", id)))?;

    let result = state.image_server().fetch(image_path, &options).await?;
    let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let Some(image) = result.image else {
        return Ok(status.into_response());
    };

    let mut response = Response::builder().status(status).header(
        header::CONTENT_TYPE,
        result.content_type.as_deref().unwrap_or("application/octet-stream"),
    );
    if let Some(length) = result.content_length {
        response = response.header(header::CONTENT_LENGTH, length);
    }

    response
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(Body::from(image))
        .map_err(|e| AppError::Internal(e.to_string()))
}
