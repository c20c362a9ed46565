//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::Result;
use crate::search::{IndexStats, TextIndex};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub index: IndexStats,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let index = TextIndex::new(state.db()).get_stats().await?;

    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "iiif-text-server",
        index,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
