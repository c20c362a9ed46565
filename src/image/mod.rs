//! Image Module
//!
//! Proxies IIIF Image API requests to an external image server (sharp or
//! Loris) and describes its capabilities for `info.json`.

mod client;
mod types;

pub use client::ImageServerClient;
pub use types::{ImageOptions, ImageProfile, ImageResult, ImageServerKind};

/// Image server error types
#[derive(Debug, thiserror::Error)]
pub enum ImageServerError {
    #[error("No image server configured")]
    NotConfigured,

    #[error("Invalid image request: {0}")]
    InvalidRequest(String),

    #[error("Image server request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ImageServerError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
