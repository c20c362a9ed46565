//! JSON-LD responses with content negotiation

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// IIIF JSON-LD response body
///
/// Served as `application/ld+json` with the context as profile, or as plain
/// `application/json` for clients that only accept JSON.
pub struct JsonLd<T> {
    body: T,
    context: &'static str,
    plain_json: bool,
}

impl<T: Serialize> JsonLd<T> {
    pub fn new(body: T, context: &'static str, headers: &HeaderMap) -> Self {
        Self {
            body,
            context,
            plain_json: accepts_only_json(headers),
        }
    }

    fn content_type(&self) -> String {
        if self.plain_json {
            "application/json".to_string()
        } else {
            format!("application/ld+json;profile=\"{}\"", self.context)
        }
    }
}

fn accepts_only_json(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let media_types = accept
        .split(',')
        .map(|part| part.split(';').next().unwrap_or("").trim())
        .filter(|media| !media.is_empty());

    let mut saw_json = false;
    for media in media_types {
        match media {
            "application/json" => saw_json = true,
            "application/ld+json" | "*/*" | "application/*" => return false,
            _ => {}
        }
    }
    saw_json
}

impl<T: Serialize> IntoResponse for JsonLd<T> {
    fn into_response(self) -> Response {
        let content_type = self.content_type();
        match serde_json::to_vec(&self.body) {
            Ok(bytes) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_str(&content_type)
                        .unwrap_or(HeaderValue::from_static("application/json")),
                )],
                bytes,
            )
                .into_response(),
            Err(e) => crate::error::AppError::Internal(e.to_string()).into_response(),
        }
    }
}
