//! Route modules for the IIIF text server

pub mod admin;
pub mod annotations;
pub mod health;
pub mod image;
pub mod presentation;
pub mod search;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let iiif = Router::new()
        .merge(search::router())
        .merge(annotations::router())
        .merge(presentation::router())
        .merge(image::router());

    Router::new()
        .nest("/health", health::router())
        .nest("/iiif", iiif)
        .nest("/text", presentation::text_router())
        .nest("/admin", admin::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::memory_pool;

    async fn router() -> Router {
        app(AppState::new(Config::default(), memory_pool().await))
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = router()
            .await
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_text_page_is_not_found() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .uri("/iiif/annopage/doc/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_disabled_by_default() {
        let response = router()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/items")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"id":"p1","parent_id":"doc"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
