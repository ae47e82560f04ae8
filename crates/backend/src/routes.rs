use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::a001_material::MaterialStore;
use crate::{handlers, system};

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub materials: Arc<dyn MaterialStore>,
}

impl AppState {
    pub fn new(materials: Arc<dyn MaterialStore>) -> Self {
        Self { materials }
    }
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/materials/:qr_code_id",
            get(handlers::a001_material::get_by_qr_code_id),
        )
        .with_state(state)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_material::SeaOrmMaterialStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let store = SeaOrmMaterialStore::in_memory().await.unwrap();
        let app = configure_routes(AppState::new(Arc::new(store)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let store = SeaOrmMaterialStore::in_memory().await.unwrap();
        let app = configure_routes(AppState::new(Arc::new(store)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/materials/FABRIC-ABC-001")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
