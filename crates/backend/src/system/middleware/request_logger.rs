use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Пишет в tracing: метод, путь, статус, длительность и размер ответа.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                method = %method,
                path = %path,
                status = parts.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "failed to read response body: {}",
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let size = format_size(bytes.len());
    let status = parts.status.as_u16();

    if parts.status.is_server_error() {
        tracing::error!(method = %method, path = %path, status, elapsed_ms, size = %size, "request");
    } else if parts.status.is_client_error() {
        tracing::warn!(method = %method, path = %path, status, elapsed_ms, size = %size, "request");
    } else {
        tracing::info!(method = %method, path = %path, status, elapsed_ms, size = %size, "request");
    }

    Response::from_parts(parts, Body::from(bytes))
}
