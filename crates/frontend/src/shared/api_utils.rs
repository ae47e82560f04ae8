//! API utilities for frontend-backend communication

/// Порт сервиса поиска материалов
const API_PORT: u16 = 5000;

/// Get the base URL for API requests
///
/// Built from the current window location with the backend port,
/// e.g. "http://localhost:5000". Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname)
}

fn base_url(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Путь поиска материала; код кодируется как один сегмент пути
pub fn material_path(qr_code_id: &str) -> String {
    format!("/api/materials/{}", urlencoding::encode(qr_code_id))
}
