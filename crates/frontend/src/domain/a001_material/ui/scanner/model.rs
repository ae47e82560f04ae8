use contracts::domain::a001_material::aggregate::MaterialRecord;
use contracts::shared::api_error::ApiErrorBody;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;

use crate::domain::a001_material::lookup::LookupFailure;
use crate::shared::api_utils::{api_url, material_path};

/// Таймаут запроса поиска
const LOOKUP_TIMEOUT_MS: u32 = 10_000;

/// GET /api/materials/{code}
pub async fn fetch_material(code: &str) -> Result<MaterialRecord, LookupFailure> {
    let url = api_url(&material_path(code));
    log::info!("fetching material: {}", url);

    let abort = web_sys::AbortController::new()
        .map_err(|e| LookupFailure::Server(format!("AbortController unavailable: {e:?}")))?;
    let signal = abort.signal();
    let timeout = Timeout::new(LOOKUP_TIMEOUT_MS, move || abort.abort());

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .abort_signal(Some(&signal))
        .send()
        .await
        .map_err(|e| LookupFailure::Server(format!("Failed to send request: {}", e)))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| LookupFailure::Server(format!("Failed to read response: {}", e)))?;
    timeout.cancel();

    map_response(status, &body)
}

/// Разбор ответа сервиса по статусу
pub fn map_response(status: u16, body: &str) -> Result<MaterialRecord, LookupFailure> {
    match status {
        200..=299 => serde_json::from_str(body)
            .map_err(|e| LookupFailure::Server(format!("Failed to parse response: {}", e))),
        404 => Err(LookupFailure::NotFound),
        _ => {
            let detail = serde_json::from_str::<ApiErrorBody>(body)
                .map(|b| match b.error {
                    Some(error) => format!("HTTP {}: {} ({})", status, b.message, error),
                    None => format!("HTTP {}: {}", status, b.message),
                })
                .unwrap_or_else(|_| format!("HTTP {}", status));
            Err(LookupFailure::Server(detail))
        }
    }
}
