use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api_error::ApiErrorBody;

use crate::domain::a001_material::{service, MaterialLookupError};
use crate::routes::AppState;

/// GET /api/materials/:qr_code_id
pub async fn get_by_qr_code_id(
    State(state): State<AppState>,
    Path(qr_code_id): Path<String>,
) -> Response {
    match service::get_material(state.materials.as_ref(), &qr_code_id).await {
        Ok(record) => Json(record).into_response(),
        Err(MaterialLookupError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, Json(ApiErrorBody::not_found())).into_response()
        }
        Err(MaterialLookupError::Store(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorBody::server_error(e.to_string())),
        )
            .into_response(),
    }
}
