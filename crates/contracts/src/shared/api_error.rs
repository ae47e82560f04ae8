use serde::{Deserialize, Serialize};

/// Сообщение 404 при отсутствии материала
pub const MATERIAL_NOT_FOUND_MESSAGE: &str = "소재 정보를 찾을 수 없습니다.";

/// Общее сообщение 500
pub const SERVER_ERROR_MESSAGE: &str = "서버 오류 발생";

/// Тело ответа с ошибкой (404 / 500)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn not_found() -> Self {
        Self {
            message: MATERIAL_NOT_FOUND_MESSAGE.to_string(),
            error: None,
        }
    }

    pub fn server_error(error: impl Into<String>) -> Self {
        Self {
            message: SERVER_ERROR_MESSAGE.to_string(),
            error: Some(error.into()),
        }
    }
}
