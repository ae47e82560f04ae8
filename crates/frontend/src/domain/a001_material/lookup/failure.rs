use thiserror::Error;

/// Ошибки цикла сканирования / поиска
///
/// `Display` возвращает текст для пользователя.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("QR 코드 ID를 입력해주세요.")]
    Validation,

    #[error("카메라를 시작할 수 없습니다. 카메라 권한을 확인해주세요.")]
    CameraPermissionDenied,

    #[error("사용 가능한 카메라가 없습니다.")]
    NoCameraAvailable,

    #[error("이 브라우저는 QR 코드 인식을 지원하지 않습니다.")]
    DecoderUnavailable,

    #[error("해당 QR 코드에 대한 소재 정보를 찾을 수 없습니다.")]
    NotFound,

    /// Детали идут в лог, пользователь видит общий текст
    #[error("소재 정보를 가져오는 데 실패했습니다. 서버에 문제가 있을 수 있습니다.")]
    Server(String),

    #[error("이미 조회 중입니다.")]
    LookupInProgress,
}

impl LookupFailure {
    pub fn detail(&self) -> Option<&str> {
        match self {
            LookupFailure::Server(detail) => Some(detail),
            _ => None,
        }
    }
}
