use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FirmwareError {
    #[error("No firmware file provided")]
    NoFileProvided,

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    #[error("Firmware payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("No firmware file found")]
    NotFound,

    #[error("Firmware slot unavailable: {0}")]
    Io(#[from] std::io::Error),
}

impl FirmwareError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FirmwareError::NoFileProvided => StatusCode::BAD_REQUEST,
            FirmwareError::MalformedUpload(_) => StatusCode::BAD_REQUEST,
            FirmwareError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            FirmwareError::NotFound => StatusCode::NOT_FOUND,
            FirmwareError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
