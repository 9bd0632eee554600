use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No sensor location registered")]
    NotFound,
}

impl LocationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LocationError::MissingField(_) => StatusCode::BAD_REQUEST,
            LocationError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}
