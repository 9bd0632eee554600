use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid year")]
    InvalidYear,

    #[error("No readings in the last 24 hours")]
    NoData,
}

impl ReadingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReadingError::MissingField(_) => StatusCode::BAD_REQUEST,
            ReadingError::UnknownMetric(_) => StatusCode::BAD_REQUEST,
            ReadingError::InvalidYear => StatusCode::BAD_REQUEST,
            // An empty window is an expected steady state, not a fault
            ReadingError::NoData => StatusCode::NOT_FOUND,
        }
    }
}
