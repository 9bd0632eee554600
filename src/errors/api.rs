use super::{FirmwareError, LocationError, ReadingError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Reading error: {0}")]
    ReadingError(#[from] ReadingError),

    #[error("Location error: {0}")]
    LocationError(#[from] LocationError),

    #[error("Firmware error: {0}")]
    FirmwareError(#[from] FirmwareError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
