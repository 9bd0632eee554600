use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::{ApiError, FirmwareError};
use crate::services::{FirmwareService, FirmwareUpload, SingleSlotStore, MAX_FIRMWARE_BYTES};

#[derive(Clone)]
pub struct FirmwareState {
    pub service: Arc<FirmwareService>,
}

// The router's body limiter aborts an oversized upload mid-read; surface
// that as the same typed error the slot returns for an oversized payload
fn multipart_error(error: MultipartError) -> FirmwareError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        FirmwareError::PayloadTooLarge {
            limit: MAX_FIRMWARE_BYTES,
        }
    } else {
        FirmwareError::MalformedUpload(error.to_string())
    }
}

pub async fn upload_firmware(
    State(state): State<FirmwareState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut target_chip_id: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| "firmware.bin".to_string());
                let payload = field.bytes().await.map_err(multipart_error)?;
                file = Some((filename, payload));
            }
            Some("target_chip_id") => {
                target_chip_id = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (filename, payload) = file.ok_or(FirmwareError::NoFileProvided)?;

    let slot = state
        .service
        .replace(FirmwareUpload {
            filename,
            payload,
            target_chip_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn get_firmware_info(
    State(state): State<FirmwareState>,
) -> Result<impl IntoResponse, ApiError> {
    let info = state
        .service
        .current()
        .await?
        .ok_or(FirmwareError::NotFound)?;

    Ok(Json(info))
}

pub async fn download_firmware(
    State(state): State<FirmwareState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    // The chip id header is informational only; any node may fetch the slot
    if let Some(chip_id) = headers.get("x-chip-id").and_then(|v| v.to_str().ok()) {
        tracing::info!(chip_id = %chip_id, "firmware requested by device");
    }

    let download = state.service.download().await?;

    let response = Response::builder()
        .header(CONTENT_TYPE, "application/octet-stream")
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        )
        .header(CONTENT_LENGTH, download.size_bytes)
        .body(Body::from_stream(download.stream))
        .map_err(anyhow::Error::from)?;

    Ok(response)
}
