use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::fs;
use tokio::sync::RwLock;
use tokio_util::io::ReaderStream;

use crate::errors::FirmwareError;

use super::SingleSlotStore;

/// Hard cap on an over-the-air image; the target chips cannot flash more.
pub const MAX_FIRMWARE_BYTES: usize = 10 * 1024 * 1024;

const PROBE_FILE: &str = ".slot-probe";

/// Metadata of the image currently occupying the slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FirmwareSlot {
    pub filename: String,
    pub size_bytes: u64,
    pub uploaded_at: OffsetDateTime,
    pub target_chip_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FirmwareUpload {
    pub filename: String,
    pub payload: Bytes,
    pub target_chip_id: Option<String>,
}

pub struct FirmwareDownload {
    pub filename: String,
    pub size_bytes: u64,
    pub stream: BoxStream<'static, std::io::Result<Bytes>>,
}

/// Single-slot store for OTA firmware images: at most one `.bin` file lives
/// in the slot directory, and an upload supersedes whatever was there.
///
/// The original deployment raced concurrent uploads on delete-then-write and
/// assumed a single producer. Here the whole delete+write sequence runs
/// under the write half of a slot lock, and downloads hold the read half for
/// the lifetime of the stream so an in-flight delete cannot invalidate them.
pub struct FirmwareService {
    slot_dir: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FirmwareService {
    /// Probes `candidates` in order and uses the first writable directory,
    /// falling back to the OS temp dir, which is always writable.
    pub fn new(candidates: &[String]) -> Self {
        let slot_dir = candidates
            .iter()
            .map(PathBuf::from)
            .find(|dir| Self::is_writable(dir))
            .unwrap_or_else(std::env::temp_dir);

        tracing::info!("firmware slot directory: {}", slot_dir.display());

        Self {
            slot_dir,
            lock: Arc::new(RwLock::new(())),
        }
    }

    pub fn slot_dir(&self) -> &Path {
        &self.slot_dir
    }

    fn is_writable(dir: &Path) -> bool {
        if std::fs::create_dir_all(dir).is_err() {
            return false;
        }

        let probe = dir.join(PROBE_FILE);
        match std::fs::write(&probe, b"") {
            Ok(()) => {
                let _ = std::fs::remove_file(&probe);
                true
            }
            Err(_) => false,
        }
    }

    /// Replaces the slot content. Rejections (empty payload, oversized
    /// payload, non-`.bin` name) happen before the old image is touched, so
    /// a failed upload never empties the slot.
    pub async fn upload(&self, upload: FirmwareUpload) -> Result<FirmwareSlot, FirmwareError> {
        if upload.payload.is_empty() {
            return Err(FirmwareError::NoFileProvided);
        }
        if upload.payload.len() > MAX_FIRMWARE_BYTES {
            return Err(FirmwareError::PayloadTooLarge {
                limit: MAX_FIRMWARE_BYTES,
            });
        }

        // Keep only the final path component of a client-supplied name
        let filename = Path::new(&upload.filename)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or(FirmwareError::NoFileProvided)?;

        // info and download only ever consider `.bin` files; anything else
        // would occupy the directory without being servable
        if !filename.ends_with(".bin") {
            return Err(FirmwareError::MalformedUpload(format!(
                "unsupported firmware filename: {filename}"
            )));
        }

        let _guard = self.lock.write().await;

        self.delete_bin_files().await?;

        let path = self.slot_dir.join(&filename);
        fs::write(&path, &upload.payload).await?;

        tracing::info!(filename = %filename, size = upload.payload.len(), "firmware uploaded");

        Ok(FirmwareSlot {
            filename,
            size_bytes: upload.payload.len() as u64,
            uploaded_at: OffsetDateTime::now_utc(),
            target_chip_id: upload.target_chip_id,
        })
    }

    /// Metadata of the current image, from file stats. `None` when the slot
    /// is empty.
    pub async fn info(&self) -> Result<Option<FirmwareSlot>, FirmwareError> {
        let _guard = self.lock.read().await;

        let Some((filename, path)) = self.find_slot_file().await? else {
            return Ok(None);
        };

        let metadata = fs::metadata(&path).await?;
        let uploaded_at = metadata
            .modified()
            .map(OffsetDateTime::from)
            .unwrap_or_else(|_| OffsetDateTime::now_utc());

        Ok(Some(FirmwareSlot {
            filename,
            size_bytes: metadata.len(),
            uploaded_at,
            target_chip_id: None,
        }))
    }

    /// Streams the current image. The returned stream holds a read guard on
    /// the slot, so a concurrent upload waits until the download finishes.
    pub async fn download(&self) -> Result<FirmwareDownload, FirmwareError> {
        let guard = self.lock.clone().read_owned().await;

        let (filename, path) = self
            .find_slot_file()
            .await?
            .ok_or(FirmwareError::NotFound)?;

        let metadata = fs::metadata(&path).await?;
        let file = fs::File::open(&path).await?;

        let stream = ReaderStream::new(file)
            .map(move |chunk| {
                let _held = &guard;
                chunk
            })
            .boxed();

        Ok(FirmwareDownload {
            filename,
            size_bytes: metadata.len(),
            stream,
        })
    }

    /// Picks the slot file among `.bin` candidates. `.ino.bin` wins over a
    /// generic `.bin`; names are sorted first so the tie-break is
    /// deterministic, not directory-order dependent.
    async fn find_slot_file(&self) -> Result<Option<(String, PathBuf)>, FirmwareError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.slot_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".bin") {
                names.push(name);
            }
        }
        names.sort();

        let chosen = names
            .iter()
            .find(|name| name.ends_with(".ino.bin"))
            .or_else(|| names.first())
            .cloned();

        Ok(chosen.map(|name| {
            let path = self.slot_dir.join(&name);
            (name, path)
        }))
    }

    async fn delete_bin_files(&self) -> Result<(), FirmwareError> {
        let mut entries = fs::read_dir(&self.slot_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().ends_with(".bin") {
                fs::remove_file(entry.path()).await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl SingleSlotStore for FirmwareService {
    type Item = FirmwareUpload;
    type Stored = FirmwareSlot;
    type Error = FirmwareError;

    async fn replace(&self, item: FirmwareUpload) -> Result<FirmwareSlot, FirmwareError> {
        self.upload(item).await
    }

    async fn current(&self) -> Result<Option<FirmwareSlot>, FirmwareError> {
        self.info().await
    }

    async fn clear(&self) -> Result<(), FirmwareError> {
        let _guard = self.lock.write().await;
        self.delete_bin_files().await
    }
}
