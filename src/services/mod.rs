mod bucket_service;
mod firmware_service;
mod monthly_service;
mod slot;
mod stats_service;

pub use bucket_service::{BucketService, HalfHourBucket, BUCKET_COUNT, BUCKET_WIDTH};
pub use firmware_service::{
    FirmwareDownload, FirmwareService, FirmwareSlot, FirmwareUpload, MAX_FIRMWARE_BYTES,
};
pub use monthly_service::{MonthlyAverage, MonthlyService};
pub use slot::SingleSlotStore;
pub use stats_service::{increase, StatCard, StatsService, TrendStats};

/// Rounds to two decimal places at the presentation edge.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
