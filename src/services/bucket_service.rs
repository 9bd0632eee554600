use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::errors::ReadingError;
use crate::models::Reading;

use super::round2;

pub const BUCKET_COUNT: usize = 48;
pub const BUCKET_WIDTH: Duration = Duration::minutes(30);

/// Per-bucket means over a rolling 24 hour window. A bucket with no samples
/// reports null for all three metrics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HalfHourBucket {
    /// Zero-padded HH:MM of the bucket start, in the configured offset
    pub time_range: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dust: Option<f64>,
}

/// Partitions the last 24 hours into 48 contiguous half-hour buckets aligned
/// to the caller's half-hour boundary, not the top of the hour.
pub struct BucketService {
    offset: UtcOffset,
}

impl BucketService {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }

    /// Buckets readings already restricted to `[now - 24h, now]`. An empty
    /// window is a distinct `NoData` outcome, never 48 null buckets.
    pub fn half_hourly(
        &self,
        now: OffsetDateTime,
        readings: &[Reading],
    ) -> Result<Vec<HalfHourBucket>, ReadingError> {
        if readings.is_empty() {
            return Err(ReadingError::NoData);
        }

        // Align to the current half-hour so boundaries stay stable across
        // repeated calls within the same half-hour, and the 48th bucket
        // always ends at or before "now".
        let boundary_offset = Duration::minutes(i64::from(now.minute() % 30));
        let window_start = now
            - Duration::hours(24)
            - boundary_offset
            - Duration::seconds(i64::from(now.second()))
            - Duration::nanoseconds(i64::from(now.nanosecond()));

        let mut buckets = Vec::with_capacity(BUCKET_COUNT);
        for i in 0..BUCKET_COUNT {
            let start = window_start + BUCKET_WIDTH * i as i32;
            let end = start + BUCKET_WIDTH;
            let label = format!("{:02}:{:02}", start.hour(), start.minute());

            let selected: Vec<&Reading> = readings
                .iter()
                .filter(|r| r.timestamp >= start && r.timestamp < end)
                .collect();

            if selected.is_empty() {
                buckets.push(HalfHourBucket {
                    time_range: label,
                    temperature: None,
                    humidity: None,
                    dust: None,
                });
            } else {
                let n = selected.len() as f64;
                let sum_temperature: f64 = selected.iter().map(|r| r.temperature).sum();
                let sum_humidity: f64 = selected.iter().map(|r| r.humidity).sum();
                let sum_dust: f64 = selected.iter().map(|r| r.air_quality).sum();

                buckets.push(HalfHourBucket {
                    time_range: label,
                    temperature: Some(round2(sum_temperature / n)),
                    humidity: Some(round2(sum_humidity / n)),
                    dust: Some(round2(sum_dust / n)),
                });
            }
        }

        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, Time};

    use super::*;

    fn service() -> BucketService {
        BucketService::new(UtcOffset::from_hms(5, 0, 0).unwrap())
    }

    fn at(hour: u8, minute: u8, second: u8) -> OffsetDateTime {
        Date::from_calendar_date(2025, Month::June, 10)
            .unwrap()
            .with_time(Time::from_hms(hour, minute, second).unwrap())
            .assume_offset(UtcOffset::from_hms(5, 0, 0).unwrap())
    }

    fn reading(timestamp: OffsetDateTime, temperature: f64) -> Reading {
        Reading {
            id: 0,
            temperature,
            humidity: 40.0,
            air_quality: 10.0,
            timestamp,
        }
    }

    #[test]
    fn test_empty_window_is_no_data() {
        let result = service().half_hourly(at(12, 0, 0), &[]);
        assert!(matches!(result, Err(ReadingError::NoData)));
    }

    #[test]
    fn test_exactly_48_contiguous_buckets() {
        let now = at(14, 17, 23);
        let readings = vec![reading(now - Duration::hours(1), 20.0)];

        let buckets = service().half_hourly(now, &readings).unwrap();
        assert_eq!(buckets.len(), 48);

        // Aligned to the caller's half-hour offset: 14:17 -> first bucket
        // starts at 14:00 the previous day.
        assert_eq!(buckets[0].time_range, "14:00");
        assert_eq!(buckets[1].time_range, "14:30");
        assert_eq!(buckets[47].time_range, "13:30");

        // Strictly increasing, 30 minutes apart
        let minutes_of = |label: &str| -> i32 {
            let (h, m) = label.split_once(':').unwrap();
            h.parse::<i32>().unwrap() * 60 + m.parse::<i32>().unwrap()
        };
        for pair in buckets.windows(2) {
            let step = (minutes_of(&pair[1].time_range) - minutes_of(&pair[0].time_range) + 1440) % 1440;
            assert_eq!(step, 30);
        }
    }

    #[test]
    fn test_bucket_mean_rounded_to_two_decimals() {
        let now = at(12, 0, 0);
        // Both fall in the final bucket [11:30, 12:00)
        let readings = vec![
            reading(at(11, 35, 0), 20.0),
            reading(at(11, 45, 0), 22.0),
        ];

        let buckets = service().half_hourly(now, &readings).unwrap();
        let last = &buckets[47];
        assert_eq!(last.time_range, "11:30");
        assert_eq!(last.temperature, Some(21.0));
        assert_eq!(last.humidity, Some(40.0));
        assert_eq!(last.dust, Some(10.0));
    }

    #[test]
    fn test_empty_bucket_reports_all_nulls() {
        let now = at(12, 0, 0);
        let readings = vec![reading(at(11, 35, 0), 20.0)];

        let buckets = service().half_hourly(now, &readings).unwrap();
        // Every bucket except the last has no readings
        for bucket in &buckets[..47] {
            assert!(bucket.temperature.is_none());
            assert!(bucket.humidity.is_none());
            assert!(bucket.dust.is_none());
        }
        assert!(buckets[47].temperature.is_some());
    }

    #[test]
    fn test_boundary_is_start_inclusive_end_exclusive() {
        let now = at(12, 0, 0);
        // Exactly on the final bucket boundary: belongs to [11:30, 12:00)
        let readings = vec![reading(at(11, 30, 0), 25.0)];

        let buckets = service().half_hourly(now, &readings).unwrap();
        assert_eq!(buckets[47].temperature, Some(25.0));
        assert!(buckets[46].temperature.is_none());
    }

    #[test]
    fn test_seconds_truncated_from_alignment() {
        // Calls within the same half-hour share the same alignment
        // regardless of seconds.
        let buckets_a = service()
            .half_hourly(at(12, 15, 10), &[reading(at(12, 0, 0), 20.0)])
            .unwrap();
        let buckets_b = service()
            .half_hourly(at(12, 15, 50), &[reading(at(12, 0, 0), 20.0)])
            .unwrap();
        assert_eq!(buckets_a[0].time_range, buckets_b[0].time_range);
    }
}
