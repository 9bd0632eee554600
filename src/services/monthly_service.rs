use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::{Date, Month, Time};

use crate::errors::{ApiError, ReadingError};
use crate::models::Metric;
use crate::repositories::ReadingRepository;

use super::round2;

/// Average of one metric over one calendar month. Months without readings
/// are simply absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthlyAverage {
    /// Full English month name
    pub month: String,
    pub value: f64,
}

pub struct MonthlyService {
    repository: Arc<ReadingRepository>,
}

impl MonthlyService {
    pub fn new(repository: Arc<ReadingRepository>) -> Self {
        Self { repository }
    }

    /// Per-month averages of `metric` within `[Jan 1 of year, Jan 1 of
    /// year+1)` UTC, ascending by month number. Grouping keeps full
    /// precision; only the reported value is rounded.
    pub async fn monthly_averages(
        &self,
        year: i32,
        metric: Metric,
    ) -> Result<Vec<MonthlyAverage>, ApiError> {
        let start = year_start(year)?;
        let end = year_start(year + 1)?;

        let groups = self.repository.group_by_month(start, end, metric).await?;

        let mut averages = Vec::with_capacity(groups.len());
        for group in groups {
            let month = u8::try_from(group.month)
                .ok()
                .and_then(|m| Month::try_from(m).ok())
                .ok_or(ReadingError::InvalidYear)?;

            let average = if group.count > 0 {
                group.total / group.count as f64
            } else {
                0.0
            };

            averages.push(MonthlyAverage {
                month: month.to_string(),
                value: round2(average),
            });
        }

        Ok(averages)
    }
}

fn year_start(year: i32) -> Result<time::OffsetDateTime, ReadingError> {
    Ok(Date::from_calendar_date(year, Month::January, 1)
        .map_err(|_| ReadingError::InvalidYear)?
        .with_time(Time::MIDNIGHT)
        .assume_utc())
}
