use serde::{Deserialize, Serialize};

use crate::errors::ReadingError;
use crate::models::{Metric, Reading};

/// One dashboard card: a value plus its percentage delta against a baseline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: f64,
    pub increase: String,
    pub description: String,
    pub icon: String,
}

/// Three cards per metric, fixed order: current, highest today, lowest today.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrendStats {
    pub temperature: Vec<StatCard>,
    pub humidity: Vec<StatCard>,
    #[serde(rename = "airquality")]
    pub air_quality: Vec<StatCard>,
}

/// Percentage delta of `current` against `previous`, with explicit sign and
/// one decimal place. A zero baseline yields the literal "0%" instead of a
/// division by zero.
pub fn increase(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return "0%".to_string();
    }

    let diff = ((current - previous) / previous) * 100.0;
    if diff >= 0.0 {
        format!("+{diff:.1}%")
    } else {
        format!("{diff:.1}%")
    }
}

pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// Builds trend cards from the last-24h readings, sorted newest first.
    /// An empty window is a distinct `NoData` outcome, not null cards.
    pub fn build(&self, readings: &[Reading]) -> Result<TrendStats, ReadingError> {
        if readings.is_empty() {
            return Err(ReadingError::NoData);
        }

        Ok(TrendStats {
            temperature: self.cards_for(Metric::Temperature, readings),
            humidity: self.cards_for(Metric::Humidity, readings),
            air_quality: self.cards_for(Metric::AirQuality, readings),
        })
    }

    fn cards_for(&self, metric: Metric, readings: &[Reading]) -> Vec<StatCard> {
        let values: Vec<f64> = readings.iter().map(|r| metric.value_of(r)).collect();

        let current = values[0];
        let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
        // Second-most-recent sample, or current itself when there is only
        // one reading to avoid a delta against nothing
        let previous = values.get(1).copied().unwrap_or(current);

        vec![
            StatCard {
                title: format!("Current {metric}"),
                value: current,
                increase: increase(current, previous),
                description: "from last 24 hours".to_string(),
                icon: metric.to_string(),
            },
            StatCard {
                title: format!("Highest {metric} Today"),
                value: highest,
                increase: increase(highest, current),
                description: "from last 24 hours".to_string(),
                icon: "up".to_string(),
            },
            StatCard {
                title: format!("Lowest {metric} Today"),
                value: lowest,
                increase: increase(lowest, current),
                description: "from last 24 hours".to_string(),
                icon: "down".to_string(),
            },
        ]
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;

    fn reading(minutes_ago: i64, temperature: f64, humidity: f64, air_quality: f64) -> Reading {
        Reading {
            id: 0,
            temperature,
            humidity,
            air_quality,
            timestamp: OffsetDateTime::now_utc() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_increase_formatting() {
        assert_eq!(increase(0.0, 0.0), "0%");
        assert_eq!(increase(110.0, 100.0), "+10.0%");
        assert_eq!(increase(90.0, 100.0), "-10.0%");
        assert_eq!(increase(100.0, 100.0), "+0.0%");
        assert_eq!(increase(5.0, 0.0), "0%");
    }

    #[test]
    fn test_empty_window_is_no_data() {
        let result = StatsService::new().build(&[]);
        assert!(matches!(result, Err(ReadingError::NoData)));
    }

    #[test]
    fn test_card_order_and_values() {
        // Newest first
        let readings = vec![
            reading(0, 22.0, 44.0, 12.0),
            reading(10, 20.0, 40.0, 10.0),
            reading(20, 25.0, 50.0, 15.0),
        ];

        let stats = StatsService::new().build(&readings).unwrap();
        let cards = &stats.temperature;
        assert_eq!(cards.len(), 3);

        assert_eq!(cards[0].title, "Current temperature");
        assert_eq!(cards[0].value, 22.0);
        // current 22 vs previous (second-most-recent) 20
        assert_eq!(cards[0].increase, "+10.0%");
        assert_eq!(cards[0].icon, "temperature");

        assert_eq!(cards[1].title, "Highest temperature Today");
        assert_eq!(cards[1].value, 25.0);
        assert_eq!(cards[1].icon, "up");

        assert_eq!(cards[2].title, "Lowest temperature Today");
        assert_eq!(cards[2].value, 20.0);
        assert_eq!(cards[2].icon, "down");

        assert_eq!(stats.air_quality[0].icon, "airquality");
    }

    #[test]
    fn test_single_reading_uses_itself_as_baseline() {
        let readings = vec![reading(0, 22.0, 44.0, 12.0)];

        let stats = StatsService::new().build(&readings).unwrap();
        assert_eq!(stats.temperature[0].increase, "+0.0%");
        assert_eq!(stats.temperature[1].value, 22.0);
        assert_eq!(stats.temperature[2].value, 22.0);
    }
}
