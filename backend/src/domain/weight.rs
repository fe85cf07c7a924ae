//! # Weight Series & Trend
//!
//! Pure derivations over care logs used by the weight chart and the
//! "current weight" card.
//!
//! The store hands logs back newest-first; the chart wants them oldest-first,
//! so the series is always re-sorted by timestamp regardless of input order.

use chrono::{DateTime, Utc};
use shared::WeightTrend;

use crate::domain::models::care_log::CareLog;

/// Chart label format, e.g. "Mar 4"
const DISPLAY_DATE_FORMAT: &str = "%b %-d";

#[derive(Debug, Clone, PartialEq)]
pub struct WeightPoint {
    pub date: String,
    pub timestamp: DateTime<Utc>,
    pub weight: f64,
}

/// Extract the chronologically ascending weight series from any mix of logs.
///
/// WEIGHT logs whose value is missing or not a usable number are skipped.
pub fn weight_series(logs: &[CareLog]) -> Vec<WeightPoint> {
    let mut series: Vec<WeightPoint> = logs
        .iter()
        .filter_map(|log| {
            log.weight_value().map(|weight| WeightPoint {
                date: log.timestamp.format(DISPLAY_DATE_FORMAT).to_string(),
                timestamp: log.timestamp,
                weight,
            })
        })
        .collect();

    // Stable sort keeps input order for identical timestamps
    series.sort_by_key(|point| point.timestamp);
    series
}

/// Classify a series by comparing its last point with its first.
///
/// Anything that is not a net increase is reported as stable, including a
/// net decrease.
pub fn weight_trend(series: &[WeightPoint]) -> WeightTrend {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => {
            if last.weight - first.weight > 0.0 {
                WeightTrend::Increasing
            } else {
                WeightTrend::Stable
            }
        }
        _ => WeightTrend::InsufficientData,
    }
}
