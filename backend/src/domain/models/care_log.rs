//! Domain model for a care log entry.
use chrono::{DateTime, SecondsFormat, Utc};
use shared::LogType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct CareLog {
    pub id: String,
    pub cat_id: String,
    pub log_type: LogType,
    pub timestamp: DateTime<Utc>,
    pub notes: String,
    pub value: Option<String>,
}

impl CareLog {
    pub fn generate_id() -> String {
        format!("log-{}", Uuid::new_v4().simple())
    }

    /// Numeric weight carried by a WEIGHT log, if it has a usable one
    pub fn weight_value(&self) -> Option<f64> {
        if self.log_type != LogType::Weight {
            return None;
        }
        self.value.as_deref().and_then(parse_weight)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCareLog {
    pub cat_id: String,
    pub log_type: LogType,
    pub timestamp: DateTime<Utc>,
    pub notes: String,
    pub value: Option<String>,
}

impl NewCareLog {
    pub fn into_log(self, id: String) -> CareLog {
        CareLog {
            id,
            cat_id: self.cat_id,
            log_type: self.log_type,
            timestamp: self.timestamp,
            notes: self.notes,
            value: self.value,
        }
    }
}

/// Serialize a point in time the way it is stored and exchanged:
/// RFC 3339, UTC, millisecond precision, `Z` suffix.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// Parse a weight reading. Only finite, non-negative numbers qualify.
pub fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w >= 0.0)
}
