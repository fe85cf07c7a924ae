use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Breed stored when the profile form leaves it blank
pub const DEFAULT_BREED: &str = "Misto";

/// Placeholder picture used when no image was uploaded
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/200";

/// A tracked cat profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    /// Cat ID in format: "cat-<uuid>"
    pub id: String,
    pub name: String,
    pub breed: String,
    /// Age in years, fractional values allowed
    pub age: f64,
    /// Current weight in kilograms
    pub weight: f64,
    pub image_url: String,
    pub gender: Gender,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Gender of a cat.
///
/// The canonical values are the Italian labels used by the profile form; any
/// other stored string is preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Maschio",
            Gender::Female => "Femmina",
            Gender::Other(value) => value,
        }
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed == "Maschio" {
            Gender::Male
        } else if trimmed == "Femmina" {
            Gender::Female
        } else {
            Gender::Other(value)
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        Gender::from(value.to_string())
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a care event.
///
/// Serialized with the literal labels stored by the care log store. The
/// symbolic names (`FEEDING`, `WEIGHT`, ...) are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogType {
    #[serde(rename = "Alimentazione", alias = "FEEDING")]
    Feeding,
    #[serde(rename = "Lettiera", alias = "LITTER")]
    Litter,
    #[serde(rename = "Peso", alias = "WEIGHT")]
    Weight,
    #[serde(rename = "Medico", alias = "MEDICAL")]
    Medical,
    #[serde(rename = "Toelettatura", alias = "GROOMING")]
    Grooming,
    #[serde(rename = "Altro", alias = "OTHER")]
    Other,
}

impl LogType {
    pub const ALL: [LogType; 6] = [
        LogType::Feeding,
        LogType::Litter,
        LogType::Weight,
        LogType::Medical,
        LogType::Grooming,
        LogType::Other,
    ];

    /// The literal value persisted in the `type` column
    pub fn literal(&self) -> &'static str {
        match self {
            LogType::Feeding => "Alimentazione",
            LogType::Litter => "Lettiera",
            LogType::Weight => "Peso",
            LogType::Medical => "Medico",
            LogType::Grooming => "Toelettatura",
            LogType::Other => "Altro",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LogType::Feeding => "FEEDING",
            LogType::Litter => "LITTER",
            LogType::Weight => "WEIGHT",
            LogType::Medical => "MEDICAL",
            LogType::Grooming => "GROOMING",
            LogType::Other => "OTHER",
        }
    }
}

impl FromStr for LogType {
    type Err = LogTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LogType::ALL
            .iter()
            .copied()
            .find(|t| t.literal() == trimmed || t.symbol().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LogTypeError(trimmed.to_string()))
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTypeError(pub String);

impl fmt::Display for LogTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown log type: '{}'", self.0)
    }
}

impl std::error::Error for LogTypeError {}

/// An immutable, timestamped care event tied to one cat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareLog {
    /// Log ID in format: "log-<uuid>"
    pub id: String,
    pub cat_id: String,
    #[serde(rename = "type")]
    pub log_type: LogType,
    /// RFC 3339 UTC timestamp with millisecond precision
    pub timestamp: String,
    pub notes: String,
    /// Numeric string for weight logs, free-form otherwise
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCatRequest {
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub weight: Option<f64>,
    pub image_url: Option<String>,
    pub gender: Option<String>,
}

/// Profile edit. Weight is intentionally absent: it only changes through
/// weight observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCatRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub image_url: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatResponse {
    pub cat: Cat,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatListResponse {
    pub cats: Vec<Cat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddCareLogRequest {
    /// Either the stored literal ("Peso") or the symbolic name ("WEIGHT")
    #[serde(rename = "type")]
    pub log_type: String,
    pub value: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareLogListResponse {
    pub logs: Vec<CareLog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordWeightRequest {
    pub weight: f64,
    pub notes: Option<String>,
}

/// Result of a weight observation: the new log and the synchronized profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightObservationResponse {
    pub log: CareLog,
    pub cat: Cat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileWeightResponse {
    pub cat: Cat,
    /// True when the stored weight had drifted and was corrected
    pub corrected: bool,
}

/// One point of the weight chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    /// Short display label, e.g. "Mar 4"
    pub date: String,
    /// RFC 3339 timestamp of the originating log
    pub timestamp: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTrend {
    Increasing,
    Stable,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightHistoryResponse {
    pub series: Vec<WeightPoint>,
    pub trend: WeightTrend,
}

/// Everything the cat detail page shows at once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatDashboardResponse {
    pub cat: Cat,
    pub recent_logs: Vec<CareLog>,
    pub weight_series: Vec<WeightPoint>,
    pub trend: WeightTrend,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAdvice {
    pub text: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentifyImageRequest {
    /// Base64 payload without the `data:` prefix
    pub image_base64: String,
    /// Defaults to image/jpeg
    pub mime_type: Option<String>,
    pub prompt: String,
}
