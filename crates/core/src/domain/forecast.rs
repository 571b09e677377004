use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
pub const VARIETIES: [&str; 4] = ["BG-352", "BG-300", "AT-362", "LD-365"];

// Index used for any region/variety outside the fixed lists.
const FALLBACK_FACTOR: usize = 1;

pub const DEFAULT_REGION: &str = "Central";
pub const DEFAULT_VARIETY: &str = "BG-352";
pub const DEFAULT_HORIZON_DAYS: i64 = 30;
/// Longest horizon the API and CLI accept.
pub const MAX_HORIZON_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_variety")]
    pub variety: String,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub nitrogen_n: Option<f64>,
    #[serde(default)]
    pub phosphorus_p: Option<f64>,
    #[serde(default)]
    pub potassium_k: Option<f64>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_variety() -> String {
    DEFAULT_VARIETY.to_string()
}

fn default_horizon_days() -> i64 {
    DEFAULT_HORIZON_DAYS
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            region: default_region(),
            variety: default_variety(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            start_date: None,
            nitrogen_n: None,
            phosphorus_p: None,
            potassium_k: None,
        }
    }
}

impl ForecastRequest {
    pub fn has_npk(&self) -> bool {
        self.nitrogen_n.is_some() && self.phosphorus_p.is_some() && self.potassium_k.is_some()
    }

    /// Drops NPK readings that are not finite non-negative numbers and blanks an empty start date.
    pub fn coerced(&self) -> ForecastFilters {
        ForecastFilters {
            region: self.region.trim().to_string(),
            variety: self.variety.trim().to_string(),
            horizon_days: self.horizon_days,
            start_date: self
                .start_date
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            nitrogen_n: coerce_reading(self.nitrogen_n),
            phosphorus_p: coerce_reading(self.phosphorus_p),
            potassium_k: coerce_reading(self.potassium_k),
        }
    }
}

fn coerce_reading(v: Option<f64>) -> Option<f64> {
    v.filter(|n| n.is_finite() && *n >= 0.0)
}

/// Request echo carried in every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastFilters {
    pub region: String,
    #[serde(default)]
    pub variety: String,
    pub horizon_days: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub nitrogen_n: Option<f64>,
    #[serde(default)]
    pub phosphorus_p: Option<f64>,
    #[serde(default)]
    pub potassium_k: Option<f64>,
}

impl ForecastFilters {
    pub fn npk_values(&self) -> impl Iterator<Item = f64> + '_ {
        [self.nitrogen_n, self.phosphorus_p, self.potassium_k]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKey {
    Price,
    Demand,
}

impl SeriesKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SeriesKey::Price => "price",
            SeriesKey::Demand => "demand",
        }
    }
}

/// One generated day. Serializes as `{"t": "D1", "date": "2026-01-01", "<key>": 88.4}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub t: String,
    pub date: NaiveDate,
    pub key: SeriesKey,
    pub value: f64,
}

impl Serialize for ForecastPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("t", &self.t)?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry(self.key.as_str(), &self.value)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub filters: ForecastFilters,
    pub price_forecast: Vec<ForecastPoint>,
    pub demand_forecast: Vec<ForecastPoint>,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: i32,
    pub drivers: Vec<String>,
    pub notes: Vec<SentimentNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentNote {
    pub id: String,
    pub date: String,
    pub text: String,
}

/// Maps free-form region input onto one of [`REGIONS`]. Factor lookups themselves are exact, so
/// callers that accept user-typed regions normalize first.
pub fn normalize_region(raw: &str) -> Option<&'static str> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(region) = REGIONS.iter().find(|r| r.eq_ignore_ascii_case(s)) {
        return Some(*region);
    }

    // Compound directions fold into the five trained buckets.
    let key = s.to_ascii_lowercase().replace(|c: char| c == '-' || c == '_', " ");
    let key = key.split_whitespace().collect::<Vec<_>>().join(" ");
    match key.as_str() {
        "north east" | "northeast" | "south east" | "southeast" => Some("East"),
        "north west" | "northwest" | "south west" | "southwest" => Some("West"),
        _ => None,
    }
}

pub fn region_factor(region: &str) -> usize {
    list_factor(&REGIONS, region)
}

pub fn variety_factor(variety: &str) -> usize {
    list_factor(&VARIETIES, variety)
}

fn list_factor(list: &[&str], value: &str) -> usize {
    list.iter().position(|x| *x == value).unwrap_or(FALLBACK_FACTOR)
}
