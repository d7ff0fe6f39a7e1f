use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Weather,
    TrainNumber,
    TrainRoute,
    Road,
    TripPlanning,
    PlaceInfo,
    BestTime,
    Unknown,
}

impl Intent {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "weather" => Self::Weather,
            "train_number" => Self::TrainNumber,
            "train_route" => Self::TrainRoute,
            "road" => Self::Road,
            "trip_planning" => Self::TripPlanning,
            "place_info" => Self::PlaceInfo,
            "best_time" => Self::BestTime,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::TrainNumber => "train_number",
            Self::TrainRoute => "train_route",
            Self::Road => "road",
            Self::TripPlanning => "trip_planning",
            Self::PlaceInfo => "place_info",
            Self::BestTime => "best_time",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
}

impl Classification {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            params: BTreeMap::new(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(Intent::Unknown)
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let intent = object
            .get("intent")
            .and_then(Value::as_str)
            .map(Intent::parse)
            .unwrap_or(Intent::Unknown);

        let params = object
            .iter()
            .filter(|(key, _)| key.as_str() != "intent")
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key.clone(), text.clone())),
                Value::Number(number) => Some((key.clone(), number.to_string())),
                _ => None,
            })
            .collect();

        Some(Self { intent, params })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Query {
    Weather { location: String },
    TrainNumber { train_number: String },
    TrainRoute { start: String, end: String },
    Road { start: String, end: String },
    TripPlanning { start: String, end: String },
    PlaceInfo { location: String },
    BestTime { location: String },
}

impl Query {
    pub fn intent(&self) -> Intent {
        match self {
            Self::Weather { .. } => Intent::Weather,
            Self::TrainNumber { .. } => Intent::TrainNumber,
            Self::TrainRoute { .. } => Intent::TrainRoute,
            Self::Road { .. } => Intent::Road,
            Self::TripPlanning { .. } => Intent::TripPlanning,
            Self::PlaceInfo { .. } => Intent::PlaceInfo,
            Self::BestTime { .. } => Intent::BestTime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReading {
    pub temperature: Option<Scalar>,
    pub weather_condition: Option<String>,
    pub humidity: Option<Scalar>,
    pub wind_speed: Option<Scalar>,
    pub wind_direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub location: String,
    #[serde(default)]
    pub real_time_weather: WeatherReading,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainStop {
    pub station_name: String,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub distance: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub train_number: String,
    #[serde(default)]
    pub train_name: String,
    #[serde(default)]
    pub schedule: Vec<TrainStop>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainLeg {
    #[serde(deserialize_with = "string_or_number")]
    pub train_number: String,
    #[serde(default)]
    pub train_name: String,
    #[serde(default, alias = "departure_time")]
    pub departure: Option<String>,
    #[serde(default, alias = "arrival_time")]
    pub arrival: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Eta {
    pub hours: Option<Scalar>,
    pub minutes: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub distance_km: Option<Scalar>,
    #[serde(default)]
    pub eta: Eta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismPlace {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub best_time: Option<String>,
    #[serde(default)]
    pub attractions: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Number(number) => Ok(number.to_string()),
        Scalar::Text(text) => Ok(text),
    }
}
