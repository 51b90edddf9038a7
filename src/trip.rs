//! # Trip Records
//!
//! Trip logs arrive from the app as loosely shaped JSON objects: fields may be
//! missing, `null`, numbers, or numbers written as strings, and the spot
//! reference has been stored under several key spellings over time.
//! [`TripRecord`] keeps the raw key-value object and exposes typed, forgiving
//! accessors so the bucketizers only ever see `Option`s.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Keys a spot reference may be stored under, tried in this order.
pub const SPOT_ID_KEYS: [&str; 3] = ["spot_id", "spotId", "spotID"];

pub const FISH_COUNT_KEY: &str = "fish_count";
pub const STARTED_AT_KEY: &str = "started_at";
pub const WATER_LEVEL_KEY: &str = "water_level_cm";
pub const AIR_TEMP_KEY: &str = "air_temp_c";
pub const WIND_SPEED_KEY: &str = "wind_speed_ms";
pub const WIND_DIR_KEY: &str = "wind_dir_deg";
pub const COAST_WIND_KEY: &str = "coast_wind";
pub const DURATION_KEY: &str = "duration_sec";
pub const DISTANCE_KEY: &str = "distance_m";

#[derive(Error, Debug)]
pub enum InputError {
    /// A trip entry was valid JSON but not an object
    #[error("trip record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// One recorded fishing trip as a generic key-value record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripRecord(Map<String, Value>);

impl TripRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field value; `null` is reported as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Numeric field, accepting JSON numbers and numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-empty text field.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str().filter(|s| !s.is_empty())
    }

    /// Spot reference under the first alias that holds a string or number.
    /// Numbers are rendered in decimal so `1`, `1.0` and `"1"` name the same spot.
    pub fn spot_id(&self) -> Option<String> {
        SPOT_ID_KEYS.iter().find_map(|key| match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(number_id(n)),
            _ => None,
        })
    }

    /// Fish landed on this trip. Missing or unusable counts are 0.
    pub fn fish_count(&self) -> u64 {
        match self.number(FISH_COUNT_KEY) {
            Some(n) if n.is_finite() && n > 0.0 => n as u64,
            _ => 0,
        }
    }

    /// Wall-clock start of the trip at the place it was fished.
    ///
    /// RFC 3339 timestamps keep their own offset's local time; naive
    /// timestamps (`T` or space separated) are taken as-is.
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        let raw = self.text(STARTED_AT_KEY)?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.naive_local());
        }
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }
}

/// Whole-valued floats render like integers.
pub(crate) fn number_id(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

impl From<Map<String, Value>> for TripRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for TripRecord {
    type Error = InputError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Err(InputError::NotAnObject("null")),
            Value::Bool(_) => Err(InputError::NotAnObject("a boolean")),
            Value::Number(_) => Err(InputError::NotAnObject("a number")),
            Value::String(_) => Err(InputError::NotAnObject("a string")),
            Value::Array(_) => Err(InputError::NotAnObject("an array")),
        }
    }
}
