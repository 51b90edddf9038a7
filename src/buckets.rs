//! # Scalar Bucketizers
//!
//! Maps single raw trip readings (water level, month, hour, temperature, wind,
//! trip duration, distance travelled) onto a small fixed vocabulary of labels
//! that statistics are grouped by.
//!
//! ## Totality
//!
//! Every function here accepts whatever the trip log happens to contain and
//! always returns a label. Missing readings (`None`), NaN and out-of-range
//! integers classify as the `Unknown` variant of the returned enum, which
//! renders as [`UNKNOWN_LABEL`]. Bucketizers whose label is naturally optional
//! (coastal wind, duration, movement) return `Option` instead.
//!
//! ## Bin Boundaries
//!
//! All numeric bins are lower-inclusive: a temperature of exactly 4 °C lands
//! in `4–8°C`, a trip of exactly 7200 s lands in `2-4 timer`.

use chrono::{Datelike, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Label used for any reading that could not be classified.
pub const UNKNOWN_LABEL: &str = "ukendt";

/// Generates `label()`, `Display` and label-string `Serialize` for a bucket enum.
macro_rules! bucket_labels {
    ($name:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl $name {
            /// Display label for this bucket.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

/// Reads a numeric input, treating `None` and NaN alike.
fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

// -- Water level --

/// Water level relative to the local mean, in centimetres.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaterLevel {
    Low,
    Mid,
    High,
    Unknown,
}

bucket_labels!(WaterLevel {
    Low => "Lavvande",
    Mid => "Middel vandstand",
    High => "Højvande",
    Unknown => UNKNOWN_LABEL,
});

/// Classify a water level reading: below -20 cm is low water, above +20 cm
/// is high water, anything in between (inclusive) is the middle band.
pub fn water_level_label(level_cm: Option<f64>) -> WaterLevel {
    match known(level_cm) {
        None => WaterLevel::Unknown,
        Some(v) if v < -20.0 => WaterLevel::Low,
        Some(v) if v > 20.0 => WaterLevel::High,
        Some(_) => WaterLevel::Mid,
    }
}

// -- Season --

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
    Unknown,
}

bucket_labels!(Season {
    Winter => "Vinteren",
    Spring => "Foråret",
    Summer => "Sommeren",
    Autumn => "Efteråret",
    Unknown => UNKNOWN_LABEL,
});

/// Season for a zero-based month (0 = January, 11 = December).
///
/// December, January and February are winter; the meteorological seasons
/// follow in three-month steps.
pub fn season_from_month(month0: u32) -> Season {
    match month0 {
        11 | 0 | 1 => Season::Winter,
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        8..=10 => Season::Autumn,
        _ => Season::Unknown,
    }
}

/// Season of a calendar date or timestamp.
pub fn season_from_date<D: Datelike>(date: &D) -> Season {
    season_from_month(date.month0())
}

// -- Time of day --

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Night,
    Morning,
    Forenoon,
    Afternoon,
    Evening,
    Unknown,
}

bucket_labels!(TimeOfDay {
    Night => "Natten",
    Morning => "Morgenen",
    Forenoon => "Formiddagen",
    Afternoon => "Eftermiddagen",
    Evening => "Aftenen",
    Unknown => UNKNOWN_LABEL,
});

/// Part of the day for an hour in `0..=23`. Night wraps around midnight.
pub fn time_of_day_label(hour: u32) -> TimeOfDay {
    match hour {
        0..=4 | 22..=23 => TimeOfDay::Night,
        5..=8 => TimeOfDay::Morning,
        9..=11 => TimeOfDay::Forenoon,
        12..=16 => TimeOfDay::Afternoon,
        17..=21 => TimeOfDay::Evening,
        _ => TimeOfDay::Unknown,
    }
}

/// Part of the day of a timestamp, using its own (local) hour.
pub fn time_of_day_from_datetime<T: Timelike>(time: &T) -> TimeOfDay {
    time_of_day_label(time.hour())
}

// -- Temperature --

/// Air temperature in 4 °C wide bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    ZeroToFour,
    FourToEight,
    EightToTwelve,
    TwelveToSixteen,
    SixteenPlus,
    Unknown,
}

bucket_labels!(TemperatureBand {
    ZeroToFour => "0–4°C",
    FourToEight => "4–8°C",
    EightToTwelve => "8–12°C",
    TwelveToSixteen => "12–16°C",
    SixteenPlus => "16°C+",
    Unknown => UNKNOWN_LABEL,
});

/// Classify an air temperature in °C. Sub-zero readings share the lowest band.
pub fn temp_label(celsius: Option<f64>) -> TemperatureBand {
    match known(celsius) {
        None => TemperatureBand::Unknown,
        Some(t) if t < 4.0 => TemperatureBand::ZeroToFour,
        Some(t) if t < 8.0 => TemperatureBand::FourToEight,
        Some(t) if t < 12.0 => TemperatureBand::EightToTwelve,
        Some(t) if t < 16.0 => TemperatureBand::TwelveToSixteen,
        Some(_) => TemperatureBand::SixteenPlus,
    }
}

// -- Wind speed --

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindStrength {
    Light,
    Mild,
    Fresh,
    Strong,
    Unknown,
}

bucket_labels!(WindStrength {
    Light => "svag vind",
    Mild => "mild vind",
    Fresh => "frisk vind",
    Strong => "hård vind",
    Unknown => UNKNOWN_LABEL,
});

/// Classify a mean wind speed in m/s.
pub fn wind_label(speed_ms: Option<f64>) -> WindStrength {
    match known(speed_ms) {
        None => WindStrength::Unknown,
        Some(s) if s < 4.0 => WindStrength::Light,
        Some(s) if s < 8.0 => WindStrength::Mild,
        Some(s) if s < 12.0 => WindStrength::Fresh,
        Some(_) => WindStrength::Strong,
    }
}

// -- Coastal wind orientation --

/// Wind direction relative to the coastline the trip was fished from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CoastWind {
    Offshore,
    Onshore,
    Cross,
    /// Free text that matched none of the known phrasings, kept verbatim.
    Other(String),
}

impl CoastWind {
    pub fn label(&self) -> &str {
        match self {
            CoastWind::Offshore => "fralandsvind",
            CoastWind::Onshore => "pålandsvind",
            CoastWind::Cross => "sidevind",
            CoastWind::Other(text) => text,
        }
    }
}

impl fmt::Display for CoastWind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CoastWind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

const OFFSHORE_MARKERS: &[&str] = &["fraland", "offshore"];
const ONSHORE_MARKERS: &[&str] = &["påland", "på-land", "onshore"];
const CROSS_MARKERS: &[&str] = &["sidevind", "langs kysten", "tvaers"];

/// Normalize a free-text coastal wind description.
///
/// Matching is a case-insensitive substring search, checked offshore first,
/// then onshore, then cross-shore. The literal `"ukendt"` and empty input
/// yield `None`; unrecognised text is passed through unchanged.
pub fn coast_wind_label(raw: Option<&str>) -> Option<CoastWind> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let lower = raw.to_lowercase();
    let contains_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if contains_any(OFFSHORE_MARKERS) {
        Some(CoastWind::Offshore)
    } else if contains_any(ONSHORE_MARKERS) {
        Some(CoastWind::Onshore)
    } else if contains_any(CROSS_MARKERS) {
        Some(CoastWind::Cross)
    } else if raw == UNKNOWN_LABEL {
        None
    } else {
        Some(CoastWind::Other(raw.to_string()))
    }
}

// -- Wind direction --

/// Eight-point compass direction the wind blows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    Unknown,
}

bucket_labels!(WindDirection {
    North => "North",
    Northeast => "Northeast",
    East => "East",
    Southeast => "Southeast",
    South => "South",
    Southwest => "Southwest",
    West => "West",
    Northwest => "Northwest",
    Unknown => UNKNOWN_LABEL,
});

const COMPASS: [WindDirection; 8] = [
    WindDirection::North,
    WindDirection::Northeast,
    WindDirection::East,
    WindDirection::Southeast,
    WindDirection::South,
    WindDirection::Southwest,
    WindDirection::West,
    WindDirection::Northwest,
];

impl WindDirection {
    /// Abbreviated compass point for chart axes (`"N"`, `"NE"`, ...).
    pub fn compass_label_short(&self) -> &'static str {
        match self {
            WindDirection::North => "N",
            WindDirection::Northeast => "NE",
            WindDirection::East => "E",
            WindDirection::Southeast => "SE",
            WindDirection::South => "S",
            WindDirection::Southwest => "SW",
            WindDirection::West => "W",
            WindDirection::Northwest => "NW",
            WindDirection::Unknown => "?",
        }
    }
}

/// Compass direction for a bearing in degrees.
///
/// The bearing is first normalized into `[0, 360)`, so any whole number of
/// turns in either direction maps to the same label. Each direction owns the
/// 45° sector centred on it (North covers `[337.5, 22.5)`).
pub fn wind_dir_label_from_deg(degrees: f64) -> WindDirection {
    if !degrees.is_finite() {
        return WindDirection::Unknown;
    }
    let normalized = degrees.rem_euclid(360.0);
    let sector = (normalized / 45.0).round() as usize % COMPASS.len();
    COMPASS[sector]
}

// -- Trip duration --

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    UnderTwoHours,
    TwoToFourHours,
    FourToSixHours,
    SixHoursPlus,
}

impl DurationBucket {
    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::UnderTwoHours => "<2 timer",
            DurationBucket::TwoToFourHours => "2-4 timer",
            DurationBucket::FourToSixHours => "4-6 timer",
            DurationBucket::SixHoursPlus => "6+ timer",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DurationBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

const TWO_HOURS: f64 = 7_200.0;
const FOUR_HOURS: f64 = 14_400.0;
const SIX_HOURS: f64 = 21_600.0;

/// Bucket a trip length given in seconds.
pub fn duration_bucket(seconds: Option<f64>) -> Option<DurationBucket> {
    let secs = known(seconds)?;
    Some(if secs < TWO_HOURS {
        DurationBucket::UnderTwoHours
    } else if secs < FOUR_HOURS {
        DurationBucket::TwoToFourHours
    } else if secs < SIX_HOURS {
        DurationBucket::FourToSixHours
    } else {
        DurationBucket::SixHoursPlus
    })
}

// -- Movement style --

/// How much ground the angler covered during the trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementStyle {
    Stationary,
    Steady,
    Covering,
}

impl MovementStyle {
    pub fn label(&self) -> &'static str {
        match self {
            MovementStyle::Stationary => "Stillestående/let bevægelse",
            MovementStyle::Steady => "Roligt tempo",
            MovementStyle::Covering => "Affiskning af vand",
        }
    }
}

impl fmt::Display for MovementStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MovementStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// At or below this many metres per hour the angler is effectively standing still.
const STATIONARY_MAX_M_PER_H: f64 = 300.0;
/// At or above this many metres per hour the angler is working along the water.
const COVERING_MIN_M_PER_H: f64 = 1_500.0;

/// Classify movement from distance walked (m) and trip length (s).
///
/// Speed is normalized to metres per hour. A zero duration cannot be
/// normalized and yields `None`, as does any missing input.
pub fn movement_label(
    distance_m: Option<f64>,
    duration_sec: Option<f64>,
) -> Option<MovementStyle> {
    let distance = known(distance_m)?;
    let duration = known(duration_sec).filter(|d| *d != 0.0)?;

    let speed = distance / duration * 3600.0;
    Some(if speed <= STATIONARY_MAX_M_PER_H {
        MovementStyle::Stationary
    } else if speed >= COVERING_MIN_M_PER_H {
        MovementStyle::Covering
    } else {
        MovementStyle::Steady
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    #[test]
    fn test_water_level_bands() {
        assert_eq!(water_level_label(Some(-21.0)).label(), "Lavvande");
        assert_eq!(water_level_label(Some(-20.0)).label(), "Middel vandstand");
        assert_eq!(water_level_label(Some(0.0)).label(), "Middel vandstand");
        assert_eq!(water_level_label(Some(20.0)).label(), "Middel vandstand");
        assert_eq!(water_level_label(Some(20.5)).label(), "Højvande");
        assert_eq!(water_level_label(None).label(), "ukendt");
        assert_eq!(water_level_label(Some(f64::NAN)), WaterLevel::Unknown);
    }

    #[test]
    fn test_season_from_month() {
        let labels: Vec<&str> = (0..12).map(|m| season_from_month(m).label()).collect();
        assert_eq!(
            labels,
            vec![
                "Vinteren", "Vinteren", "Foråret", "Foråret", "Foråret", "Sommeren", "Sommeren",
                "Sommeren", "Efteråret", "Efteråret", "Efteråret", "Vinteren",
            ]
        );
        assert_eq!(season_from_month(12), Season::Unknown);

        let date = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        assert_eq!(season_from_date(&date), Season::Winter);
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(time_of_day_label(0), TimeOfDay::Night);
        assert_eq!(time_of_day_label(4), TimeOfDay::Night);
        assert_eq!(time_of_day_label(5), TimeOfDay::Morning);
        assert_eq!(time_of_day_label(8), TimeOfDay::Morning);
        assert_eq!(time_of_day_label(9), TimeOfDay::Forenoon);
        assert_eq!(time_of_day_label(11), TimeOfDay::Forenoon);
        assert_eq!(time_of_day_label(12), TimeOfDay::Afternoon);
        assert_eq!(time_of_day_label(16), TimeOfDay::Afternoon);
        assert_eq!(time_of_day_label(17), TimeOfDay::Evening);
        assert_eq!(time_of_day_label(21), TimeOfDay::Evening);
        assert_eq!(time_of_day_label(22), TimeOfDay::Night);
        assert_eq!(time_of_day_label(23), TimeOfDay::Night);
        assert_eq!(time_of_day_label(24).label(), "ukendt");

        let ts = NaiveDateTime::parse_from_str("2024-06-01 06:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(time_of_day_from_datetime(&ts).label(), "Morgenen");
    }

    #[test]
    fn test_temperature_lower_inclusive() {
        assert_eq!(temp_label(Some(0.0)).label(), "0–4°C");
        assert_eq!(temp_label(Some(3.99)).label(), "0–4°C");
        assert_eq!(temp_label(Some(4.0)).label(), "4–8°C");
        assert_eq!(temp_label(Some(8.0)).label(), "8–12°C");
        assert_eq!(temp_label(Some(12.0)).label(), "12–16°C");
        assert_eq!(temp_label(Some(16.0)).label(), "16°C+");
        assert_eq!(temp_label(Some(31.5)).label(), "16°C+");
        assert_eq!(temp_label(None).label(), "ukendt");
        assert_eq!(temp_label(Some(f64::NAN)).label(), "ukendt");
    }

    #[test]
    fn test_wind_speed_bands() {
        assert_eq!(wind_label(Some(0.0)).label(), "svag vind");
        assert_eq!(wind_label(Some(4.0)).label(), "mild vind");
        assert_eq!(wind_label(Some(11.9)).label(), "frisk vind");
        assert_eq!(wind_label(Some(12.0)).label(), "hård vind");
        assert_eq!(wind_label(None), WindStrength::Unknown);
        assert_eq!(wind_label(Some(f64::NAN)), WindStrength::Unknown);
    }

    #[test]
    fn test_coast_wind_matching() {
        assert_eq!(coast_wind_label(Some("Fralandsvind")), Some(CoastWind::Offshore));
        assert_eq!(coast_wind_label(Some("light OFFSHORE")), Some(CoastWind::Offshore));
        assert_eq!(coast_wind_label(Some("PÅLANDSVIND")), Some(CoastWind::Onshore));
        assert_eq!(coast_wind_label(Some("på-land")), Some(CoastWind::Onshore));
        assert_eq!(coast_wind_label(Some("onshore breeze")), Some(CoastWind::Onshore));
        assert_eq!(coast_wind_label(Some("Sidevind")), Some(CoastWind::Cross));
        assert_eq!(coast_wind_label(Some("vind langs kysten")), Some(CoastWind::Cross));
        assert_eq!(coast_wind_label(Some("tvaers")), Some(CoastWind::Cross));
        assert_eq!(coast_wind_label(Some("ukendt")), None);
        assert_eq!(coast_wind_label(Some("")), None);
        assert_eq!(coast_wind_label(None), None);

        let other = coast_wind_label(Some("Stille")).unwrap();
        assert_eq!(other, CoastWind::Other("Stille".to_string()));
        assert_eq!(other.label(), "Stille");
    }

    #[test]
    fn test_wind_direction_sectors() {
        assert_eq!(wind_dir_label_from_deg(0.0), WindDirection::North);
        assert_eq!(wind_dir_label_from_deg(45.0), WindDirection::Northeast);
        assert_eq!(wind_dir_label_from_deg(90.0), WindDirection::East);
        assert_eq!(wind_dir_label_from_deg(135.0), WindDirection::Southeast);
        assert_eq!(wind_dir_label_from_deg(180.0), WindDirection::South);
        assert_eq!(wind_dir_label_from_deg(225.0), WindDirection::Southwest);
        assert_eq!(wind_dir_label_from_deg(270.0), WindDirection::West);
        assert_eq!(wind_dir_label_from_deg(315.0), WindDirection::Northwest);
        assert_eq!(wind_dir_label_from_deg(350.0), WindDirection::North);
        assert_eq!(wind_dir_label_from_deg(-90.0), WindDirection::West);
        assert_eq!(wind_dir_label_from_deg(f64::NAN), WindDirection::Unknown);
        assert_eq!(WindDirection::Southwest.compass_label_short(), "SW");
    }

    #[test]
    fn test_wind_direction_is_periodic() {
        for deg in [-725.0, -45.0, -1.0, 0.0, 10.0, 100.0, 200.0, 359.0] {
            let base = wind_dir_label_from_deg(deg);
            for k in -3..=3 {
                assert_eq!(
                    wind_dir_label_from_deg(deg + 360.0 * k as f64),
                    base,
                    "deg {deg} shifted by {k} turns"
                );
            }
        }
    }

    #[test]
    fn test_duration_buckets() {
        assert_eq!(duration_bucket(Some(0.0)).map(|b| b.label()), Some("<2 timer"));
        assert_eq!(duration_bucket(Some(7199.0)).map(|b| b.label()), Some("<2 timer"));
        assert_eq!(duration_bucket(Some(7200.0)).map(|b| b.label()), Some("2-4 timer"));
        assert_eq!(duration_bucket(Some(14400.0)).map(|b| b.label()), Some("4-6 timer"));
        assert_eq!(duration_bucket(Some(21599.0)).map(|b| b.label()), Some("4-6 timer"));
        assert_eq!(duration_bucket(Some(21600.0)).map(|b| b.label()), Some("6+ timer"));
        assert_eq!(duration_bucket(None), None);
        assert_eq!(duration_bucket(Some(f64::NAN)), None);
    }

    #[test]
    fn test_movement_style() {
        // 300 m over an hour sits exactly on the stationary limit
        assert_eq!(
            movement_label(Some(300.0), Some(3600.0)),
            Some(MovementStyle::Stationary)
        );
        assert_eq!(
            movement_label(Some(1000.0), Some(3600.0)),
            Some(MovementStyle::Steady)
        );
        // 750 m in 30 minutes is 1500 m/h
        assert_eq!(
            movement_label(Some(750.0), Some(1800.0)),
            Some(MovementStyle::Covering)
        );
        assert_eq!(
            movement_label(Some(5000.0), Some(3600.0)).map(|m| m.label()),
            Some("Affiskning af vand")
        );
        assert_eq!(movement_label(Some(100.0), Some(0.0)), None);
        assert_eq!(movement_label(None, Some(3600.0)), None);
        assert_eq!(movement_label(Some(100.0), None), None);
        assert_eq!(movement_label(Some(f64::NAN), Some(3600.0)), None);
    }

    #[test]
    fn test_labels_serialize_as_text() {
        let json = serde_json::to_string(&vec![Season::Summer, Season::Unknown]).unwrap();
        assert_eq!(json, r#"["Sommeren","ukendt"]"#);
        assert_eq!(format!("{}", WaterLevel::High), "Højvande");
    }
}
