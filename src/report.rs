//! # Pattern Report
//!
//! Runs a whole trip log through the bucketizers, accumulates trips and fish
//! per label for every condition dimension, and ranks each dimension. This is
//! the structure the statistics screens render from.

use crate::aggregate::{build_bucket_items, pick_best_bucket, BestBucket, BucketStats};
use crate::buckets::{
    coast_wind_label, duration_bucket, movement_label, season_from_date, temp_label,
    time_of_day_from_datetime, water_level_label, wind_dir_label_from_deg, wind_label,
    Season, TimeOfDay, WindDirection, UNKNOWN_LABEL,
};
use crate::config::AnalysisConfig;
use crate::spots::{build_spot_summary, Spot, SpotSummary};
use crate::trip::{
    TripRecord, AIR_TEMP_KEY, COAST_WIND_KEY, DISTANCE_KEY, DURATION_KEY, WATER_LEVEL_KEY,
    WIND_DIR_KEY, WIND_SPEED_KEY,
};
use crate::BucketItem;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Condition dimensions a trip is classified along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Season,
    TimeOfDay,
    WaterLevel,
    Temperature,
    WindSpeed,
    WindDirection,
    CoastWind,
    Duration,
    Movement,
}

impl Dimension {
    pub const ALL: [Dimension; 9] = [
        Dimension::Season,
        Dimension::TimeOfDay,
        Dimension::WaterLevel,
        Dimension::Temperature,
        Dimension::WindSpeed,
        Dimension::WindDirection,
        Dimension::CoastWind,
        Dimension::Duration,
        Dimension::Movement,
    ];

    /// Bucket label of `trip` along this dimension.
    pub fn classify(&self, trip: &TripRecord) -> String {
        match self {
            Dimension::Season => trip
                .started_at()
                .map_or(Season::Unknown, |ts| season_from_date(&ts))
                .to_string(),
            Dimension::TimeOfDay => trip
                .started_at()
                .map_or(TimeOfDay::Unknown, |ts| time_of_day_from_datetime(&ts))
                .to_string(),
            Dimension::WaterLevel => water_level_label(trip.number(WATER_LEVEL_KEY)).to_string(),
            Dimension::Temperature => temp_label(trip.number(AIR_TEMP_KEY)).to_string(),
            Dimension::WindSpeed => wind_label(trip.number(WIND_SPEED_KEY)).to_string(),
            Dimension::WindDirection => trip
                .number(WIND_DIR_KEY)
                .map_or(WindDirection::Unknown, wind_dir_label_from_deg)
                .to_string(),
            Dimension::CoastWind => or_unknown(coast_wind_label(trip.text(COAST_WIND_KEY))),
            Dimension::Duration => or_unknown(duration_bucket(trip.number(DURATION_KEY))),
            Dimension::Movement => or_unknown(movement_label(
                trip.number(DISTANCE_KEY),
                trip.number(DURATION_KEY),
            )),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Season => "season",
            Dimension::TimeOfDay => "time_of_day",
            Dimension::WaterLevel => "water_level",
            Dimension::Temperature => "temperature",
            Dimension::WindSpeed => "wind_speed",
            Dimension::WindDirection => "wind_direction",
            Dimension::CoastWind => "coast_wind",
            Dimension::Duration => "duration",
            Dimension::Movement => "movement",
        };
        f.write_str(name)
    }
}

fn or_unknown<L: fmt::Display>(label: Option<L>) -> String {
    label.map_or_else(|| UNKNOWN_LABEL.to_string(), |l| l.to_string())
}

/// Ranked view of one dimension.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DimensionReport {
    pub dimension: Dimension,
    pub best: Option<BestBucket>,
    pub items: Vec<BucketItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatternReport {
    pub total_trips: usize,
    pub total_fish: u64,
    pub dimensions: Vec<DimensionReport>,
    pub spots: Option<SpotSummary>,
}

/// Accumulate per-label counts for one dimension.
pub fn accumulate(trips: &[TripRecord], dimension: Dimension) -> BucketStats {
    let mut stats = BucketStats::new();
    for trip in trips {
        stats.record(&dimension.classify(trip), trip.fish_count());
    }
    stats
}

impl PatternReport {
    pub fn build(trips: &[TripRecord], spots: &[Spot], config: &AnalysisConfig) -> Self {
        let total_fish: u64 = trips.iter().map(TripRecord::fish_count).sum();

        let dimensions = Dimension::ALL
            .iter()
            .map(|&dimension| {
                let stats = accumulate(trips, dimension);
                let best = pick_best_bucket(&stats, config.min_trips);
                debug!(%dimension, buckets = stats.len(), best = ?best.as_ref().map(|b| &b.label), "ranked dimension");
                DimensionReport {
                    dimension,
                    best,
                    items: build_bucket_items(
                        &stats,
                        total_fish,
                        config.min_trips,
                        config.item_limit,
                    ),
                }
            })
            .collect();

        PatternReport {
            total_trips: trips.len(),
            total_fish,
            dimensions,
            spots: build_spot_summary(trips, spots),
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionReport> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }
}
