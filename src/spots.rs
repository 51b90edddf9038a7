//! # Spot Aggregation
//!
//! Groups trips by the spot they were fished at and summarizes visits and
//! catch per spot, highlighting the most visited spot and the spot with the
//! best average catch per trip.

use crate::trip::{number_id, TripRecord};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// A named fishing location from the user's spot directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Accepts ids stored either as JSON strings or numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => number_id(&n),
    })
}

/// Visit and catch totals for one spot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpotStat {
    pub id: String,
    pub trips: u64,
    pub fish: u64,
    /// Average fish per trip
    pub avg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MostVisited {
    pub id: String,
    pub name: String,
    pub trips: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BestCatch {
    pub id: String,
    pub name: String,
    pub avg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotSummary {
    pub total_spots: usize,
    pub most_visited: MostVisited,
    pub best_catch: BestCatch,
}

/// Per-spot totals in the order each spot first appears in `trips`.
///
/// Trips without a spot reference under any of the known aliases are skipped.
pub fn spot_stats(trips: &[TripRecord]) -> Vec<SpotStat> {
    let mut stats: Vec<SpotStat> = Vec::new();
    let mut skipped = 0usize;

    for trip in trips {
        let Some(id) = trip.spot_id() else {
            skipped += 1;
            continue;
        };
        let fish = trip.fish_count();
        match stats.iter_mut().find(|s| s.id == id) {
            Some(stat) => {
                stat.trips += 1;
                stat.fish += fish;
            }
            None => stats.push(SpotStat {
                id,
                trips: 1,
                fish,
                avg: 0.0,
            }),
        }
    }
    for stat in &mut stats {
        stat.avg = stat.fish as f64 / stat.trips as f64;
    }

    debug!(spots = stats.len(), skipped, "grouped trips by spot");
    stats
}

/// Display name for a spot id, synthesized when the directory lacks it.
pub fn spot_name(id: &str, spots: &[Spot]) -> String {
    spots
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| format!("Spot #{id}"))
}

/// Summarize trips per spot. Returns `None` when no trip references a spot.
///
/// Ties for most visited and best average both go to the spot seen first.
pub fn build_spot_summary(trips: &[TripRecord], spots: &[Spot]) -> Option<SpotSummary> {
    let stats = spot_stats(trips);
    let first = stats.first()?;

    let mut most_visited = first;
    let mut best_catch = first;
    for stat in &stats[1..] {
        if stat.trips > most_visited.trips {
            most_visited = stat;
        }
        if stat.avg > best_catch.avg {
            best_catch = stat;
        }
    }

    Some(SpotSummary {
        total_spots: stats.len(),
        most_visited: MostVisited {
            id: most_visited.id.clone(),
            name: spot_name(&most_visited.id, spots),
            trips: most_visited.trips,
        },
        best_catch: BestCatch {
            id: best_catch.id.clone(),
            name: spot_name(&best_catch.id, spots),
            avg: best_catch.avg,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn trips(values: Vec<Value>) -> Vec<TripRecord> {
        values
            .into_iter()
            .map(|v| TripRecord::try_from(v).unwrap())
            .collect()
    }

    fn directory() -> Vec<Spot> {
        vec![
            Spot { id: "1".into(), name: "Spot One".into() },
            Spot { id: "2".into(), name: "Spot Two".into() },
        ]
    }

    #[test]
    fn test_empty_and_unreferenced_trips() {
        assert_eq!(build_spot_summary(&[], &[]), None);
        let unreferenced = trips(vec![json!({"fish_count": 3}), json!({"spot": "1"})]);
        assert_eq!(build_spot_summary(&unreferenced, &[]), None);
    }

    #[test]
    fn test_summary_example() {
        let trips = trips(vec![
            json!({"spot_id": "1", "fish_count": 5}),
            json!({"spot_id": "1", "fish_count": 3}),
            json!({"spot_id": "2", "fish_count": 10}),
        ]);
        let summary = build_spot_summary(&trips, &directory()).unwrap();

        assert_eq!(summary.total_spots, 2);
        assert_eq!(summary.most_visited.name, "Spot One");
        assert_eq!(summary.most_visited.trips, 2);
        assert_eq!(summary.best_catch.name, "Spot Two");
        assert_eq!(summary.best_catch.avg, 10.0);
    }

    #[test]
    fn test_aliases_missing_counts_and_unknown_names() {
        let trips = trips(vec![
            json!({"spotId": "9"}),
            json!({"spotID": "9", "fish_count": 4}),
            json!({"fish_count": 100}),
            json!({"spot_id": 2, "fish_count": 1}),
        ]);
        let stats = spot_stats(&trips);
        assert_eq!(
            stats,
            vec![
                SpotStat { id: "9".into(), trips: 2, fish: 4, avg: 2.0 },
                SpotStat { id: "2".into(), trips: 1, fish: 1, avg: 1.0 },
            ]
        );

        let summary = build_spot_summary(&trips, &directory()).unwrap();
        assert_eq!(summary.most_visited.name, "Spot #9");
        assert_eq!(summary.best_catch.id, "9");
        assert_eq!(summary.best_catch.avg, 2.0);
    }

    #[test]
    fn test_ties_go_to_first_seen() {
        let trips = trips(vec![
            json!({"spot_id": "2", "fish_count": 2}),
            json!({"spot_id": "1", "fish_count": 2}),
        ]);
        let summary = build_spot_summary(&trips, &directory()).unwrap();
        assert_eq!(summary.most_visited.id, "2");
        assert_eq!(summary.best_catch.id, "2");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let trips = trips(vec![json!({"spot_id": "1", "fish_count": 1})]);
        let value = serde_json::to_value(build_spot_summary(&trips, &directory())).unwrap();
        assert_eq!(value["totalSpots"], 1);
        assert_eq!(value["mostVisited"]["name"], "Spot One");
        assert_eq!(value["bestCatch"]["avg"], 1.0);
    }

    #[test]
    fn test_spot_stats_serialize_average() {
        let trips = trips(vec![
            json!({"spot_id": "1", "fish_count": 3}),
            json!({"spot_id": "1", "fish_count": 0}),
        ]);
        let value = serde_json::to_value(spot_stats(&trips)).unwrap();
        assert_eq!(value[0]["trips"], 2);
        assert_eq!(value[0]["avg"], 1.5);
    }

    #[test]
    fn test_float_ids_match_directory() {
        let spots: Vec<Spot> = serde_json::from_value(json!([{"id": 5.0, "name": "Havnen"}])).unwrap();
        assert_eq!(spots[0].id, "5");

        let trips = trips(vec![json!({"spot_id": 5.0, "fish_count": 1}), json!({"spotId": "5"})]);
        let summary = build_spot_summary(&trips, &spots).unwrap();
        assert_eq!(summary.total_spots, 1);
        assert_eq!(summary.most_visited.name, "Havnen");
        assert_eq!(summary.most_visited.trips, 2);
    }

    #[test]
    fn test_spot_ids_deserialize_from_numbers() {
        let spots: Vec<Spot> =
            serde_json::from_value(json!([{"id": 3, "name": "Molen"}, {"id": "x", "name": "Rev"}]))
                .unwrap();
        assert_eq!(spots[0].id, "3");
        assert_eq!(spot_name("3", &spots), "Molen");
        assert_eq!(spot_name("4", &spots), "Spot #4");
    }
}
