//! # Catch Patterns Core Library
//!
//! Turns raw fishing trip logs into the statistics the app shows its users:
//! which season, time of day, water level, temperature and wind gave the most
//! fish, and which spots are visited most and fish best.
//!
//! ## Design Philosophy
//!
//! ### Never Fail on Partial Data
//! Trip logs are incomplete more often than not (no weather lookup, no GPS
//! track, a spot deleted later). Classification therefore never errors: an
//! unreadable value becomes the `Unknown` bucket and is counted like any other.
//! Aggregations return `None` or an empty list when there is nothing to show.
//!
//! ### Pure and Stateless
//! Bucketizers and aggregators hold no state between calls and never mutate
//! their inputs, so they can be called from any thread or task. The only
//! async piece is the [`timeout`] guard used around slow external lookups.
//!
//! ### Data Flow
//! 1. **Classify**: each trip field goes through a bucketizer in [`buckets`]
//! 2. **Accumulate**: trips and fish are counted per label ([`aggregate::BucketStats`])
//! 3. **Rank**: best bucket and share-of-catch list per dimension ([`aggregate`])
//! 4. **Spots**: trips grouped by location ([`spots`])
//!
//! [`report::PatternReport`] runs all four steps over a trip log.
//!
//! ## Core Types
//! - [`SimpleBucket`]: accumulated `{trips, fish}` for one label
//! - [`BucketItem`]: a ranked, display-ready bucket with its share of the catch

use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod buckets;
pub mod config;
pub mod report;
pub mod spots;
pub mod timeout;
pub mod trip;


/// Trips and fish accumulated under one bucket label.
///
/// # Example
/// ```
/// use catch_patterns::aggregate::BucketStats;
///
/// let mut stats = BucketStats::new();
/// stats.record("Morgenen", 3);
/// stats.record("Morgenen", 0);
///
/// let morning = stats.get("Morgenen").unwrap();
/// assert_eq!((morning.trips, morning.fish), (2, 3));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleBucket {
    /// Number of trips classified into this bucket
    pub trips: u64,
    /// Fish caught across those trips
    pub fish: u64,
}

/// A bucket ranked for display in charts and legends.
///
/// `share` is the bucket's rounded percentage (0–100) of the total catch the
/// list was built against.
///
/// # Example
/// ```
/// use catch_patterns::aggregate::{build_bucket_items, BucketStats};
///
/// let mut stats = BucketStats::new();
/// stats.record("Lavvande", 3);
/// stats.record("Højvande", 1);
///
/// let items = build_bucket_items(&stats, 4, 1, None);
/// assert_eq!(items[0].label, "Lavvande");
/// assert_eq!(items[0].share, 75);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketItem {
    pub label: String,
    pub trips: u64,
    pub fish: u64,
    /// Percentage of the total catch, rounded to the nearest whole number
    pub share: u32,
}
