//! # Bucket Aggregation
//!
//! Accumulates per-label trip/fish counts and turns them into the two views
//! the statistics screens need: the single best bucket of a dimension, and a
//! ranked share-of-catch list for charts and legends.
//!
//! ## Sample Size Policy
//!
//! Both views take a `min_trips` threshold. It is advisory: buckets below the
//! threshold are set aside only as long as at least one bucket meets it. With
//! too little data overall the full set is used instead, so the user still
//! sees a result.

use crate::buckets::UNKNOWN_LABEL;
use crate::{BucketItem, SimpleBucket};
use serde::Serialize;
use tracing::trace;

/// Insertion-ordered map from bucket label to accumulated counts.
///
/// Iteration order is the order labels were first recorded, which is also
/// the tie-break order for every ranking in this module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BucketStats {
    entries: Vec<(String, SimpleBucket)>,
}

impl BucketStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one trip that landed `fish` fish under `label`.
    pub fn record(&mut self, label: &str, fish: u64) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, bucket)) => {
                bucket.trips += 1;
                bucket.fish += fish;
            }
            None => self
                .entries
                .push((label.to_string(), SimpleBucket { trips: 1, fish })),
        }
    }

    /// Set the counts for `label`, replacing any previous value.
    pub fn insert(&mut self, label: &str, bucket: SimpleBucket) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, existing)) => *existing = bucket,
            None => self.entries.push((label.to_string(), bucket)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&SimpleBucket> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, bucket)| bucket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SimpleBucket)> {
        self.entries.iter().map(|(l, b)| (l.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of fish across all labels.
    pub fn total_fish(&self) -> u64 {
        self.entries.iter().map(|(_, b)| b.fish).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, SimpleBucket)> for BucketStats {
    fn from_iter<I: IntoIterator<Item = (S, SimpleBucket)>>(iter: I) -> Self {
        let mut stats = BucketStats::new();
        for (label, bucket) in iter {
            let label: String = label.into();
            stats.insert(&label, bucket);
        }
        stats
    }
}

/// The winning bucket of a dimension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BestBucket {
    pub label: String,
    pub trips: u64,
    pub fish: u64,
}

/// First entry with the highest fish count; later ties never displace it.
fn max_fish<'a, I>(entries: I) -> Option<(&'a str, &'a SimpleBucket)>
where
    I: IntoIterator<Item = (&'a str, &'a SimpleBucket)>,
{
    entries.into_iter().fold(None, |best, entry| match best {
        Some((_, b)) if entry.1.fish <= b.fish => best,
        _ => Some(entry),
    })
}

/// Pick the bucket with the most fish among those with at least `min_trips`
/// trips, or among all buckets when none reach the threshold.
///
/// Returns `None` only for empty stats.
pub fn pick_best_bucket(stats: &BucketStats, min_trips: u64) -> Option<BestBucket> {
    let qualified = max_fish(stats.iter().filter(|(_, b)| b.trips >= min_trips));
    let (label, bucket) = match qualified {
        Some(best) => best,
        None => {
            trace!(min_trips, "no bucket meets the trip threshold, using all buckets");
            max_fish(stats.iter())?
        }
    };

    Some(BestBucket {
        label: label.to_string(),
        trips: bucket.trips,
        fish: bucket.fish,
    })
}

/// Rank buckets by fish caught into display items with a percentage share
/// of `total_fish`.
///
/// `"ukendt"` is dropped whenever any classified label exists; the
/// `min_trips` filter is applied after that, and skipped if it would leave
/// nothing. The result is sorted by fish, descending, with ties in recording
/// order, then cut to `limit` entries when given.
pub fn build_bucket_items(
    stats: &BucketStats,
    total_fish: u64,
    min_trips: u64,
    limit: Option<usize>,
) -> Vec<BucketItem> {
    if stats.is_empty() || total_fish == 0 {
        return Vec::new();
    }

    let has_known = stats.iter().any(|(label, _)| label != UNKNOWN_LABEL);
    let candidates: Vec<(&str, &SimpleBucket)> = stats
        .iter()
        .filter(|(label, _)| !(has_known && *label == UNKNOWN_LABEL))
        .collect();

    let qualified: Vec<(&str, &SimpleBucket)> = candidates
        .iter()
        .copied()
        .filter(|(_, b)| b.trips >= min_trips)
        .collect();
    let selected = if qualified.is_empty() {
        candidates
    } else {
        qualified
    };

    let mut items: Vec<BucketItem> = selected
        .into_iter()
        .map(|(label, bucket)| BucketItem {
            label: label.to_string(),
            trips: bucket.trips,
            fish: bucket.fish,
            share: share_percent(bucket.fish, total_fish),
        })
        .collect();

    // stable: equal fish keep recording order
    items.sort_by(|a, b| b.fish.cmp(&a.fish));
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

fn share_percent(fish: u64, total_fish: u64) -> u32 {
    (fish as f64 / total_fish as f64 * 100.0).round() as u32
}
