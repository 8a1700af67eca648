//! Dataset summaries: headline KPIs and per-type / per-route aggregates.
//!
//! Aggregated means only consider records with a known (finite) value, so an
//! unrated venue lowers no average. The KPI block also reports how many
//! records carry unknown numerics, making the permissive range filtering
//! visible instead of silent.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::record::VenueRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_records: usize,
    pub distinct_types: usize,
    pub distinct_route_tags: usize,
    pub unknown_ratings: usize,
    pub unknown_review_counts: usize,
}

pub fn kpi_summary(records: &[&VenueRecord]) -> KpiSummary {
    let distinct_types = records
        .iter()
        .map(|r| r.venue_type.as_str())
        .filter(|t| !t.is_empty())
        .unique()
        .count();
    let distinct_route_tags = records
        .iter()
        .flat_map(|r| r.route_tags.iter())
        .filter(|t| !t.is_empty())
        .unique()
        .count();
    KpiSummary {
        total_records: records.len(),
        distinct_types,
        distinct_route_tags,
        unknown_ratings: records.iter().filter(|r| r.rating.is_nan()).count(),
        unknown_review_counts: records.iter().filter(|r| r.review_count.is_nan()).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAggregate {
    pub venue_type: String,
    pub records: usize,
    /// Mean over records with a known rating; absent when none is known.
    pub mean_rating: Option<f64>,
    pub mean_review_count: Option<f64>,
}

/// Label for the bucket of records without a type.
pub const UNTYPED_LABEL: &str = "(sin tipo)";

/// Per-type aggregates, largest group first, ties broken by name.
pub fn aggregate_by_type(records: &[&VenueRecord]) -> Vec<TypeAggregate> {
    #[derive(Default)]
    struct Accumulator {
        records: usize,
        rating_sum: f64,
        rating_count: usize,
        review_sum: f64,
        review_count: usize,
    }

    let mut buckets: HashMap<String, Accumulator> = HashMap::new();
    for record in records {
        let key = if record.venue_type.is_empty() {
            UNTYPED_LABEL.to_string()
        } else {
            record.venue_type.clone()
        };
        let bucket = buckets.entry(key).or_default();
        bucket.records += 1;
        if record.rating.is_finite() {
            bucket.rating_sum += record.rating;
            bucket.rating_count += 1;
        }
        if record.review_count.is_finite() {
            bucket.review_sum += record.review_count;
            bucket.review_count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(venue_type, acc)| TypeAggregate {
            venue_type,
            records: acc.records,
            mean_rating: (acc.rating_count > 0).then(|| acc.rating_sum / acc.rating_count as f64),
            mean_review_count: (acc.review_count > 0)
                .then(|| acc.review_sum / acc.review_count as f64),
        })
        .sorted_by(|a, b| {
            b.records
                .cmp(&a.records)
                .then_with(|| a.venue_type.cmp(&b.venue_type))
        })
        .collect()
}

/// Record count per route tag, largest first, ties broken by name. A record
/// on several routes counts once per route.
pub fn route_counts(records: &[&VenueRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        for tag in &record.route_tags {
            if !tag.is_empty() {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}

/// Record count per venue type, largest first, ties broken by name.
pub fn type_counts(records: &[&VenueRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        if !record.venue_type.is_empty() {
            *counts.entry(record.venue_type.clone()).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .collect()
}
