//! Facet derivation: the option sets offered as filter choices.
//!
//! Facets describe the loaded universe, not the current selection, so they
//! are built from the full dataset exactly once per load.

use itertools::Itertools;
use serde::Serialize;

use crate::record::VenueRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    /// Distinct non-empty venue types, sorted ascending.
    pub types: Vec<String>,
    /// Distinct non-empty route tags across all records, sorted ascending.
    pub route_tags: Vec<String>,
    /// Largest finite review count observed; 0 when none is known. Callers
    /// that want a dataset-derived upper bound for the review filter read it
    /// from here.
    pub max_review_count: f64,
}

impl Facets {
    pub fn build(records: &[VenueRecord]) -> Self {
        let types = records
            .iter()
            .map(|r| r.venue_type.clone())
            .filter(|t| !t.is_empty())
            .sorted()
            .dedup()
            .collect();
        let route_tags = records
            .iter()
            .flat_map(|r| r.route_tags.iter().cloned())
            .filter(|t| !t.is_empty())
            .sorted()
            .dedup()
            .collect();
        let max_review_count = records
            .iter()
            .map(|r| r.review_count)
            .filter(|n| n.is_finite())
            .fold(0.0_f64, f64::max);
        Self {
            types,
            route_tags,
            max_review_count,
        }
    }
}
