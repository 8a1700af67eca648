//! The filter predicate engine: one criteria value, five ANDed predicates,
//! applied identically by every command.
//!
//! Range predicates are permissive on missing data: a record whose rating or
//! review count is unknown (`NaN`) is never excluded by that range. Only a
//! known, out-of-range value excludes a record.

use crate::record::{VenueRecord, format_number};

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

/// Independent, simultaneously applied predicates. The default value
/// constrains nothing.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against every field.
    pub search_term: String,
    /// Exact-match whitelist of venue types; empty means unconstrained.
    pub selected_types: Vec<String>,
    /// Tags that must ALL be present in a record's route tags.
    pub selected_route_tags: Vec<String>,
    /// Inclusive rating bounds over the 1-5 domain.
    pub rating_range: (f64, f64),
    /// Inclusive review-count bounds.
    pub review_count_range: (f64, f64),
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_types: Vec::new(),
            selected_route_tags: Vec::new(),
            rating_range: (RATING_MIN, RATING_MAX),
            review_count_range: (0.0, f64::INFINITY),
        }
    }
}

impl FilterCriteria {
    /// Decides inclusion for one record: logical AND across all predicates.
    pub fn matches(&self, record: &VenueRecord) -> bool {
        self.matches_search(record)
            && self.matches_type(record)
            && self.matches_route_tags(record)
            && range_permits(self.rating_range, record.rating)
            && range_permits(self.review_count_range, record.review_count)
    }

    fn matches_search(&self, record: &VenueRecord) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        search_haystack(record).contains(&term)
    }

    fn matches_type(&self, record: &VenueRecord) -> bool {
        self.selected_types.is_empty() || self.selected_types.contains(&record.venue_type)
    }

    fn matches_route_tags(&self, record: &VenueRecord) -> bool {
        self.selected_route_tags
            .iter()
            .all(|tag| record.route_tags.contains(tag))
    }
}

/// Unknown values always pass; known values must lie inside the inclusive
/// bounds.
fn range_permits((min, max): (f64, f64), value: f64) -> bool {
    !value.is_finite() || (value >= min && value <= max)
}

/// Case-folded concatenation of every field's string form, numerics included.
fn search_haystack(record: &VenueRecord) -> String {
    let mut fields: Vec<String> = vec![
        record.name.clone(),
        record.description.clone(),
        record.venue_type.clone(),
        record.category.clone(),
        record.address.clone(),
        record.city.clone(),
        record.link.clone(),
        record.phone.clone(),
        record.email.clone(),
        record.website.clone(),
        record.rating_raw.clone(),
        record.review_count_raw.clone(),
        record.facebook_url.clone(),
        record.instagram_url.clone(),
        record.route_tags.join(" "),
        record.feature_tags.join(" "),
        record.image_urls.join(" "),
    ];
    for value in [
        record.rating,
        record.review_count,
        record.latitude,
        record.longitude,
    ] {
        if value.is_finite() {
            fields.push(format_number(value));
        }
    }
    fields.join("\n").to_lowercase()
}

/// Pure, order-preserving filter over the dataset.
pub fn apply<'a>(records: &'a [VenueRecord], criteria: &FilterCriteria) -> Vec<&'a VenueRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
