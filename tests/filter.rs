use proptest::prelude::*;
use venue_lens::filter::{FilterCriteria, apply};
use venue_lens::record::{Cell, VenueRecord, columns, normalize_row};

fn venue(name: &str, venue_type: &str, rating: &str, reviews: &str, routes: &str) -> VenueRecord {
    let row = [
        (columns::NAME.to_string(), Cell::Text(name.to_string())),
        (columns::TYPE.to_string(), Cell::Text(venue_type.to_string())),
        (columns::RATING.to_string(), Cell::Text(rating.to_string())),
        (
            columns::REVIEW_COUNT.to_string(),
            Cell::Text(reviews.to_string()),
        ),
        (columns::ROUTES.to_string(), Cell::Text(routes.to_string())),
    ]
    .into_iter()
    .collect();
    normalize_row(&row)
}

#[test]
fn all_predicates_must_hold_simultaneously() {
    let record = venue("Café Uno", "Cafetería", "4,5/5", "120", "Portugués");
    let matching = FilterCriteria {
        search_term: "uno".to_string(),
        selected_types: vec!["Cafetería".to_string()],
        selected_route_tags: vec!["Portugués".to_string()],
        rating_range: (4.0, 5.0),
        review_count_range: (100.0, 200.0),
    };
    assert!(matching.matches(&record));

    // Breaking any single predicate excludes the record.
    let wrong_type = FilterCriteria {
        selected_types: vec!["Hotel".to_string()],
        ..matching.clone()
    };
    assert!(!wrong_type.matches(&record));
    let wrong_reviews = FilterCriteria {
        review_count_range: (500.0, 1000.0),
        ..matching.clone()
    };
    assert!(!wrong_reviews.matches(&record));
}

#[test]
fn route_tag_selection_is_a_subset_requirement() {
    let portuguese_only = venue("Albergue", "Albergue", "", "", "Portugués");

    let single = FilterCriteria {
        selected_route_tags: vec!["Portugués".to_string()],
        ..FilterCriteria::default()
    };
    let pair = FilterCriteria {
        selected_route_tags: vec!["Portugués".to_string(), "Costa".to_string()],
        ..FilterCriteria::default()
    };
    assert!(single.matches(&portuguese_only));
    assert!(!pair.matches(&portuguese_only));
}

#[test]
fn record_with_unknown_rating_passes_every_range() {
    let record = venue("Ermita", "Monumento", "", "", "");
    for (lo, hi) in [(1.0, 5.0), (4.9, 5.0), (1.0, 1.0), (3.0, 3.5)] {
        let criteria = FilterCriteria {
            rating_range: (lo, hi),
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&record), "range [{lo},{hi}] excluded NaN");
    }
}

#[test]
fn filtering_preserves_relative_order() {
    let records = vec![
        venue("Zarzuela", "Cafetería", "4,2/5", "10", ""),
        venue("Alameda", "Hotel", "4,8/5", "20", ""),
        venue("Bodegón", "Cafetería", "4,9/5", "30", ""),
    ];
    let criteria = FilterCriteria {
        rating_range: (4.0, 5.0),
        ..FilterCriteria::default()
    };
    let names: Vec<&str> = apply(&records, &criteria)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Zarzuela", "Alameda", "Bodegón"]);
}

fn rating_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        (10u32..=50).prop_map(|r| f64::from(r) / 10.0),
        Just(f64::NAN),
    ]
}

proptest! {
    // Widening a range filter can only add records, never remove them.
    #[test]
    fn widening_the_rating_range_never_drops_a_record(
        rating in rating_strategy(),
        lo in 10u32..=50,
        width in 0u32..=40,
        widen_down in 0u32..=10,
        widen_up in 0u32..=10,
    ) {
        let record = VenueRecord {
            rating,
            ..venue("Parador", "Hotel", "", "", "")
        };
        let lo = f64::from(lo) / 10.0;
        let hi = (lo + f64::from(width) / 10.0).min(5.0);
        let narrow = FilterCriteria {
            rating_range: (lo, hi),
            ..FilterCriteria::default()
        };
        let wide = FilterCriteria {
            rating_range: (
                (lo - f64::from(widen_down) / 10.0).max(1.0),
                (hi + f64::from(widen_up) / 10.0).min(5.0),
            ),
            ..FilterCriteria::default()
        };
        prop_assert!(!narrow.matches(&record) || wide.matches(&record));
    }

    #[test]
    fn unknown_review_count_passes_any_bounds(lo in 0u32..=2000, width in 0u32..=2000) {
        let record = venue("Pazo", "Monumento", "4,0/5", "sin opiniones", "");
        let criteria = FilterCriteria {
            review_count_range: (f64::from(lo), f64::from(lo + width)),
            ..FilterCriteria::default()
        };
        prop_assert!(criteria.matches(&record));
    }
}
