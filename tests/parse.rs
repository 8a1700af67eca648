use venue_lens::parse::{
    parse_coordinate, parse_locale_number, parse_review_count, split_delimited,
};

#[test]
fn locale_number_takes_the_part_before_the_slash() {
    assert_eq!(parse_locale_number("4,5/5"), 4.5);
    assert_eq!(parse_locale_number("9,7/10"), 9.7);
    assert_eq!(parse_locale_number(" 3,0/5 "), 3.0);
    // Only the part before the first slash matters.
    assert_eq!(parse_locale_number("4,5/cinco/5"), 4.5);
}

#[test]
fn locale_number_reads_dot_as_thousands_and_comma_as_decimal() {
    assert_eq!(parse_locale_number("1.234"), 1234.0);
    assert_eq!(parse_locale_number("1.234,5"), 1234.5);
    assert_eq!(parse_locale_number("2,75"), 2.75);
}

#[test]
fn locale_number_never_panics_on_garbage() {
    for raw in ["", "  ", "abc", "/5", "cinco/5", "--", ","] {
        assert!(parse_locale_number(raw).is_nan(), "expected NaN for {raw:?}");
    }
}

#[test]
fn review_count_extracts_the_first_digit_run() {
    assert_eq!(parse_review_count("1.234 opiniones"), 1234.0);
    assert_eq!(parse_review_count("120 opiniones"), 120.0);
    assert_eq!(parse_review_count("opiniones: 42"), 42.0);
    assert!(parse_review_count("sin opiniones").is_nan());
    assert!(parse_review_count("").is_nan());
}

#[test]
fn coordinate_accepts_comma_or_dot_and_inner_whitespace() {
    assert_eq!(parse_coordinate("42,1"), 42.1);
    assert_eq!(parse_coordinate("-8,6"), -8.6);
    assert_eq!(parse_coordinate("42.433"), 42.433);
    assert_eq!(parse_coordinate(" 42, 43 "), 42.43);
    assert!(parse_coordinate("norte").is_nan());
}

#[test]
fn split_delimited_keeps_order_and_drops_empties() {
    assert_eq!(split_delimited("A | B |C", '|'), vec!["A", "B", "C"]);
    assert_eq!(
        split_delimited("Portugués|Costa|Portugués", '|'),
        vec!["Portugués", "Costa", "Portugués"]
    );
    assert!(split_delimited("", ',').is_empty());
    assert!(split_delimited("||", '|').is_empty());
}
