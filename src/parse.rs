//! Locale-tolerant field parsers for raw spreadsheet cells.
//!
//! The source workbooks mix Spanish number formatting (`1.234,5`), slash
//! ratings (`4,5/5`), free-text review counts (`120 opiniones`), and
//! coordinates written with either separator. Every parser here is total:
//! unparseable numeric input yields `NaN`, unparseable list input yields an
//! empty vector. Callers treat `NaN` as "unknown", never as zero.

use std::sync::OnceLock;

use regex::Regex;

/// Parses a locale-formatted number, taking only the part before the first
/// slash so rating notations such as `"4,5/5"` resolve to `4.5`.
///
/// `.` is treated as a thousands separator and `,` as the decimal separator.
pub fn parse_locale_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    let before_slash = trimmed.split('/').next().unwrap_or(trimmed);
    let normalized = before_slash.trim().replace('.', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => f64::NAN,
    }
}

/// Extracts a review count from free text such as `"1.234 opiniones"`.
///
/// The first contiguous run of digits, dots, and commas is handed to
/// [`parse_locale_number`]; text without any such run yields `NaN`. Cells
/// that already carry a numeric value never reach this function (see the
/// two-tier resolution in the normalizer).
pub fn parse_review_count(raw: &str) -> f64 {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    let pattern = DIGIT_RUN.get_or_init(|| Regex::new(r"[0-9.,]+").expect("valid digit-run regex"));
    match pattern.find(raw) {
        Some(run) => parse_locale_number(run.as_str()),
        None => f64::NAN,
    }
}

/// Parses a latitude or longitude written with either decimal separator,
/// tolerating stray whitespace inside the cell.
pub fn parse_coordinate(raw: &str) -> f64 {
    let cleaned: String = raw
        .replace(',', ".")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => f64::NAN,
    }
}

/// Splits a delimited cell into trimmed, non-empty parts, preserving order.
pub fn split_delimited(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_locale_number_handles_slash_ratings() {
        assert_eq!(parse_locale_number("4,5/5"), 4.5);
        assert_eq!(parse_locale_number("3,0/5"), 3.0);
        assert_eq!(parse_locale_number("9,7/10"), 9.7);
    }

    #[test]
    fn parse_locale_number_treats_dot_as_thousands_separator() {
        assert_eq!(parse_locale_number("1.234"), 1234.0);
        assert_eq!(parse_locale_number("1.234,5"), 1234.5);
    }

    #[test]
    fn parse_locale_number_rejects_garbage() {
        assert!(parse_locale_number("").is_nan());
        assert!(parse_locale_number("   ").is_nan());
        assert!(parse_locale_number("abc").is_nan());
        assert!(parse_locale_number("/5").is_nan());
    }

    #[test]
    fn parse_review_count_extracts_digit_run() {
        assert_eq!(parse_review_count("120 opiniones"), 120.0);
        assert_eq!(parse_review_count("1.234 opiniones"), 1234.0);
        assert_eq!(parse_review_count("5"), 5.0);
        assert!(parse_review_count("sin opiniones").is_nan());
    }

    #[test]
    fn parse_coordinate_accepts_both_separators() {
        assert_eq!(parse_coordinate("42,1"), 42.1);
        assert_eq!(parse_coordinate("-8.6"), -8.6);
        assert_eq!(parse_coordinate(" 42.43 "), 42.43);
        assert!(parse_coordinate("").is_nan());
        assert!(parse_coordinate("norte").is_nan());
    }

    #[test]
    fn split_delimited_trims_and_drops_empties() {
        assert_eq!(split_delimited("A | B |C", '|'), vec!["A", "B", "C"]);
        assert_eq!(
            split_delimited("wifi, parking,, terraza ", ','),
            vec!["wifi", "parking", "terraza"]
        );
        assert!(split_delimited("", '|').is_empty());
        assert!(split_delimited(" | | ", '|').is_empty());
    }
}
