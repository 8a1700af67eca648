//! Raw row model and the canonical venue record.
//!
//! A [`RawRow`] is what the loader hands over: an untyped mapping from
//! column header to cell, exactly as decoded from the workbook. The
//! normalizer turns one raw row into one [`VenueRecord`], keeping the raw
//! rating/review-count text alongside the derived numeric values so both
//! remain inspectable downstream.

use std::collections::HashMap;

use serde::Serialize;

use crate::parse::{parse_coordinate, parse_locale_number, parse_review_count, split_delimited};

/// One decoded spreadsheet cell. Spreadsheet sources produce real numbers
/// for numeric cells; CSV sources only ever produce text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Display form: text as-is, numbers without a trailing `.0` when whole.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Empty => String::new(),
        }
    }
}

/// Untyped spreadsheet row keyed by column header.
pub type RawRow = HashMap<String, Cell>;

/// Expected workbook column headers. Geo headers carry a known misspelling
/// in some exports, hence the fallback chains in [`normalize_row`].
pub mod columns {
    pub const NAME: &str = "nombre_normalizado";
    pub const DESCRIPTION: &str = "descripcion";
    pub const TYPE: &str = "tipo";
    pub const CATEGORY: &str = "categoria";
    pub const ADDRESS: &str = "direccion";
    pub const CITY: &str = "ciudad";
    pub const LINK: &str = "link";
    pub const PHONE: &str = "telefono";
    pub const EMAIL: &str = "email";
    pub const WEBSITE: &str = "web";
    pub const RATING: &str = "calificacion";
    pub const RATING_NUM: &str = "calificacion_num";
    pub const REVIEW_COUNT: &str = "num_opiniones";
    pub const REVIEW_COUNT_NUM: &str = "opiniones_num";
    pub const ROUTES: &str = "situacion_caminos_de_santiago";
    pub const ROUTES_LIST: &str = "caminos_list";
    pub const FEATURES: &str = "caracteristicas";
    pub const IMAGES: &str = "srcset";
    pub const IMAGES_LIST: &str = "srcset_list";
    pub const LATITUDE: &str = "Latitud";
    pub const LATITUDE_ALT: &str = "Latitu";
    pub const LONGITUDE: &str = "Longitud";
    pub const LONGITUDE_ALT: &str = "Longitu";
    pub const FACEBOOK: &str = "facebook_urls";
    pub const INSTAGRAM: &str = "instagram_urls";
}

/// Normalized, immutable representation of one venue.
///
/// String fields are never absent, only possibly empty. Derived numerics use
/// `NaN` as the "unknown" sentinel; derived lists use the empty vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueRecord {
    pub name: String,
    pub description: String,
    pub venue_type: String,
    pub category: String,
    pub address: String,
    pub city: String,
    pub link: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub rating_raw: String,
    pub review_count_raw: String,
    pub rating: f64,
    pub review_count: f64,
    pub route_tags: Vec<String>,
    pub feature_tags: Vec<String>,
    pub image_urls: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub facebook_url: String,
    pub instagram_url: String,
}

impl VenueRecord {
    /// Retention invariant: a record stays in the dataset only if it names
    /// the venue or places it on the map.
    pub fn has_identity_or_location(&self) -> bool {
        !self.name.is_empty() || (self.latitude.is_finite() && self.longitude.is_finite())
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Maps one raw row into a canonical record. Pure and idempotent; never
/// fails. Rows violating the retention invariant are still returned here so
/// the loader owns the drop decision.
pub fn normalize_row(row: &RawRow) -> VenueRecord {
    let rating_cell = cell(row, columns::RATING);
    let review_cell = cell(row, columns::REVIEW_COUNT);

    // Prefer an upstream-enriched numeric column; fall back to parsing the
    // raw text. A numeric cell in the raw column short-circuits parsing too,
    // since re-stringifying it would mangle the decimal point.
    let rating = number(row, columns::RATING_NUM)
        .or_else(|| cell_number(rating_cell))
        .unwrap_or_else(|| parse_locale_number(&cell_display(rating_cell)));
    let review_count = number(row, columns::REVIEW_COUNT_NUM)
        .or_else(|| cell_number(review_cell))
        .unwrap_or_else(|| parse_review_count(&cell_display(review_cell)));

    // Same two-tier rule for list fields: a pre-split column wins over
    // deriving from the raw delimited text.
    let route_tags = prefer_list(row, columns::ROUTES_LIST, columns::ROUTES, '|');
    let image_urls = prefer_list(row, columns::IMAGES_LIST, columns::IMAGES, ',');
    let feature_tags = split_delimited(&text(row, columns::FEATURES), ',');

    VenueRecord {
        name: text(row, columns::NAME),
        description: text(row, columns::DESCRIPTION),
        venue_type: text(row, columns::TYPE),
        category: text(row, columns::CATEGORY),
        address: text(row, columns::ADDRESS),
        city: text(row, columns::CITY),
        link: text(row, columns::LINK),
        phone: text(row, columns::PHONE),
        email: text(row, columns::EMAIL).to_lowercase(),
        website: text(row, columns::WEBSITE),
        rating_raw: cell_display(rating_cell).trim().to_string(),
        review_count_raw: cell_display(review_cell).trim().to_string(),
        rating,
        review_count,
        route_tags,
        feature_tags,
        image_urls,
        latitude: coordinate(row, columns::LATITUDE, columns::LATITUDE_ALT),
        longitude: coordinate(row, columns::LONGITUDE, columns::LONGITUDE_ALT),
        facebook_url: text(row, columns::FACEBOOK),
        instagram_url: text(row, columns::INSTAGRAM),
    }
}

fn cell<'a>(row: &'a RawRow, key: &str) -> Option<&'a Cell> {
    row.get(key).filter(|c| !c.is_empty())
}

fn cell_display(cell: Option<&Cell>) -> String {
    cell.map(Cell::display).unwrap_or_default()
}

fn cell_number(cell: Option<&Cell>) -> Option<f64> {
    match cell {
        Some(Cell::Number(n)) if n.is_finite() => Some(*n),
        _ => None,
    }
}

fn text(row: &RawRow, key: &str) -> String {
    cell_display(cell(row, key)).trim().to_string()
}

fn number(row: &RawRow, key: &str) -> Option<f64> {
    cell_number(cell(row, key))
}

fn coordinate(row: &RawRow, key: &str, fallback_key: &str) -> f64 {
    let value = cell(row, key).or_else(|| cell(row, fallback_key));
    match value {
        Some(Cell::Number(n)) if n.is_finite() => *n,
        Some(other) => parse_coordinate(&other.display()),
        None => f64::NAN,
    }
}

fn prefer_list(row: &RawRow, list_key: &str, raw_key: &str, delimiter: char) -> Vec<String> {
    let pre_split = split_delimited(&text(row, list_key), delimiter);
    if !pre_split.is_empty() {
        return pre_split;
    }
    split_delimited(&text(row, raw_key), delimiter)
}

pub(crate) fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
