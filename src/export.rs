//! CSV export of the (filtered) dataset.
//!
//! The header row comes from the canonical field names; every value is
//! double-quote-wrapped with internal quotes doubled. Unknown numerics are
//! emitted as empty fields, never as `NaN` or zero.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::{
    io_utils,
    record::{VenueRecord, format_number},
};

pub const EXPORT_HEADERS: &[&str] = &[
    "name",
    "description",
    "type",
    "category",
    "address",
    "city",
    "link",
    "phone",
    "email",
    "website",
    "rating_raw",
    "review_count_raw",
    "rating",
    "review_count",
    "route_tags",
    "feature_tags",
    "image_urls",
    "latitude",
    "longitude",
    "facebook_url",
    "instagram_url",
];

pub fn export_csv(
    records: &[&VenueRecord],
    output: Option<&Path>,
    delimiter: u8,
) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(output, delimiter)?;
    writer
        .write_record(EXPORT_HEADERS)
        .context("Writing export header row")?;
    for (idx, record) in records.iter().enumerate() {
        writer
            .write_record(export_fields(record))
            .with_context(|| format!("Writing record {}", idx + 1))?;
    }
    writer.flush().context("Flushing export output")?;
    if let Some(path) = output {
        info!("Exported {} record(s) to {}", records.len(), path.display());
    }
    Ok(())
}

pub fn export_fields(record: &VenueRecord) -> Vec<String> {
    vec![
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
        format_number(record.rating),
        format_number(record.review_count),
        record.route_tags.join("|"),
        record.feature_tags.join(", "),
        record.image_urls.join(", "),
        format_number(record.latitude),
        format_number(record.longitude),
        record.facebook_url.clone(),
        record.instagram_url.clone(),
    ]
}
