//! Dataset loading: decode a workbook or CSV file, normalize every row, and
//! drop rows that carry neither a name nor usable coordinates.
//!
//! The load is all-or-nothing: an unreadable file or undecodable sheet fails
//! the whole operation. Per-row cleanliness filtering is not an error and is
//! only visible at debug level.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{DataType, Reader, open_workbook_auto};
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    io_utils,
    record::{self, Cell, RawRow, VenueRecord},
};

/// Sheet names probed in order before falling back to the first sheet.
const SHEET_CANDIDATES: &[&str] = &["Sheet1", "Hoja1", "Pontevedra"];

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads and normalizes the dataset, preserving spreadsheet row order.
pub fn load_dataset(
    path: &Path,
    delimiter: Option<u8>,
    input_encoding: Option<&str>,
) -> Result<Vec<VenueRecord>> {
    let raw_rows = if is_workbook(path) {
        read_workbook_rows(path)?
    } else {
        let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
        let encoding = io_utils::resolve_encoding(input_encoding)?;
        read_csv_rows(path, delimiter, encoding)?
    };

    let mut records = Vec::with_capacity(raw_rows.len());
    let mut dropped = 0usize;
    for (idx, raw) in raw_rows.iter().enumerate() {
        let record = record::normalize_row(raw);
        if record.has_identity_or_location() {
            records.push(record);
        } else {
            dropped += 1;
            debug!(
                "Dropping row {}: no name and no usable coordinates",
                idx + 2
            );
        }
    }
    info!(
        "Loaded {} record(s) from {} ({} row(s) dropped)",
        records.len(),
        path.display(),
        dropped
    );
    Ok(records)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn read_workbook_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
    let sheet_names = workbook.sheet_names().to_owned();
    let sheet = SHEET_CANDIDATES
        .iter()
        .map(|candidate| candidate.to_string())
        .find(|candidate| sheet_names.contains(candidate))
        .or_else(|| sheet_names.first().cloned())
        .ok_or_else(|| anyhow!("Workbook {path:?} contains no sheets"))?;
    debug!("Reading sheet '{sheet}' from {path:?}");

    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| anyhow!("Sheet '{sheet}' not found in {path:?}"))?
        .with_context(|| format!("Decoding sheet '{sheet}' in {path:?}"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| anyhow!("Sheet '{sheet}' in {path:?} is empty"))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    Ok(rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .map(|(header, cell)| (header.clone(), to_cell(cell)))
                .collect::<RawRow>()
        })
        .collect())
}

fn to_cell(value: &DataType) -> Cell {
    match value {
        DataType::Empty => Cell::Empty,
        DataType::String(s) if s.trim().is_empty() => Cell::Empty,
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Bool(b) => Cell::Text(b.to_string()),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(text)
            }
        }
    }
}

fn read_csv_rows(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Vec<RawRow>> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers from {path:?}"))?;

    let mut rows = Vec::new();
    for (row_idx, result) in reader.byte_records().enumerate() {
        let byte_record = result.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&byte_record, encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        let row: RawRow = headers
            .iter()
            .zip(decoded.into_iter())
            .map(|(header, field)| {
                let cell = if field.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field)
                };
                (header.clone(), cell)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
