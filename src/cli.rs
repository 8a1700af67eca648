use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::filter::{FilterCriteria, RATING_MAX, RATING_MIN};

#[derive(Debug, Parser)]
#[command(author, version, about = "Filter and facet tourism venue spreadsheets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview the filtered records as a formatted table
    Preview(PreviewArgs),
    /// List the available filter options (venue types and route tags)
    Facets(FacetsArgs),
    /// Summarize the filtered dataset (KPIs and per-type aggregates)
    Stats(StatsArgs),
    /// Rank the most frequent words in venue names
    Words(WordsArgs),
    /// Export the filtered records as CSV
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct InputOpts {
    /// Input spreadsheet (.xlsx/.xls/.ods) or CSV/TSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Delimiter for CSV input (supports ',', 'tab', ';', '|'); ignored for workbooks
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding for CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

/// Shared filter flags; every command funnels them through the same
/// predicate engine.
#[derive(Debug, Args, Default)]
pub struct FilterOpts {
    /// Case-insensitive free-text search across all fields
    #[arg(long)]
    pub search: Option<String>,
    /// Restrict to these venue types (repeatable, exact match)
    #[arg(long = "type", action = clap::ArgAction::Append)]
    pub types: Vec<String>,
    /// Require ALL of these route tags to be present (repeatable)
    #[arg(long = "route", action = clap::ArgAction::Append)]
    pub routes: Vec<String>,
    /// Lowest rating to include (records with unknown rating always pass)
    #[arg(long = "min-rating")]
    pub min_rating: Option<f64>,
    /// Highest rating to include
    #[arg(long = "max-rating")]
    pub max_rating: Option<f64>,
    /// Lowest review count to include (unknown counts always pass)
    #[arg(long = "min-reviews")]
    pub min_reviews: Option<f64>,
    /// Highest review count to include
    #[arg(long = "max-reviews")]
    pub max_reviews: Option<f64>,
}

impl FilterOpts {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_term: self.search.clone().unwrap_or_default(),
            selected_types: self.types.clone(),
            selected_route_tags: self.routes.clone(),
            rating_range: (
                self.min_rating.unwrap_or(RATING_MIN),
                self.max_rating.unwrap_or(RATING_MAX),
            ),
            review_count_range: (
                self.min_reviews.unwrap_or(0.0),
                self.max_reviews.unwrap_or(f64::INFINITY),
            ),
        }
    }
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputOpts,
    #[command(flatten)]
    pub filter: FilterOpts,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct FacetsArgs {
    #[command(flatten)]
    pub input: InputOpts,
    /// Emit the facets as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputOpts,
    #[command(flatten)]
    pub filter: FilterOpts,
    /// Emit the summary as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct WordsArgs {
    #[command(flatten)]
    pub input: InputOpts,
    #[command(flatten)]
    pub filter: FilterOpts,
    /// Maximum words to display (0 = all)
    #[arg(long, default_value_t = 15)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputOpts,
    #[command(flatten)]
    pub filter: FilterOpts,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Delimiter for the output file (defaults by extension)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
