pub mod cli;
pub mod export;
pub mod facets;
pub mod filter;
pub mod io_utils;
pub mod loader;
pub mod parse;
pub mod record;
pub mod stats;
pub mod table;
pub mod words;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use serde_json::json;

use crate::{
    cli::{Cli, Commands, ExportArgs, FacetsArgs, InputOpts, PreviewArgs, StatsArgs, WordsArgs},
    facets::Facets,
    record::{VenueRecord, format_number},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("venue_lens", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => handle_preview(&args),
        Commands::Facets(args) => handle_facets(&args),
        Commands::Stats(args) => handle_stats(&args),
        Commands::Words(args) => handle_words(&args),
        Commands::Export(args) => handle_export(&args),
    }
}

fn load(input: &InputOpts) -> Result<Vec<VenueRecord>> {
    loader::load_dataset(
        &input.input,
        input.delimiter,
        input.input_encoding.as_deref(),
    )
    .with_context(|| format!("Loading dataset from {:?}", input.input))
}

fn handle_preview(args: &PreviewArgs) -> Result<()> {
    let records = load(&args.input)?;
    let criteria = args.filter.to_criteria();
    let filtered = filter::apply(&records, &criteria);
    if filtered.is_empty() {
        println!("No records matched the active filters.");
        return Ok(());
    }

    let headers = ["name", "type", "city", "routes", "rating", "reviews", "location"]
        .map(String::from)
        .to_vec();
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .take(args.rows)
        .map(|r| preview_row(r))
        .collect();
    table::print_table(&headers, &rows);
    println!(
        "Showing {} of {} matching record(s) ({} loaded).",
        rows.len(),
        filtered.len(),
        records.len()
    );
    Ok(())
}

fn preview_row(record: &VenueRecord) -> Vec<String> {
    let location = if record.has_location() {
        format!("{:.5}, {:.5}", record.latitude, record.longitude)
    } else {
        "-".to_string()
    };
    vec![
        record.name.clone(),
        record.venue_type.clone(),
        record.city.clone(),
        record.route_tags.join("|"),
        if record.rating.is_finite() {
            format!("{:.1}", record.rating)
        } else {
            "-".to_string()
        },
        if record.review_count.is_finite() {
            format_number(record.review_count)
        } else {
            "-".to_string()
        },
        location,
    ]
}

fn handle_facets(args: &FacetsArgs) -> Result<()> {
    let records = load(&args.input)?;
    let facets = Facets::build(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    let refs: Vec<&VenueRecord> = records.iter().collect();
    let type_counts = stats::type_counts(&refs);
    let route_counts = stats::route_counts(&refs);

    let headers = ["value", "records"].map(String::from).to_vec();
    println!("Venue types:");
    table::print_table(&headers, &counts_in_facet_order(&facets.types, &type_counts));
    println!();
    println!("Route tags:");
    table::print_table(
        &headers,
        &counts_in_facet_order(&facets.route_tags, &route_counts),
    );
    println!();
    println!("Max observed review count: {}", format_number(facets.max_review_count));
    Ok(())
}

fn counts_in_facet_order(facet: &[String], counts: &[(String, usize)]) -> Vec<Vec<String>> {
    facet
        .iter()
        .map(|value| {
            let count = counts
                .iter()
                .find(|(candidate, _)| candidate == value)
                .map(|(_, count)| *count)
                .unwrap_or(0);
            vec![value.clone(), count.to_string()]
        })
        .collect()
}

fn handle_stats(args: &StatsArgs) -> Result<()> {
    let records = load(&args.input)?;
    let criteria = args.filter.to_criteria();
    let filtered = filter::apply(&records, &criteria);
    let kpis = stats::kpi_summary(&filtered);
    let by_type = stats::aggregate_by_type(&filtered);
    let by_route = stats::route_counts(&filtered);

    if args.json {
        let payload = json!({
            "kpis": kpis,
            "by_type": by_type,
            "by_route": by_route
                .iter()
                .map(|(route, count)| json!({ "route": route, "records": count }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let kpi_headers = ["metric", "value"].map(String::from).to_vec();
    let kpi_rows = vec![
        vec!["total records".to_string(), kpis.total_records.to_string()],
        vec!["distinct types".to_string(), kpis.distinct_types.to_string()],
        vec![
            "distinct route tags".to_string(),
            kpis.distinct_route_tags.to_string(),
        ],
        vec![
            "records without rating".to_string(),
            kpis.unknown_ratings.to_string(),
        ],
        vec![
            "records without review count".to_string(),
            kpis.unknown_review_counts.to_string(),
        ],
    ];
    table::print_table(&kpi_headers, &kpi_rows);
    println!();

    let type_headers = ["type", "records", "mean_rating", "mean_reviews"]
        .map(String::from)
        .to_vec();
    let type_rows: Vec<Vec<String>> = by_type
        .iter()
        .map(|agg| {
            vec![
                agg.venue_type.clone(),
                agg.records.to_string(),
                agg.mean_rating
                    .map(|v| format!("{v:.2}"))
                    .unwrap_or_else(|| "-".to_string()),
                agg.mean_review_count
                    .map(|v| format!("{v:.0}"))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    table::print_table(&type_headers, &type_rows);

    if !by_route.is_empty() {
        println!();
        let route_headers = ["route", "records"].map(String::from).to_vec();
        let route_rows: Vec<Vec<String>> = by_route
            .iter()
            .map(|(route, count)| vec![route.clone(), count.to_string()])
            .collect();
        table::print_table(&route_headers, &route_rows);
    }
    info!("Summarized {} matching record(s)", kpis.total_records);
    Ok(())
}

fn handle_words(args: &WordsArgs) -> Result<()> {
    let records = load(&args.input)?;
    let criteria = args.filter.to_criteria();
    let filtered = filter::apply(&records, &criteria);
    let ranked = words::word_frequencies(&filtered, args.top);
    if ranked.is_empty() {
        println!("No words to analyze for the active filters.");
        return Ok(());
    }
    let headers = ["word", "count"].map(String::from).to_vec();
    let rows: Vec<Vec<String>> = ranked
        .iter()
        .map(|w| vec![w.word.clone(), w.count.to_string()])
        .collect();
    table::print_table(&headers, &rows);
    Ok(())
}

fn handle_export(args: &ExportArgs) -> Result<()> {
    let records = load(&args.input)?;
    let criteria = args.filter.to_criteria();
    let filtered = filter::apply(&records, &criteria);
    let delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref().filter(|p| !io_utils::is_dash(p)),
        args.output_delimiter,
    );
    export::export_csv(&filtered, args.output.as_deref(), delimiter)
}
