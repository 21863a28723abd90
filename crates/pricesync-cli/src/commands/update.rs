//! Update command - write invoice prices into a CSV price list.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use pricesync_core::invoice::rules::format_cop;
use pricesync_core::models::matching::{MatchSet, PriceChange};
use pricesync_core::{InvoiceSource, Session};

use super::load_config;
use crate::sheet::{read_csv, write_csv};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Invoice file (PDF or TXT)
    #[arg(required = true)]
    invoice: PathBuf,

    /// Price list (CSV with a header row)
    #[arg(required = true)]
    catalog: PathBuf,

    /// Updated price list (default: <catalog>_updated_<date>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human readable summary
    Text,
    /// JSON match set
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    invoice_number: Option<&'a str>,
    output: &'a Path,
    updated_rows: &'a [usize],
    warnings: &'a [String],
    #[serde(flatten)]
    match_set: &'a MatchSet,
}

pub async fn run(args: UpdateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    for path in [&args.invoice, &args.catalog] {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
    }

    let mut session = Session::new(config);

    info!("Loading invoice {}", args.invoice.display());
    let extraction = session.load_invoice_source(InvoiceSource::from_path(&args.invoice)?)?;

    info!("Loading price list {}", args.catalog.display());
    session.load_dataset(read_csv(&args.catalog)?);

    let plan = session.run_update()?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.catalog));
    write_csv(&plan.dataset, &output_path)?;

    match args.report {
        ReportFormat::Json => {
            let report = JsonReport {
                invoice_number: extraction.invoice.invoice_number.as_deref(),
                output: &output_path,
                updated_rows: &plan.updated_rows,
                warnings: &extraction.warnings,
                match_set: &plan.match_set,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        ReportFormat::Text => {
            for warning in &extraction.warnings {
                eprintln!("{} {}", style("⚠").yellow(), warning);
            }
            print_report(&plan.match_set);
            println!(
                "{} Updated {} prices, written to {}",
                style("✓").green(),
                plan.updated_rows.len(),
                output_path.display()
            );
        }
    }

    Ok(())
}

/// `<dir>/<stem>_updated_<YYYY-MM-DD>.csv` beside the input price list.
fn default_output_path(catalog: &Path) -> PathBuf {
    let stem = catalog
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "precios".to_string());
    let date = chrono::Local::now().format("%Y-%m-%d");

    catalog.with_file_name(format!("{}_updated_{}.csv", stem, date))
}

fn print_report(match_set: &MatchSet) {
    println!(
        "Matched {} of {} products",
        match_set.matches.len(),
        match_set.considered()
    );

    for m in &match_set.matches {
        println!(
            "  {} {} -> {} ({:.0}%)",
            style("✓").green(),
            m.item.original_name,
            m.catalog.catalog_name,
            m.score
        );
        println!("      {}", describe_change(&m.price_change));
    }

    if !match_set.unmatched.is_empty() {
        println!();
        println!("Not found in price list:");
        for item in &match_set.unmatched {
            println!(
                "  {} {} ({})",
                style("✗").red(),
                item.original_name,
                format_cop(item.unit_price)
            );
        }
    }

    println!();
    println!("Net change: {}", format_cop(match_set.total_difference()));
}

fn describe_change(change: &PriceChange) -> String {
    let percent = change
        .percent()
        .map(|p| format!(" ({:+}%)", p))
        .unwrap_or_default();

    let difference = if change.difference.is_sign_positive() && !change.difference.is_zero() {
        style(format!("+{}", format_cop(change.difference))).red()
    } else {
        style(format_cop(change.difference)).green()
    };

    format!(
        "{} -> {}: {}{}",
        format_cop(change.old_price),
        format_cop(change.new_price),
        difference,
        percent
    )
}
