//! Parse command - extract data from a single invoice file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use rust_decimal::Decimal;
use tracing::{debug, info};

use pricesync_core::invoice::rules::format_cop;
use pricesync_core::models::invoice::InvoiceDocument;
use pricesync_core::{ingest, InvoiceParser, InvoiceSource, PcqpInvoiceParser};

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Invoice file (PDF or TXT)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV of line items
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let source = InvoiceSource::from_path(&args.input)?;
    let text = ingest(source, &config.ingest)?;
    let result = PcqpInvoiceParser::new().parse(&text)?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let output = format_invoice(&result.invoice, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_invoice(invoice: &InvoiceDocument, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(invoice)?),
        OutputFormat::Csv => format_csv(invoice),
        OutputFormat::Text => Ok(format_text(invoice)),
    }
}

fn format_csv(invoice: &InvoiceDocument) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_number",
        "item",
        "description",
        "canonical_name",
        "unit",
        "quantity",
        "unit_price",
        "gross_value",
        "total_value",
        "packaging",
        "corrected",
    ])?;

    let number = invoice.invoice_number.clone().unwrap_or_default();
    for item in &invoice.line_items {
        wtr.write_record([
            &number,
            &item.position.to_string(),
            &item.original_name,
            &item.canonical_name,
            &item.unit,
            &item.quantity.to_string(),
            &item.unit_price.to_string(),
            &item.gross_value.to_string(),
            &item.total_value.to_string(),
            &item.is_packaging.to_string(),
            &item.was_name_corrected.to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(invoice: &InvoiceDocument) -> String {
    let mut output = String::new();
    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    output.push_str(&format!("Supplier: {}\n", invoice.supplier));
    output.push_str(&format!("Invoice: {}\n", or_dash(invoice.invoice_number.clone())));
    output.push_str(&format!("Generated: {}\n", or_dash(invoice.generated_on.map(|d| d.to_string()))));
    output.push_str(&format!("Issued: {}\n", or_dash(invoice.issued_on.map(|d| d.to_string()))));
    output.push_str(&format!("Due: {}\n", or_dash(invoice.due_on.map(|d| d.to_string()))));
    output.push('\n');

    output.push_str("Customer:\n");
    output.push_str(&format!("  {}\n", or_dash(invoice.customer.name.clone())));
    if let Some(tax_id) = &invoice.customer.tax_id {
        output.push_str(&format!("  NIT: {}\n", tax_id));
    }
    output.push('\n');

    output.push_str(&format!("Items ({}):\n", invoice.item_count));
    for item in &invoice.line_items {
        let mut flags = Vec::new();
        if item.is_packaging {
            flags.push("packaging");
        }
        if item.was_name_corrected {
            flags.push("corrected");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        output.push_str(&format!(
            "  {:>3}. {} -> {} | {} {} x {}{}\n",
            item.position,
            item.original_name,
            item.canonical_name,
            item.quantity,
            item.unit,
            format_cop(item.unit_price),
            flags
        ));
    }
    output.push_str(&format!(
        "  chemical: {}, packaging: {}, corrected: {}\n",
        invoice.chemical_items().len(),
        invoice.packaging_items().len(),
        invoice.corrected_items().len()
    ));
    output.push('\n');

    let money = |value: Option<Decimal>| or_dash(value.map(format_cop));
    output.push_str("Summary:\n");
    output.push_str(&format!("  Gross: {}\n", money(invoice.totals.gross)));
    output.push_str(&format!("  Tax:   {}\n", money(invoice.totals.tax)));
    output.push_str(&format!("  Total: {}\n", money(invoice.totals.total)));

    output
}
