//! Core library for supplier invoice price synchronization.
//!
//! This crate provides:
//! - Invoice ingestion (PDF text extraction or plain text)
//! - PROCOQUIM invoice field extraction (number, dates, customer, totals, line items)
//! - Product name normalization, packaging detection and canonical mapping
//! - Matching of invoice items against a price list and update planning

pub mod error;
pub mod invoice;
pub mod matching;
pub mod models;
pub mod pdf;
pub mod products;
pub mod session;
pub mod source;
pub mod update;

pub use error::{PricesyncError, Result};
pub use invoice::{parse_invoice, ExtractionResult, InvoiceParser, PcqpInvoiceParser};
pub use matching::{find_matches, Matcher};
pub use models::catalog::{CatalogRow, CellValue, Dataset};
pub use models::config::PricesyncConfig;
pub use models::invoice::{Customer, InvoiceDocument, InvoiceTotals, LineItem};
pub use models::matching::{CatalogMatch, MatchResult, MatchSet, PriceChange, UpdatePlan};
pub use pdf::{PdfProcessor, PdfTextExtractor};
pub use session::Session;
pub use source::{ingest, InvoiceSource};
pub use update::{plan_update, UpdatePlanner};
