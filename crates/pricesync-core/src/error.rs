//! Error types for the pricesync-core library.

use thiserror::Error;

/// Main error type for the pricesync library.
#[derive(Error, Debug)]
pub enum PricesyncError {
    /// Invoice ingestion error (file type, content length, PDF text).
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Invoice parsing error.
    #[error("parse error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Price update planning error.
    #[error("update error: {0}")]
    Update(#[from] UpdateError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an uploaded file into invoice text.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The input is neither a PDF nor a plain text file.
    #[error("unsupported input: {0} (only PDF and TXT files are accepted)")]
    UnsupportedInput(String),

    /// The extracted text is too short to be an invoice.
    #[error("insufficient content: {length} characters, at least {minimum} required")]
    InsufficientContent { length: usize, minimum: usize },

    /// A text upload was not valid UTF-8.
    #[error("text is not valid UTF-8: {0}")]
    Encoding(String),

    /// PDF text extraction failed.
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A matched numeric or date token could not be converted.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Errors raised while planning a price list update.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The price list lacks a required column.
    #[error("price list has no column named {0:?}")]
    MissingColumn(String),

    /// A row index outside the dataset was addressed.
    #[error("row {row} is out of range ({rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// A stage ran before its inputs were loaded.
    #[error("{0} has not been loaded")]
    NotLoaded(&'static str),
}

/// Result type for the pricesync library.
pub type Result<T> = std::result::Result<T, PricesyncError>;
