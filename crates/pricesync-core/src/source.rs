//! Turning uploaded files into invoice text.

use std::path::Path;

use tracing::{debug, info};

use crate::error::IngestError;
use crate::models::config::IngestConfig;
use crate::pdf::PdfTextExtractor;

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

/// An invoice as uploaded, before text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceSource {
    /// Binary PDF payload.
    Pdf(Vec<u8>),
    /// Plain text, already decoded.
    Text(String),
}

impl InvoiceSource {
    /// Classify a payload by file name extension or MIME type.
    ///
    /// Accepts `.pdf`, `.txt`, `application/pdf` and `text/plain`.
    pub fn from_bytes(name_or_mime: &str, bytes: Vec<u8>) -> Result<Self> {
        let hint = name_or_mime.trim().to_lowercase();
        let mime = hint.split(';').next().unwrap_or_default().trim();

        let extension = Path::new(&hint)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        if mime == "application/pdf" || extension == "pdf" {
            Ok(InvoiceSource::Pdf(bytes))
        } else if mime == "text/plain" || extension == "txt" {
            String::from_utf8(bytes)
                .map(InvoiceSource::Text)
                .map_err(|e| IngestError::Encoding(e.to_string()))
        } else {
            Err(IngestError::UnsupportedInput(name_or_mime.to_string()))
        }
    }

    /// Read and classify a file from disk.
    pub fn from_path(path: &Path) -> std::result::Result<Self, crate::PricesyncError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&path.to_string_lossy(), bytes)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InvoiceSource::Pdf(_) => "pdf",
            InvoiceSource::Text(_) => "text",
        }
    }
}

/// Extract the invoice text and reject content too short to be an invoice.
pub fn ingest(source: InvoiceSource, config: &IngestConfig) -> Result<String> {
    let kind = source.kind();
    let text = match source {
        InvoiceSource::Pdf(bytes) => PdfTextExtractor::text_from_bytes(&bytes)?,
        InvoiceSource::Text(text) => text,
    };

    let length = text.trim().chars().count();
    debug!("Ingested {} characters from {} source", length, kind);

    if length < config.min_text_length {
        return Err(IngestError::InsufficientContent {
            length,
            minimum: config.min_text_length,
        });
    }

    info!("Accepted {} invoice text ({} characters)", kind, length);
    Ok(text)
}
