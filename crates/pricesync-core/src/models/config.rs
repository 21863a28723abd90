//! Configuration structures for the pricing pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the pricesync pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricesyncConfig {
    /// Invoice ingestion configuration.
    pub ingest: IngestConfig,

    /// Price list layout.
    pub catalog: CatalogConfig,

    /// Matching configuration.
    pub matching: MatchingConfig,
}

/// Invoice ingestion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Minimum trimmed text length to accept as invoice content.
    pub min_text_length: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Column labels of the price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Product name column.
    pub name_column: String,

    /// Base price column.
    pub price_column: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name_column: "🛍️ PRODUCTOS".to_string(),
            price_column: "💰 PRECIO BASE".to_string(),
        }
    }
}

/// Matching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// A candidate must score strictly above this to match (0 - 100).
    pub threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { threshold: 75.0 }
    }
}

impl PricesyncConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
