//! Matching and update plan models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Dataset;
use super::invoice::LineItem;

/// The price list row an invoice item was paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMatch {
    /// Zero-based data row index in the price list.
    pub row_index: usize,
    /// Product name as written in the price list.
    pub catalog_name: String,
    /// Normalized form of the price list name.
    pub catalog_base: String,
    /// Normalized form of the invoice item's canonical name.
    pub invoice_base: String,
}

/// Old and new unit price for a matched product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub old_price: Decimal,
    pub new_price: Decimal,
    /// `new_price - old_price`.
    pub difference: Decimal,
}

impl PriceChange {
    pub fn new(old_price: Decimal, new_price: Decimal) -> Self {
        Self {
            old_price,
            new_price,
            difference: new_price - old_price,
        }
    }

    /// Relative change in percent, if the old price is non-zero and the
    /// ratio fits in a `Decimal`.
    pub fn percent(&self) -> Option<Decimal> {
        self.difference
            .checked_div(self.old_price)?
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|p| p.round_dp(2))
    }
}

/// A line item paired with its best price list row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub item: LineItem,
    pub catalog: CatalogMatch,
    /// Similarity score in `0..=100`.
    pub score: f64,
    pub price_change: PriceChange,
}

/// Outcome of matching an invoice against a price list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    /// Items with a qualifying match, in invoice order.
    pub matches: Vec<MatchResult>,
    /// Chemical items without a qualifying match, in invoice order.
    pub unmatched: Vec<LineItem>,
}

impl MatchSet {
    /// Number of chemical items considered.
    pub fn considered(&self) -> usize {
        self.matches.len() + self.unmatched.len()
    }

    /// Net price movement across all matches.
    pub fn total_difference(&self) -> Decimal {
        self.matches.iter().map(|m| m.price_change.difference).sum()
    }
}

/// A match set together with the updated copy of the price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub match_set: MatchSet,
    /// Copy of the price list with new prices written in.
    pub dataset: Dataset,
    /// Data rows that received a new price.
    pub updated_rows: Vec<usize>,
}
