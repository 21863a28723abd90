//! Writing matched invoice prices into a copy of the price list.

use tracing::{debug, info, warn};

use crate::error::UpdateError;
use crate::matching::Matcher;
use crate::models::catalog::{CellValue, Dataset};
use crate::models::config::{CatalogConfig, PricesyncConfig};
use crate::models::invoice::InvoiceDocument;
use crate::models::matching::{MatchSet, UpdatePlan};

/// Result type for update planning.
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Apply a match set to a copy of `dataset`.
///
/// Each match is written to the first row whose name cell equals the matched
/// catalog name. The caller's dataset is never modified.
pub fn plan_update(match_set: MatchSet, dataset: &Dataset, catalog: &CatalogConfig) -> Result<UpdatePlan> {
    let mut updated = dataset.clone();
    let mut updated_rows = Vec::new();

    for m in &match_set.matches {
        let Some(row) = updated.find_row(&catalog.name_column, &m.catalog.catalog_name)? else {
            warn!(
                "Matched product {:?} no longer present in price list",
                m.catalog.catalog_name
            );
            continue;
        };

        updated.set_cell(
            row,
            &catalog.price_column,
            CellValue::Number(m.price_change.new_price),
        )?;
        debug!(
            "Row {}: {} -> {}",
            row, m.price_change.old_price, m.price_change.new_price
        );
        updated_rows.push(row);
    }

    info!("Planned {} price updates", updated_rows.len());

    Ok(UpdatePlan {
        match_set,
        dataset: updated,
        updated_rows,
    })
}

/// Matches an invoice against a price list and plans the resulting update.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanner {
    catalog: CatalogConfig,
    matcher: Matcher,
}

impl UpdatePlanner {
    pub fn new(config: &PricesyncConfig) -> Self {
        Self {
            catalog: config.catalog.clone(),
            matcher: Matcher::new(&config.matching),
        }
    }

    /// Match the invoice's chemical items and plan the update in one step.
    pub fn plan(&self, invoice: &InvoiceDocument, dataset: &Dataset) -> Result<UpdatePlan> {
        let catalog_rows =
            dataset.catalog_rows(&self.catalog.name_column, &self.catalog.price_column)?;
        let match_set = self.matcher.find_matches(&invoice.line_items, &catalog_rows);
        plan_update(match_set, dataset, &self.catalog)
    }
}
