//! State for a multi-step update: load an invoice, load a price list, run.

use tracing::{debug, info};

use crate::error::{Result, UpdateError};
use crate::invoice::{ExtractionResult, InvoiceParser, PcqpInvoiceParser};
use crate::models::catalog::Dataset;
use crate::models::config::PricesyncConfig;
use crate::models::invoice::InvoiceDocument;
use crate::models::matching::UpdatePlan;
use crate::source::{ingest, InvoiceSource};
use crate::update::UpdatePlanner;

/// One caller's invoice, price list and last update plan.
///
/// Sessions are independent; nothing is shared between them.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: PricesyncConfig,
    parser: PcqpInvoiceParser,
    planner: UpdatePlanner,
    invoice: Option<InvoiceDocument>,
    dataset: Option<Dataset>,
    plan: Option<UpdatePlan>,
}

impl Session {
    pub fn new(config: PricesyncConfig) -> Self {
        Self {
            planner: UpdatePlanner::new(&config),
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &PricesyncConfig {
        &self.config
    }

    /// Ingest and parse an uploaded invoice, replacing any previous one.
    pub fn load_invoice_source(&mut self, source: InvoiceSource) -> Result<ExtractionResult> {
        let text = ingest(source, &self.config.ingest)?;
        let result = self.parser.parse(&text)?;
        self.load_invoice(result.invoice.clone());
        Ok(result)
    }

    /// Replace the invoice. Any previous plan is discarded.
    pub fn load_invoice(&mut self, invoice: InvoiceDocument) {
        debug!("Session invoice set: {} items", invoice.item_count);
        self.invoice = Some(invoice);
        self.plan = None;
    }

    /// Replace the price list. Any previous plan is discarded.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        debug!("Session price list set: {} rows", dataset.len());
        self.dataset = Some(dataset);
        self.plan = None;
    }

    pub fn invoice(&self) -> Option<&InvoiceDocument> {
        self.invoice.as_ref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn plan(&self) -> Option<&UpdatePlan> {
        self.plan.as_ref()
    }

    /// Both the invoice and the price list are loaded.
    pub fn ready(&self) -> bool {
        self.invoice.is_some() && self.dataset.is_some()
    }

    /// Match and plan the update, keeping the plan in the session.
    pub fn run_update(&mut self) -> Result<&UpdatePlan> {
        let invoice = self.invoice.as_ref().ok_or(UpdateError::NotLoaded("invoice"))?;
        let dataset = self.dataset.as_ref().ok_or(UpdateError::NotLoaded("price list"))?;

        let plan = self.planner.plan(invoice, dataset)?;
        info!(
            "Update planned: {} matched, {} unmatched",
            plan.match_set.matches.len(),
            plan.match_set.unmatched.len()
        );

        Ok(self.plan.insert(plan))
    }

    /// Forget everything loaded so far.
    pub fn reset(&mut self) {
        self.invoice = None;
        self.dataset = None;
        self.plan = None;
    }
}
