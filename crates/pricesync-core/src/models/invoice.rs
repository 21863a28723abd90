//! Invoice data models for PROCOQUIM supplier invoices.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Supplier name for the invoice format family handled by the parser.
pub const SUPPLIER_NAME: &str = "PROCOQUIM S.A.S";

/// A parsed supplier invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// Supplier name (constant for this format).
    pub supplier: String,

    /// Invoice number (digits after `No. PCQP`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Date the invoice was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<NaiveDate>,

    /// Date the invoice was issued (expedición).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<NaiveDate>,

    /// Payment due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<NaiveDate>,

    /// Billed customer.
    pub customer: Customer,

    /// Line items in invoice order.
    pub line_items: Vec<LineItem>,

    /// Aggregate totals printed on the invoice.
    pub totals: InvoiceTotals,

    /// Number of extracted line items.
    pub item_count: usize,
}

/// The billed customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer name (after `Señores`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Customer tax ID (NIT).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Invoice totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Total before tax (Total Bruto).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross: Option<Decimal>,

    /// Tax amount (IVA 19%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Decimal>,

    /// Amount payable (Total a Pagar).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

/// A single line item on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item number as printed on the line.
    pub position: String,

    /// Product description as printed.
    pub original_name: String,

    /// Canonical catalog name resolved by the product mapper.
    pub canonical_name: String,

    /// Unit of measure as printed (Kilogramo, Litro, Unidad...).
    pub unit: String,

    /// Quantity.
    pub quantity: Decimal,

    /// Unit price.
    pub unit_price: Decimal,

    /// Line value before tax.
    pub gross_value: Decimal,

    /// Line value including tax.
    pub total_value: Decimal,

    /// Container or vessel rather than chemical content.
    pub is_packaging: bool,

    /// A known mislabeled description was corrected by the mapper.
    pub was_name_corrected: bool,
}

impl LineItem {
    /// Chemical items are the only ones eligible for price matching.
    pub fn is_chemical(&self) -> bool {
        !self.is_packaging
    }
}

impl InvoiceDocument {
    /// Create an empty invoice for the supplier.
    pub fn new() -> Self {
        Self {
            supplier: SUPPLIER_NAME.to_string(),
            invoice_number: None,
            generated_on: None,
            issued_on: None,
            due_on: None,
            customer: Customer::default(),
            line_items: Vec::new(),
            totals: InvoiceTotals::default(),
            item_count: 0,
        }
    }

    /// Line items eligible for price matching.
    pub fn chemical_items(&self) -> Vec<&LineItem> {
        self.line_items.iter().filter(|i| i.is_chemical()).collect()
    }

    /// Packaging line items.
    pub fn packaging_items(&self) -> Vec<&LineItem> {
        self.line_items.iter().filter(|i| i.is_packaging).collect()
    }

    /// Line items whose description was auto-corrected.
    pub fn corrected_items(&self) -> Vec<&LineItem> {
        self.line_items
            .iter()
            .filter(|i| i.was_name_corrected)
            .collect()
    }

    /// Sum of line totals, for comparison with the printed total.
    ///
    /// `None` when the sum does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        self.line_items
            .iter()
            .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.total_value))
    }

    /// Check the invoice data and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.invoice_number.is_none() {
            issues.push("Missing invoice number".to_string());
        }

        if self.line_items.is_empty() {
            issues.push("No line items".to_string());
        }

        if let (Some(total), Some(calculated)) = (self.totals.total, self.line_total()) {
            let off = calculated.checked_sub(total).map_or(true, |d| d.abs() > Decimal::ONE);
            if !self.line_items.is_empty() && off {
                issues.push(format!(
                    "Line item total ({}) differs from invoice total ({})",
                    calculated, total
                ));
            }
        }

        issues
    }
}

impl Default for InvoiceDocument {
    fn default() -> Self {
        Self::new()
    }
}
