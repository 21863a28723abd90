//! Rule-based parser for PROCOQUIM invoice text.

use std::time::Instant;

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::invoice::*;
use crate::products::{is_packaging, ProductMapper};

use super::rules::{
    dates::extract_dates,
    parse_amount_field,
    patterns::*,
};
use super::Result;

/// Known mislabeled description that the mapper corrects to the 13% product.
pub const MISLABELED_HYPOCHLORITE: &str = "HIPOCLORITO DE SODIO AL 15%";

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: InvoiceDocument,
    /// Raw extracted text.
    pub raw_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse invoice from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Parser for the PROCOQUIM invoice layout.
#[derive(Debug, Clone, Default)]
pub struct PcqpInvoiceParser {
    mapper: ProductMapper,
}

impl PcqpInvoiceParser {
    /// Create a parser using the built-in product table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom product table.
    pub fn with_mapper(mut self, mapper: ProductMapper) -> Self {
        self.mapper = mapper;
        self
    }

    fn extract_invoice_number(&self, text: &str) -> Option<String> {
        INVOICE_NUMBER.captures(text).map(|caps| caps[1].to_string())
    }

    fn extract_customer(&self, text: &str) -> Customer {
        let name = CUSTOMER_NAME
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|name| !name.is_empty());

        let tax_id = CUSTOMER_TAX_ID
            .captures(text)
            .map(|caps| caps[1].to_string());

        Customer { name, tax_id }
    }

    fn extract_totals(&self, text: &str) -> Result<InvoiceTotals> {
        Ok(InvoiceTotals {
            gross: labeled_amount(&TOTAL_GROSS, "Total Bruto", text)?,
            tax: labeled_amount(&TOTAL_TAX, "IVA 19%", text)?,
            total: labeled_amount(&TOTAL_PAYABLE, "Total a Pagar", text)?,
        })
    }

    fn extract_line_items(&self, text: &str) -> Result<Vec<LineItem>> {
        LINE_ITEM
            .captures_iter(text)
            .map(|caps| self.parse_line_item(&caps))
            .collect()
    }

    fn parse_line_item(&self, caps: &Captures<'_>) -> Result<LineItem> {
        let position = caps[1].to_string();

        let original_name = caps[2].trim().to_string();
        let canonical_name = self.mapper.map_to_canonical(&original_name);
        let was_name_corrected = original_name.contains(MISLABELED_HYPOCHLORITE);

        if was_name_corrected {
            debug!(
                "Item {}: corrected {:?} to {:?}",
                position, original_name, canonical_name
            );
        }

        Ok(LineItem {
            position,
            is_packaging: is_packaging(&original_name),
            canonical_name,
            original_name,
            unit: caps[3].to_string(),
            quantity: parse_amount_field("quantity", &caps[4])?,
            unit_price: parse_amount_field("unit price", &caps[5])?,
            gross_value: parse_amount_field("gross value", &caps[6])?,
            total_value: parse_amount_field("total value", &caps[7])?,
            was_name_corrected,
        })
    }
}

fn labeled_amount(pattern: &Regex, field: &str, text: &str) -> Result<Option<Decimal>> {
    pattern
        .captures(text)
        .map(|caps| parse_amount_field(field, &caps[1]))
        .transpose()
}

impl InvoiceParser for PcqpInvoiceParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing invoice from {} characters of text", text.len());

        let invoice_number = self.extract_invoice_number(text);

        let dates = extract_dates(text);
        for token in &dates.invalid {
            warnings.push(format!("Ignoring invalid date: {}", token));
        }

        let customer = self.extract_customer(text);
        let totals = self.extract_totals(text)?;

        let line_items = self.extract_line_items(text)?;

        let invoice = InvoiceDocument {
            invoice_number,
            generated_on: dates.generated_on,
            issued_on: dates.issued_on,
            due_on: dates.due_on,
            customer,
            item_count: line_items.len(),
            line_items,
            totals,
            ..InvoiceDocument::new()
        };

        warnings.extend(invoice.validate());
        for warning in &warnings {
            warn!("{}", warning);
        }

        debug!(
            "Extracted invoice {} with {} line items ({} packaging)",
            invoice.invoice_number.as_deref().unwrap_or("UNKNOWN"),
            invoice.item_count,
            invoice.packaging_items().len()
        );

        Ok(ExtractionResult {
            invoice,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Parse invoice text with the default parser.
pub fn parse_invoice(text: &str) -> Result<InvoiceDocument> {
    PcqpInvoiceParser::new().parse(text).map(|r| r.invoice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const SAMPLE_INVOICE: &str = "\
PROCOQUIM S.A.S NIT 900.123.456-7
FACTURA ELECTRÓNICA DE VENTA No. PCQP 4521
Fecha Generación 01/03/2024 Fecha Expedición 02/03/2024 Fecha Vencimiento 01/04/2024
Señores LAVANDERIA LA ESPAÑOLA
(601) 555 0101
Item Descripción Unidad Cantidad Valor Unitario Valor Bruto IVA Valor Total
1 ACIDO ACETICO X 20 KG Kilogramo 20 12,000.00 240,000.00 19 % 285,600.00
2 HIPOCLORITO DE SODIO AL 15% Litro 100 1,500.50 150,050.00 19 % 178,559.50
3 TAMBOR PLASTICO 220 L Unidad 2 35,000.00 70,000.00 19 % 83,300.00
4 SODA CAUSTICA X 25 KG Kilogramos 25 4,800.00 120,000.00 19 % 142,800.00
Total Bruto 580,050.00
IVA 19% 110,209.50
Total a Pagar 690,259.50
";

    #[test]
    fn test_parse_sample_invoice() {
        let result = PcqpInvoiceParser::new().parse(SAMPLE_INVOICE).unwrap();
        let invoice = &result.invoice;

        assert_eq!(invoice.supplier, "PROCOQUIM S.A.S");
        assert_eq!(invoice.invoice_number.as_deref(), Some("4521"));
        assert_eq!(invoice.generated_on, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(invoice.issued_on, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(invoice.due_on, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(invoice.customer.name.as_deref(), Some("LAVANDERIA LA ESPAÑOLA"));
        assert_eq!(invoice.customer.tax_id.as_deref(), Some("900.123.456-7"));
        assert_eq!(invoice.item_count, 4);
        assert_eq!(invoice.totals.gross, Some(Decimal::from(580050)));
        assert_eq!(invoice.totals.tax, Some(Decimal::from_str("110209.50").unwrap()));
        assert_eq!(invoice.totals.total, Some(Decimal::from_str("690259.50").unwrap()));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_line_item_fields() {
        let invoice = parse_invoice(SAMPLE_INVOICE).unwrap();

        let first = &invoice.line_items[0];
        assert_eq!(first.position, "1");
        assert_eq!(first.original_name, "ACIDO ACETICO X 20 KG");
        assert_eq!(first.canonical_name, "ACIDO ACETICO TECNICO");
        assert_eq!(first.unit, "Kilogramo");
        assert_eq!(first.quantity, Decimal::from(20));
        assert_eq!(first.unit_price, Decimal::from(12000));
        assert_eq!(first.gross_value, Decimal::from(240000));
        assert_eq!(first.total_value, Decimal::from(285600));
        assert!(!first.is_packaging);
        assert!(!first.was_name_corrected);

        assert_eq!(invoice.line_items[3].unit, "Kilogramos");
        assert_eq!(invoice.line_items[3].canonical_name, "SODA CAUSTICA");
    }

    #[test]
    fn test_hypochlorite_correction() {
        let invoice = parse_invoice(SAMPLE_INVOICE).unwrap();
        let item = &invoice.line_items[1];

        assert_eq!(item.original_name, "HIPOCLORITO DE SODIO AL 15%");
        assert_eq!(item.canonical_name, "HIPOCLORITO DE SODIO AL 13%");
        assert!(item.was_name_corrected);
        assert_eq!(item.unit_price, Decimal::from_str("1500.50").unwrap());
        assert_eq!(invoice.corrected_items().len(), 1);
    }

    #[test]
    fn test_packaging_item() {
        let invoice = parse_invoice(SAMPLE_INVOICE).unwrap();
        let item = &invoice.line_items[2];

        assert_eq!(item.original_name, "TAMBOR PLASTICO 220 L");
        assert!(item.is_packaging);
        assert_eq!(invoice.chemical_items().len(), 3);
    }

    #[test]
    fn test_invoice_number() {
        let invoice = parse_invoice("Factura de venta No. PCQP 4521 emitida por el proveedor").unwrap();
        assert_eq!(invoice.invoice_number.as_deref(), Some("4521"));

        let invoice = parse_invoice("No.PCQP0099").unwrap();
        assert_eq!(invoice.invoice_number.as_deref(), Some("0099"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let result = PcqpInvoiceParser::new()
            .parse("texto sin estructura reconocible de factura, solo palabras sueltas")
            .unwrap();
        let invoice = &result.invoice;

        assert_eq!(invoice.invoice_number, None);
        assert_eq!(invoice.generated_on, None);
        assert_eq!(invoice.customer, Customer::default());
        assert_eq!(invoice.totals, InvoiceTotals::default());
        assert!(invoice.line_items.is_empty());
        assert_eq!(
            result.warnings,
            vec!["Missing invoice number".to_string(), "No line items".to_string()]
        );
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let text = "\
1 GLICERINA Kilogramo 5 9,000.00 45,000.00 19 % 53,550.00
2 FORMOL Litro 10 , 25,000.00 19 % 29,750.00
";
        let invoice = parse_invoice(text).unwrap();

        assert_eq!(invoice.item_count, 1);
        assert_eq!(invoice.line_items[0].position, "1");
        assert_eq!(invoice.line_items[0].canonical_name, "GLICERINA");
    }

    #[test]
    fn test_unparseable_amount_fails_with_cause() {
        let text = "1 FORMOL Litro 10 99999999999999999999999999999999 25,000.00 19 % 29,750.00";
        let err = parse_invoice(text).unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to parse unit price: 99999999999999999999999999999999"
        );
    }

    #[test]
    fn test_long_number_before_item_keeps_invoice() {
        let text = "Cliente cedula 9001234567\n\
                    1 ACIDO ACETICO X 20 KG Kilogramo 20 12,000.00 240,000.00 19 % 285,600.00\n\
                    No. PCQP 1";
        let invoice = parse_invoice(text).unwrap();

        assert_eq!(invoice.invoice_number.as_deref(), Some("1"));
        assert_eq!(invoice.item_count, 1);
        assert_eq!(invoice.line_items[0].position, "9001234567");
        assert!(invoice.line_items[0].original_name.contains("ACIDO ACETICO"));
        assert_eq!(invoice.line_items[0].unit_price, Decimal::from(12000));
    }

    #[test]
    fn test_invalid_date_is_a_warning() {
        // a date right before an item line would be read as its position
        let text = "1 VARSOL LITROS 20 3,000 60,000 19 % 71,400\n\
                    No. PCQP 7 Fecha Vencimiento 31/02/2024";
        let result = PcqpInvoiceParser::new().parse(text).unwrap();

        assert_eq!(result.invoice.due_on, None);
        assert_eq!(result.invoice.item_count, 1);
        assert!(result.warnings[0].contains("31/02/2024"));
    }

    #[test]
    fn test_custom_mapper() {
        let parser = PcqpInvoiceParser::new()
            .with_mapper(ProductMapper::new([("FORMOL", "FORMALDEHIDO 37%")]));
        let result = parser
            .parse("1 FORMOL Litro 10 2,500 25,000.00 19 % 29,750.00")
            .unwrap();

        assert_eq!(result.invoice.line_items[0].canonical_name, "FORMALDEHIDO 37%");
    }
}
