//! Regex patterns for PROCOQUIM invoice extraction.
//!
//! These patterns are the contract with the invoice layout. A line that does
//! not fit [`LINE_ITEM`] is silently skipped, so any change here needs a test
//! with real invoice text.

use lazy_static::lazy_static;
use regex::Regex;

/// Amount with optional comma thousands separators: `1,234,567.89`.
const AMOUNT: &str = r"\d[\d,]*(?:\.\d+)?";

lazy_static! {
    // Invoice number
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"No\.\s*PCQP\s*(\d+)"
    ).unwrap();

    // Labeled dates (DD/MM/YYYY)
    pub static ref GENERATION_DATE: Regex = Regex::new(
        r"Generación\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref ISSUE_DATE: Regex = Regex::new(
        r"Expedición\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DUE_DATE: Regex = Regex::new(
        r"Vencimiento\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Customer
    pub static ref CUSTOMER_NAME: Regex = Regex::new(
        r"Señores\s*([A-ZÁÉÍÓÚÑ\s]+)"
    ).unwrap();

    pub static ref CUSTOMER_TAX_ID: Regex = Regex::new(
        r"NIT\s*([\d.\-]+)"
    ).unwrap();

    // Totals
    pub static ref TOTAL_GROSS: Regex = Regex::new(
        &format!(r"Total Bruto\s*({AMOUNT})")
    ).unwrap();

    pub static ref TOTAL_TAX: Regex = Regex::new(
        &format!(r"IVA 19%\s*({AMOUNT})")
    ).unwrap();

    pub static ref TOTAL_PAYABLE: Regex = Regex::new(
        &format!(r"Total a Pagar\s*({AMOUNT})")
    ).unwrap();

    // Line item: item, description, unit, quantity, unit price, gross value,
    // tax rate (not captured), total value
    pub static ref LINE_ITEM: Regex = Regex::new(&format!(
        r"(\d+)\s+([A-ZÁÉÍÓÚÑ\s\-\d%.]+?)\s+(Kilogramo|Kilogramos|Litro|LITROS|kilogramo|Unidad)\s+(\d+(?:\.\d+)?)\s+({AMOUNT})\s+({AMOUNT})\s+\d+\s*%\s+({AMOUNT})"
    )).unwrap();
}
