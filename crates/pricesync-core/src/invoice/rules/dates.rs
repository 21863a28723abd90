//! Date extraction for PROCOQUIM invoices.

use chrono::NaiveDate;
use regex::Regex;

use super::patterns::{DUE_DATE, GENERATION_DATE, ISSUE_DATE};

/// Dates printed in the invoice header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceDates {
    /// Generación.
    pub generated_on: Option<NaiveDate>,
    /// Expedición.
    pub issued_on: Option<NaiveDate>,
    /// Vencimiento.
    pub due_on: Option<NaiveDate>,
    /// Labeled tokens that are not real calendar dates (e.g. `31/02/2024`).
    pub invalid: Vec<String>,
}

/// Parse a `DD/MM/YYYY` date.
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").ok()
}

/// Extract the three labeled header dates.
pub fn extract_dates(text: &str) -> InvoiceDates {
    let mut result = InvoiceDates::default();

    result.generated_on = labeled_date(&GENERATION_DATE, text, &mut result.invalid);
    result.issued_on = labeled_date(&ISSUE_DATE, text, &mut result.invalid);
    result.due_on = labeled_date(&DUE_DATE, text, &mut result.invalid);

    result
}

fn labeled_date(pattern: &Regex, text: &str, invalid: &mut Vec<String>) -> Option<NaiveDate> {
    let caps = pattern.captures(text)?;
    let token = &caps[1];
    let date = parse_dmy(token);
    if date.is_none() {
        invalid.push(caps[0].to_string());
    }
    date
}
