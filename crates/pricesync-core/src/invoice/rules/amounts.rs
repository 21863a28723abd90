//! Amount parsing for PROCOQUIM invoices.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ExtractionError;

/// Parse an invoice amount with comma thousands separators (`1,234.56`).
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parse a matched amount, naming the field on failure.
pub fn parse_amount_field(field: &str, s: &str) -> Result<Decimal, ExtractionError> {
    parse_amount(s).ok_or_else(|| ExtractionError::Parse {
        field: field.to_string(),
        value: s.to_string(),
    })
}

/// Format an amount in Colombian peso style (`$ 1.234.567,89`).
pub fn format_cop(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}$ {},{}", sign, formatted, decimal_part)
}
