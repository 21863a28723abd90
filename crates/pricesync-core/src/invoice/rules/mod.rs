//! Rule-based field extractors for PROCOQUIM invoices.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{format_cop, parse_amount, parse_amount_field};
pub use dates::{extract_dates, parse_dmy, InvoiceDates};
pub use patterns::*;
