//! Matching invoice items to price list rows.

mod matcher;
pub mod scorer;

pub use matcher::{find_matches, Matcher};
pub use scorer::score;
