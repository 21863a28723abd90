//! Product name normalization for price list comparison.
//!
//! Invoice descriptions and price list names differ mostly in presentation
//! size ("X 20 KG", "X 1/2 L", trailing "25 KG") and in filler words such as
//! TECNICO or USP. Both are stripped here, in that order: size tokens first,
//! then stop words, because a stop word can sit right next to a size token.

use lazy_static::lazy_static;
use regex::Regex;

/// Filler words removed before comparison.
pub const STOP_WORDS: [&str; 11] = [
    "TECNICO",
    "TEC",
    "IND",
    "INDUSTRIAL",
    "USP",
    "CONCENTRADA",
    "CONCENTRADO",
    "AL",
    "DE",
    "EN",
    "POLVO",
];

lazy_static! {
    // "X 20 KG", "X 3.5 GALONES"
    static ref SIZE_TIMES: Regex = Regex::new(
        r"(?i)\s*X\s*\d+(?:\.\d+)?\s*(?:KG|KILOGRAMO|KILOGRAMOS|G|GRAMO|GRAMOS|L|LITRO|LITROS|ML|MILILITRO|MILILITROS|GAL|GALÓN|GALONES)\b"
    ).unwrap();

    // "X 1/2 L"
    static ref SIZE_FRACTION: Regex = Regex::new(
        r"(?i)\s*X\s*\d+/\d+\s*(?:KG|KILOGRAMO|KILOGRAMOS|G|GRAMO|GRAMOS|L|LITRO|LITROS|ML|MILILITRO|MILILITROS)\b"
    ).unwrap();

    // "... 25 KG" at the end of the name
    static ref SIZE_TRAILING: Regex = Regex::new(
        r"(?i)\s*\d+(?:\.\d+)?\s*(?:KG|KILOGRAMO|KILOGRAMOS|G|GRAMO|GRAMOS|L|LITRO|LITROS|ML|MILILITRO|MILILITROS|GAL|GALÓN|GALONES)$"
    ).unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    static ref TRAILING_DASHES: Regex = Regex::new(r"[-\s]*$").unwrap();

    static ref STOP_WORD_PATTERNS: Vec<Regex> = STOP_WORDS
        .iter()
        .map(|word| Regex::new(&format!(r"(?i)\b{}\b", word)).unwrap())
        .collect();
}

/// Uppercase a name and strip its presentation size.
///
/// `"ACIDO ACETICO X 20 KG"` becomes `"ACIDO ACETICO"`.
pub fn extract_base_name(name: &str) -> String {
    let mut base = name.to_uppercase().trim().to_string();

    for pattern in [&*SIZE_TIMES, &*SIZE_FRACTION, &*SIZE_TRAILING] {
        base = pattern.replace_all(&base, "").into_owned();
    }

    let base = collapse_whitespace(&base);
    TRAILING_DASHES.replace(&base, "").into_owned()
}

/// Reduce a product name to the base used for similarity scoring.
pub fn normalize_for_matching(name: &str) -> String {
    let mut normalized = extract_base_name(name);

    for pattern in STOP_WORD_PATTERNS.iter() {
        normalized = pattern.replace_all(&normalized, "").into_owned();
    }

    collapse_whitespace(&normalized)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}
