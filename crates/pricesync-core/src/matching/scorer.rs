//! Similarity scoring between normalized product names.

/// Score for identical bases.
pub const EXACT_SCORE: f64 = 100.0;

/// Score when one base contains the other.
pub const CONTAINMENT_SCORE: f64 = 95.0;

/// Ceiling for token-overlap scores.
pub const TOKEN_SCORE_CEILING: f64 = 90.0;

/// Tokens this short or shorter are ignored in the overlap ratio.
const MIN_TOKEN_CHARS: usize = 3;

/// Score two comparison bases (see [`crate::products::normalize_for_matching`]).
///
/// Returns a value in `0..=100`. An empty base scores 0 against anything,
/// even another empty base or one that trivially contains it. This departs
/// from the plain equal/containment rule on purpose: a blank price list row
/// must never win a match.
pub fn score(invoice_base: &str, catalog_base: &str) -> f64 {
    if invoice_base.is_empty() || catalog_base.is_empty() {
        return 0.0;
    }

    if invoice_base == catalog_base {
        EXACT_SCORE
    } else if catalog_base.contains(invoice_base) || invoice_base.contains(catalog_base) {
        CONTAINMENT_SCORE
    } else {
        token_overlap_score(invoice_base, catalog_base)
    }
}

/// Share of catalog tokens related to some invoice token, scaled to 90.
///
/// Two tokens are related when either contains the other. Each catalog token
/// counts at most once; the ratio is taken over the longer token list.
fn token_overlap_score(invoice_base: &str, catalog_base: &str) -> f64 {
    let catalog_tokens = significant_tokens(catalog_base);
    let invoice_tokens = significant_tokens(invoice_base);

    if catalog_tokens.is_empty() || invoice_tokens.is_empty() {
        return 0.0;
    }

    let common = catalog_tokens
        .iter()
        .filter(|c| {
            invoice_tokens
                .iter()
                .any(|i| c.contains(*i) || i.contains(**c))
        })
        .count();

    let longest = catalog_tokens.len().max(invoice_tokens.len());

    // multiply first so that ratios like 5/6 land exactly on 75
    common as f64 * TOKEN_SCORE_CEILING / longest as f64
}

fn significant_tokens(base: &str) -> Vec<&str> {
    base.split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}
