//! Pairing invoice line items with price list rows.

use tracing::{debug, info};

use crate::models::catalog::CatalogRow;
use crate::models::config::MatchingConfig;
use crate::models::invoice::LineItem;
use crate::models::matching::{CatalogMatch, MatchResult, MatchSet, PriceChange};
use crate::products::normalize_for_matching;

use super::scorer::score;

/// Best-candidate matcher with a strict score threshold.
#[derive(Debug, Clone)]
pub struct Matcher {
    threshold: f64,
}

impl Matcher {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            threshold: config.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a candidate scoring `candidate` replaces the current best.
    ///
    /// Both comparisons are strict: a score equal to the threshold never
    /// matches, and a later tie never displaces the earlier row.
    pub fn replaces(&self, candidate: f64, best: f64) -> bool {
        candidate > best && candidate > self.threshold
    }

    /// Match every chemical item against the catalog.
    ///
    /// Packaging items are skipped and appear in neither output list.
    pub fn find_matches<'a, I>(&self, items: I, catalog: &[CatalogRow]) -> MatchSet
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let catalog_bases: Vec<String> = catalog
            .iter()
            .map(|row| normalize_for_matching(&row.name))
            .collect();

        let mut result = MatchSet::default();

        for item in items.into_iter().filter(|item| item.is_chemical()) {
            let invoice_base = normalize_for_matching(&item.canonical_name);

            let mut best: Option<(usize, f64)> = None;
            for (idx, catalog_base) in catalog_bases.iter().enumerate() {
                let candidate = score(&invoice_base, catalog_base);
                let best_score = best.map_or(0.0, |(_, s)| s);
                if self.replaces(candidate, best_score) {
                    best = Some((idx, candidate));
                }
            }

            match best {
                Some((idx, best_score)) => {
                    let row = &catalog[idx];
                    debug!(
                        "Matched {:?} to {:?} (score {:.1})",
                        item.canonical_name, row.name, best_score
                    );
                    result.matches.push(MatchResult {
                        item: item.clone(),
                        catalog: CatalogMatch {
                            row_index: row.index,
                            catalog_name: row.name.clone(),
                            catalog_base: catalog_bases[idx].clone(),
                            invoice_base,
                        },
                        score: best_score,
                        price_change: PriceChange::new(row.base_price, item.unit_price),
                    });
                }
                None => {
                    debug!("No match for {:?}", item.canonical_name);
                    result.unmatched.push(item.clone());
                }
            }
        }

        info!(
            "Matched {} of {} chemical items",
            result.matches.len(),
            result.considered()
        );

        result
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

/// Match items against the catalog with the default threshold.
pub fn find_matches<'a, I>(items: I, catalog: &[CatalogRow]) -> MatchSet
where
    I: IntoIterator<Item = &'a LineItem>,
{
    Matcher::default().find_matches(items, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::tests::item;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn row(index: usize, name: &str, price: i64) -> CatalogRow {
        CatalogRow {
            index,
            name: name.to_string(),
            base_price: Decimal::from(price),
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let matcher = Matcher::default();
        assert!(!matcher.replaces(75.0, 0.0));
        assert!(matcher.replaces(75.0001, 0.0));
        assert!(!matcher.replaces(95.0, 95.0));
    }

    #[test]
    fn test_score_of_exactly_75_is_unmatched() {
        let items = [item(1, "AAA BBB CCC DDD EEE FFF", 100, false)];
        let catalog = [row(0, "AAA BBB CCC DDD EEE ZZZ", 90)];

        let set = find_matches(&items, &catalog);

        assert!(set.matches.is_empty());
        assert_eq!(set.unmatched.len(), 1);
    }

    #[test]
    fn test_price_difference() {
        let items = [item(1, "ACIDO ACETICO X 20 KG", 12000, false)];
        let catalog = [row(0, "ACIDO ACETICO TECNICO", 10000)];

        let set = find_matches(&items, &catalog);

        assert_eq!(set.matches.len(), 1);
        let m = &set.matches[0];
        assert_eq!(m.score, 100.0);
        assert_eq!(m.catalog.invoice_base, "ACIDO ACETICO");
        assert_eq!(m.catalog.catalog_base, "ACIDO ACETICO");
        assert_eq!(m.price_change.old_price, Decimal::from(10000));
        assert_eq!(m.price_change.new_price, Decimal::from(12000));
        assert_eq!(m.price_change.difference, Decimal::from(2000));
    }

    #[test]
    fn test_no_shared_tokens_goes_unmatched() {
        let items = [item(1, "VARSOL", 3000, false)];
        let catalog = [row(0, "GLICERINA", 9000), row(1, "FORMOL", 2500)];

        let set = find_matches(&items, &catalog);

        assert!(set.matches.is_empty());
        assert_eq!(set.unmatched[0].canonical_name, "VARSOL");
    }

    #[test]
    fn test_every_chemical_item_lands_in_exactly_one_list() {
        let items = [
            item(1, "SODA CAUSTICA", 4800, false),
            item(2, "TAMBOR PLASTICO", 35000, true),
            item(3, "PEROXIDO", 7000, false),
            item(4, "FORMOL", 2600, false),
        ];
        let catalog = [row(0, "FORMOL", 2500), row(1, "SODA CAUSTICA", 4500)];

        let set = find_matches(&items, &catalog);

        let matched: Vec<&str> = set.matches.iter().map(|m| m.item.position.as_str()).collect();
        let unmatched: Vec<&str> = set.unmatched.iter().map(|i| i.position.as_str()).collect();
        assert_eq!(matched, vec!["1", "4"]);
        assert_eq!(unmatched, vec!["3"]);
        assert_eq!(set.considered(), 3);
        assert_eq!(set.total_difference(), Decimal::from(400));
    }

    #[test]
    fn test_first_row_wins_ties() {
        let items = [item(1, "GLICERINA", 9000, false)];
        let catalog = [
            row(0, "GLICERINA USP", 8000),
            row(1, "GLICERINA", 8500),
            row(2, "GLICERINA", 8700),
        ];

        let set = find_matches(&items, &catalog);

        // all three normalize to GLICERINA; the first one seen keeps the spot
        assert_eq!(set.matches[0].catalog.row_index, 0);
        assert_eq!(set.matches[0].catalog.catalog_name, "GLICERINA USP");
    }

    #[test]
    fn test_higher_score_replaces_earlier_row() {
        let items = [item(1, "SODA CAUSTICA", 4800, false)];
        let catalog = [row(0, "SODA CAUSTICA ESCAMAS", 4000), row(1, "SODA CAUSTICA", 4500)];

        let set = find_matches(&items, &catalog);

        assert_eq!(set.matches[0].catalog.row_index, 1);
        assert_eq!(set.matches[0].score, 100.0);
    }

    #[test]
    fn test_configurable_threshold() {
        let items = [item(1, "ALCOHOL ETILICO", 6000, false)];
        let catalog = [row(0, "ALCOHOL ETANOL", 5500)];

        assert!(find_matches(&items, &catalog).matches.is_empty());

        let lenient = Matcher::new(&MatchingConfig { threshold: 40.0 });
        assert_eq!(lenient.find_matches(&items, &catalog).matches[0].score, 45.0);
    }
}
