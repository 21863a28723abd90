//! Mapping from supplier product descriptions to price list names.

use lazy_static::lazy_static;
use tracing::trace;

/// Known supplier descriptions and the price list name each maps to.
///
/// Order matters: the substring fallback returns the first entry that
/// qualifies, so more specific keys must not be shadowed by earlier ones.
pub const PRODUCT_MAPPING: [(&str, &str); 39] = [
    ("ACIDO ACETICO", "ACIDO ACETICO TECNICO"),
    ("ACIDO NITRICO", "ACIDO NITRICO"),
    ("ACIDO SULFONICO", "ACIDO SULFONICO"),
    ("ACIDO OXALICO", "ACIDO OXALICO"),
    ("ACIDO CITRICO", "ACIDO CITRICO"),
    ("ALCOHOL CETILICO", "CETOL C 16 - ALCOHOL CETILICO"),
    ("CETOL C 16", "CETOL C 16 - ALCOHOL CETILICO"),
    ("ALCOHOL ETILICO", "ALCOHOL ETANOL IND."),
    ("ALCOHOL DESODORIZADO", "ALCOHOL ETANOL IND."),
    ("ALCOHOL PROPANOL", "ALCOHOL PROPANOL"),
    ("VARSOL", "VARSOL"),
    ("BETAINA", "BETAINA"),
    ("COCOAMIDA", "COCOAMIDA"),
    ("DODIGEN", "DODIGEN"),
    ("GENAPOL", "LESS AL 70% - LAURIL ÉTER SULFATO DE SODIO"),
    ("LESS AL 70%", "LESS AL 70% - LAURIL ÉTER SULFATO DE SODIO"),
    ("NONIL", "TERGICOL - NONIL"),
    ("BUTIL GLICOL", "MONOBUTIL ETER - BUTIL GLICOL"),
    ("FORMOL", "FORMOL"),
    ("GLICERINA", "GLICERINA"),
    ("BICARBONATO DE SODIO", "BICARBONATO DE SODIO USP"),
    ("BICARBONATO DE SODIO USP", "BICARBONATO DE SODIO USP"),
    ("BISULFITO DE SODIO", "BISULFITO EN POLVO"),
    ("SODA", "SODA CAUSTICA"),
    ("SODA CAUSTICA", "SODA CAUSTICA"),
    ("TPF", "TRIPOLIFOSFATO"),
    ("TRIPOLIFOSFATO", "TRIPOLIFOSFATO"),
    ("SILICONA EMULSION", "SILICONA EMULSION"),
    ("CREOLINA", "CREOLINA CONCENTRADA"),
    ("HIPOCLORITO DE SODIO", "HIPOCLORITO DE SODIO AL 13%"),
    ("HIPOCLORITO DE SODIO AL 13%", "HIPOCLORITO DE SODIO AL 13%"),
    ("HIPOCLORITO DE SODIO AL 15%", "HIPOCLORITO DE SODIO AL 13%"),
    ("PROCIDE", "PROCIDE 1.5"),
    ("PROCIDE 1.5", "PROCIDE 1.5"),
    ("RINSOL", "RINSOL"),
    ("SUAVIZANTE", "SENSASOFT - SUAVIZANTE ENCAPSULADO BRISA FRESCA"),
    ("SENSASOFT", "SENSASOFT - SUAVIZANTE ENCAPSULADO BRISA FRESCA"),
    ("SENSACLEAN", "SENSACLEAN - DETERGENTE LIQUIDO"),
    ("SENSABLEACH", "SENSABLEACH - BLANQUEADOR OXIGENADO"),
];

lazy_static! {
    static ref DEFAULT_MAPPER: ProductMapper = ProductMapper::default();
}

/// Ordered synonym table resolving descriptions to canonical names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMapper {
    entries: Vec<(String, String)>,
}

impl ProductMapper {
    /// Build a mapper from an ordered list of `(key, canonical)` pairs.
    ///
    /// Keys are stored uppercased and trimmed.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().trim().to_uppercase(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a description to its canonical price list name.
    ///
    /// An exact key wins. Otherwise the first key that contains the input, or
    /// is contained in it, wins. Unknown names come back unchanged.
    pub fn map_to_canonical(&self, name: &str) -> String {
        let normalized = name.trim().to_uppercase();
        if normalized.is_empty() {
            return name.to_string();
        }

        if let Some((_, canonical)) = self.entries.iter().find(|(key, _)| *key == normalized) {
            return canonical.clone();
        }

        for (key, canonical) in &self.entries {
            if normalized.contains(key.as_str()) || key.contains(normalized.as_str()) {
                trace!("Mapped {:?} to {:?} via key {:?}", name, canonical, key);
                return canonical.clone();
            }
        }

        name.to_string()
    }
}

impl Default for ProductMapper {
    fn default() -> Self {
        Self::new(PRODUCT_MAPPING)
    }
}

/// Resolve a description with the built-in table.
pub fn map_to_canonical(name: &str) -> String {
    DEFAULT_MAPPER.map_to_canonical(name)
}
