//! Packaging detection for invoice lines.

/// Keywords marking a container rather than chemical content.
pub const PACKAGING_KEYWORDS: [&str; 11] = [
    "TAMBOR",
    "TANQUE",
    "BIDÓN",
    "BALDE",
    "CANECA",
    "ENVASE",
    "RECIPIENTE",
    "GALÓN",
    "PIMPINA",
    "IBC",
    "CONTENEDOR",
];

/// True if the name contains a packaging keyword anywhere.
///
/// Plain substring containment: "IBC" also hits inside longer words.
pub fn is_packaging(name: &str) -> bool {
    let upper = name.to_uppercase();
    PACKAGING_KEYWORDS
        .iter()
        .any(|keyword| upper.contains(keyword))
}
