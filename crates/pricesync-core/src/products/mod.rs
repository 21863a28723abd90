//! Product name handling: normalization, packaging detection and mapping.

pub mod classify;
pub mod mapping;
pub mod normalize;

pub use classify::{is_packaging, PACKAGING_KEYWORDS};
pub use mapping::{map_to_canonical, ProductMapper, PRODUCT_MAPPING};
pub use normalize::{extract_base_name, normalize_for_matching, STOP_WORDS};
