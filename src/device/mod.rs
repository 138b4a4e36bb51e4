mod classification;
mod detection;
mod patterns;
mod record;

// Re-exports to keep call sites on the module boundary (some are only used
// by the classifier itself or by tests)
#[allow(unused_imports)]
pub use classification::{
    Catalog, ClassificationResult, DEFAULT_CATALOG, SignatureCategory, classify,
};
#[allow(unused_imports)]
pub use detection::contains_pattern;
pub use record::DeviceRecord;
