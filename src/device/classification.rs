//! Device classification against the signature catalog. Categories are tried
//! in catalog order and the first match wins, so a device is reported under
//! exactly one category even when several of its strings are suspicious.

use serde::Serialize;

use super::detection::contains_pattern;
use super::patterns::{
    CATEGORY_DMA, CATEGORY_FUZER, CATEGORY_KMBOX, DMA_PATTERNS, FUZER_PATTERNS, KMBOX_PATTERNS,
    REASON_DMA, REASON_FUZER, REASON_KMBOX,
};
use super::record::DeviceRecord;

/// A named group of signature patterns sharing one detection reason.
#[derive(Debug, Clone)]
pub struct SignatureCategory {
    pub name: String,
    pub reason: String,
    pub patterns: Vec<String>,
}

impl SignatureCategory {
    pub fn new(name: &str, reason: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Ordered, read-only set of signature categories.
///
/// Order is the tie-break: specific named device categories come before the
/// generic bus/class category, otherwise a KMBox on a PCIe adapter would be
/// reported under the generic reason.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<SignatureCategory>,
}

impl Catalog {
    pub fn new(categories: Vec<SignatureCategory>) -> Self {
        Self { categories }
    }

    /// The built-in catalog: KMBox, then Fuzer, then generic DMA/PCI.
    pub fn builtin() -> Self {
        Self::new(vec![
            SignatureCategory::new(CATEGORY_KMBOX, REASON_KMBOX, KMBOX_PATTERNS),
            SignatureCategory::new(CATEGORY_FUZER, REASON_FUZER, FUZER_PATTERNS),
            SignatureCategory::new(CATEGORY_DMA, REASON_DMA, DMA_PATTERNS),
        ])
    }

    /// Categories in priority order.
    pub fn categories(&self) -> &[SignatureCategory] {
        &self.categories
    }
}

lazy_static::lazy_static! {
    /// Process-wide default catalog, built once at startup.
    pub static ref DEFAULT_CATALOG: Catalog = Catalog::builtin();
}

/// Verdict for one suspicious device.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub device: DeviceRecord,
    pub category: String,
    pub reason: String,
}

/// Evaluate one device against the catalog.
///
/// A record whose hardware IDs and description are both empty can never
/// match and is silently dropped; that is expected for bus nodes that
/// report nothing useful, not an error.
pub fn classify(device: DeviceRecord, catalog: &Catalog) -> Option<ClassificationResult> {
    let joined_ids = device.joined_ids();

    for category in catalog.categories() {
        if contains_pattern(&joined_ids, &category.patterns)
            || contains_pattern(&device.description, &category.patterns)
        {
            return Some(ClassificationResult {
                category: category.name.clone(),
                reason: category.reason.clone(),
                device,
            });
        }
    }

    None
}
