//! Serde types for the product-prototype JSON embedded in catalog pages.
//!
//! Each add-to-cart form carries a script assigning an array of these to
//! `$scope.prototypes`. Nesting is product type → finishes → sizes → part
//! numbers. Any level may be missing or `null` on real pages.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductPrototype {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub finishes: Option<Vec<FinishPrototype>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinishPrototype {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sizes: Option<Vec<SizePrototype>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizePrototype {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "partnumber")]
    pub part_numbers: Option<Vec<PartNumberPrototype>>,
}

/// A vendor part number. The vendor emits these as strings, bare numbers,
/// or `null` depending on the product.
#[derive(Debug, Clone, Deserialize)]
pub struct PartNumberPrototype {
    #[serde(default)]
    pub name: serde_json::Value,
}

impl PartNumberPrototype {
    /// The part number as text; `null` or a missing name yields `""`.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.name {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
