//! Normalization from decoded catalog entries to [`CatalogRecord`].
//!
//! The page decoder hands over one [`RawCatalogEntry`] per
//! product-type × finish × size × part-number combination found on a catalog
//! page. Normalization trims and upper-cases every field and splits the
//! combined grade and finish strings into their typed parts. Identifier gaps
//! are left for [`crate::identifiers`] to repair.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DESIGN_ID_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4,6})").expect("valid regex"));

/// One product variant as extracted from catalog page markup, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCatalogEntry {
    /// Grade and product type joined by a space, e.g. `"HGS STANDARD"`.
    pub grade: String,
    /// Finish code and name joined by a space, e.g. `"60 MATTE FINISH"`.
    pub finish: String,
    /// Free-text sheet size, e.g. `"48 X 96"` or `"48x96"`.
    pub size_description: String,
    pub vend_part_number: String,
    /// Design id printed in the product heading. Informational only; the
    /// record's `DesignID` comes from the part number.
    pub design_id_hint: String,
    pub design_name: String,
}

/// A normalized catalog row for one warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "DesignID")]
    pub design_id: String,
    #[serde(rename = "DesignName")]
    pub design_name: String,
    #[serde(rename = "VendPartNumber")]
    pub vend_part_number: String,
    #[serde(rename = "Grade")]
    pub grade: String,
    #[serde(rename = "ProductType")]
    pub product_type: String,
    #[serde(rename = "FinishID")]
    pub finish_id: String,
    #[serde(rename = "Finish")]
    pub finish: String,
    #[serde(rename = "SizeDescription")]
    pub size_description: String,
}

fn clean(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Leading run of 4–6 digits in a vendor part number, or empty.
#[must_use]
pub fn design_id_from_prefix(vend_part_number: &str) -> String {
    DESIGN_ID_PREFIX
        .captures(vend_part_number)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}

/// Splits `"HGS STANDARD"` into `("HGS", "STANDARD")`.
///
/// Splits on single spaces: the grade is token 0 and the product type is
/// token 1 only. A grade with no second token yields an empty product type.
#[must_use]
pub fn split_grade(grade: &str) -> (String, String) {
    let mut tokens = grade.split(' ');
    let grade = tokens.next().unwrap_or_default().to_owned();
    let product_type = tokens.next().unwrap_or_default().to_owned();
    (grade, product_type)
}

/// Splits `"60 MATTE FINISH"` into `("60", "MATTE FINISH")`.
#[must_use]
pub fn split_finish(finish: &str) -> (String, String) {
    let mut tokens = finish.split(' ');
    let finish_id = tokens.next().unwrap_or_default().to_owned();
    let name = tokens.collect::<Vec<_>>().join(" ");
    (finish_id, name)
}

/// Normalizes one decoded catalog entry.
#[must_use]
pub fn normalize_entry(raw: &RawCatalogEntry) -> CatalogRecord {
    let vend_part_number = clean(&raw.vend_part_number);
    let (grade, product_type) = split_grade(&clean(&raw.grade));
    let (finish_id, finish) = split_finish(&clean(&raw.finish));
    let design_id = design_id_from_prefix(&vend_part_number);

    if design_id.is_empty() && !raw.design_id_hint.trim().is_empty() {
        tracing::trace!(
            part_number = %vend_part_number,
            hint = %raw.design_id_hint.trim(),
            "part number has no numeric design prefix; leaving DesignID for backfill"
        );
    }

    CatalogRecord {
        design_id,
        design_name: clean(&raw.design_name),
        vend_part_number,
        grade,
        product_type,
        finish_id,
        finish,
        size_description: clean(&raw.size_description),
    }
}

/// Lazily normalizes a page scan's worth of entries.
pub fn normalize_entries<'a, I>(entries: I) -> impl Iterator<Item = CatalogRecord> + 'a
where
    I: IntoIterator<Item = &'a RawCatalogEntry>,
    I::IntoIter: 'a,
{
    entries.into_iter().map(normalize_entry)
}
