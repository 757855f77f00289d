//! Canonical product key shared by both warehouses.

use serde::{Deserialize, Serialize};

/// Builds `DesignID-Grade-FinishIDSize`, e.g. `"1573-HGS-60C1"`.
///
/// A missing size leaves the suffix empty (`"1573-HGS-60"`), which is still a
/// usable key but no longer identifies the sheet size.
#[must_use]
pub fn part_number(design_id: &str, grade: &str, finish_id: &str, size: Option<&str>) -> String {
    format!("{design_id}-{grade}-{finish_id}{}", size.unwrap_or_default())
}

/// Five-field composite key the warehouse comparison joins on.
///
/// `part_number` alone is not enough: it is derived, and rows that differ in
/// design, finish, or grade can render to the same string once the size is
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MergeKey {
    #[serde(rename = "VendPartNumber")]
    pub vend_part_number: String,
    #[serde(rename = "PartNumber")]
    pub part_number: String,
    #[serde(rename = "DesignID")]
    pub design_id: String,
    #[serde(rename = "FinishID")]
    pub finish_id: String,
    #[serde(rename = "Grade")]
    pub grade: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_number_with_size() {
        assert_eq!(part_number("1573", "HGS", "60", Some("C1")), "1573-HGS-60C1");
    }

    #[test]
    fn part_number_without_size_has_empty_suffix() {
        assert_eq!(part_number("1573", "HGS", "60", None), "1573-HGS-60");
    }

    #[test]
    fn merge_key_orders_by_vendor_part_first() {
        let a = MergeKey {
            vend_part_number: "A".to_owned(),
            part_number: "Z".to_owned(),
            design_id: String::new(),
            finish_id: String::new(),
            grade: String::new(),
        };
        let b = MergeKey {
            vend_part_number: "B".to_owned(),
            part_number: "A".to_owned(),
            ..a.clone()
        };
        assert!(a < b);
    }
}
