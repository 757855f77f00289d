//! Identifier repair for one warehouse's catalog records.
//!
//! Each heuristic is a standalone function that degrades to an empty string
//! instead of failing. [`reconcile_identifiers`] backfills, strips the
//! duplicated finish suffix, then drops exact duplicates.
//!
//! Known limitation: [`strip_finish_suffix`] cannot tell a genuine six-digit
//! design id whose last two digits equal the finish code apart from the
//! vendor encoding artifact it corrects. Both are stripped.

use std::collections::HashSet;

use crate::catalog::CatalogRecord;

/// Finish id encoded after the `K` in a vendor part number.
///
/// `"1573K6012"` → `"60"`. Returns empty when there is no `K`, and fewer than
/// two characters when the part number ends early.
#[must_use]
pub fn finish_id_from_part_number(vend_part_number: &str) -> String {
    vend_part_number
        .split('K')
        .nth(1)
        .map(|after| after.chars().take(2).collect())
        .unwrap_or_default()
}

/// First four characters of the vendor part number.
#[must_use]
pub fn design_id_from_part_number(vend_part_number: &str) -> String {
    vend_part_number.chars().take(4).collect()
}

/// Removes a finish code erroneously appended to a six-character design id.
///
/// Returns the corrected id when `design_id` is exactly six characters and
/// ends with `finish_id` zero-padded to width 2, otherwise `None`.
#[must_use]
pub fn strip_finish_suffix(design_id: &str, finish_id: &str) -> Option<String> {
    let chars: Vec<char> = design_id.chars().collect();
    if chars.len() != 6 {
        return None;
    }
    let padded = format!("{finish_id:0>2}");
    let suffix: String = chars[4..].iter().collect();
    (suffix == padded).then(|| chars[..4].iter().collect())
}

/// Fills an empty `FinishID` and `DesignID` from the part number.
pub fn backfill_identifiers(record: &mut CatalogRecord) {
    if record.finish_id.is_empty() {
        record.finish_id = finish_id_from_part_number(&record.vend_part_number);
    }
    if record.design_id.is_empty() {
        record.design_id = design_id_from_part_number(&record.vend_part_number);
    }
}

/// Repairs and de-duplicates a warehouse's catalog records.
///
/// Exact duplicates keep their first occurrence; order is otherwise
/// preserved. Running this on its own output changes nothing.
#[must_use]
pub fn reconcile_identifiers(records: Vec<CatalogRecord>) -> Vec<CatalogRecord> {
    let total = records.len();
    let mut seen: HashSet<CatalogRecord> = HashSet::with_capacity(total);
    let mut out = Vec::with_capacity(total);
    let mut stripped = 0usize;

    for mut record in records {
        backfill_identifiers(&mut record);
        if let Some(fixed) = strip_finish_suffix(&record.design_id, &record.finish_id) {
            record.design_id = fixed;
            stripped += 1;
        }
        // Compared after repair, so a stripped row that now equals an earlier
        // one is dropped too.
        if seen.insert(record.clone()) {
            out.push(record);
        }
    }

    tracing::debug!(
        input = total,
        kept = out.len(),
        duplicates = total - out.len(),
        stripped,
        "reconciled catalog identifiers"
    );
    out
}
