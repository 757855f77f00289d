//! Catalog page decoding.
//!
//! Every add-to-cart form on a catalog page holds a `div.rec_heading` (design
//! id hint on the first line, design name on the second) and a `<script>`
//! that assigns the product-prototype array to `$scope.prototypes`. One
//! [`RawCatalogEntry`] is produced per part number in that array.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use stockcmp_core::RawCatalogEntry;

use crate::types::ProductPrototype;

static FORM: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"form[data-role="tocart-form"]"#).expect("valid form selector")
});
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.rec_heading").expect("valid heading selector"));
static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid script selector"));
static PROTOTYPES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\$scope\.prototypes\s*=\s*(\[.*?\]);").expect("valid prototypes regex")
});

/// Decodes one catalog page into raw entries, in document order.
///
/// Forms without a prototype assignment, or whose JSON fails to parse, are
/// skipped with a warning. A page with no forms yields an empty vector.
#[must_use]
pub fn decode_catalog_page(html: &str) -> Vec<RawCatalogEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for form in document.select(&FORM) {
        let (design_id_hint, design_name) = heading_lines(form);
        match form_prototypes(form) {
            Some(prototypes) => {
                flatten(&prototypes, &design_id_hint, &design_name, &mut entries);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(
            skipped,
            entries = entries.len(),
            "catalog page had forms without prototypes"
        );
    }
    entries
}

/// First two non-blank text lines of the form's heading, trimmed.
fn heading_lines(form: ElementRef<'_>) -> (String, String) {
    let Some(heading) = form.select(&HEADING).next() else {
        return (String::new(), String::new());
    };
    let text = heading.text().collect::<Vec<_>>().join("\n");
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let hint = lines.next().unwrap_or_default().to_owned();
    let name = lines.next().unwrap_or_default().to_owned();
    (hint, name)
}

fn form_prototypes(form: ElementRef<'_>) -> Option<Vec<ProductPrototype>> {
    for script in form.select(&SCRIPT) {
        let source = script.text().collect::<String>();
        let Some(captures) = PROTOTYPES.captures(&source) else {
            continue;
        };
        let json = captures.get(1).map_or("", |m| m.as_str());
        match serde_json::from_str::<Vec<ProductPrototype>>(json) {
            Ok(prototypes) => return Some(prototypes),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse embedded product prototypes");
                return None;
            }
        }
    }
    None
}

fn flatten(
    prototypes: &[ProductPrototype],
    design_id_hint: &str,
    design_name: &str,
    out: &mut Vec<RawCatalogEntry>,
) {
    for product in prototypes {
        let grade = product.name.clone().unwrap_or_default();
        for finish in product.finishes.iter().flatten() {
            let finish_name = finish.name.clone().unwrap_or_default();
            for size in finish.sizes.iter().flatten() {
                let size_name = size.name.clone().unwrap_or_default();
                for part in size.part_numbers.iter().flatten() {
                    out.push(RawCatalogEntry {
                        grade: grade.clone(),
                        finish: finish_name.clone(),
                        size_description: size_name.clone(),
                        vend_part_number: part.text(),
                        design_id_hint: design_id_hint.to_owned(),
                        design_name: design_name.to_owned(),
                    });
                }
            }
        }
    }
}
