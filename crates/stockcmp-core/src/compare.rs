//! Two-warehouse comparison.
//!
//! Outer-joins the LA and Seattle [`ReconciledRecord`] sets on the
//! five-field [`MergeKey`], then derives presence, availability, and the
//! four-way [`AvailabilityStatus`] per row. Pure and in-memory; callers
//! must have both warehouse datasets fully materialized first.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;
use crate::identifiers::reconcile_identifiers;
use crate::key::MergeKey;
use crate::regions::Warehouse;
use crate::stock::{join_stock, ReconciledRecord, StockStatusRecord};

/// Which side(s) of the outer join a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    LeftOnly,
    RightOnly,
    Both,
}

impl Provenance {
    #[must_use]
    pub fn in_la(self) -> bool {
        matches!(self, Provenance::LeftOnly | Provenance::Both)
    }

    #[must_use]
    pub fn in_sa(self) -> bool {
        matches!(self, Provenance::RightOnly | Provenance::Both)
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::LeftOnly => write!(f, "left_only"),
            Provenance::RightOnly => write!(f, "right_only"),
            Provenance::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    #[serde(rename = "Available in Both")]
    AvailableInBoth,
    #[serde(rename = "LA Only")]
    LaOnly,
    #[serde(rename = "Seattle Only")]
    SeattleOnly,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl AvailabilityStatus {
    #[must_use]
    pub fn from_flags(available_la: bool, available_sa: bool) -> Self {
        match (available_la, available_sa) {
            (true, true) => AvailabilityStatus::AvailableInBoth,
            (true, false) => AvailabilityStatus::LaOnly,
            (false, true) => AvailabilityStatus::SeattleOnly,
            (false, false) => AvailabilityStatus::NotAvailable,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AvailabilityStatus::AvailableInBoth => "Available in Both",
            AvailabilityStatus::LaOnly => "LA Only",
            AvailabilityStatus::SeattleOnly => "Seattle Only",
            AvailabilityStatus::NotAvailable => "Not Available",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One warehouse's half of a comparison row. Empty when the key is absent there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseColumns {
    pub design_name: Option<String>,
    pub product_type: Option<String>,
    pub finish: Option<String>,
    pub size_description: Option<String>,
    pub size: Option<String>,
    /// Current availability, zero when absent or non-numeric.
    pub availability: f64,
    pub on_order: Option<f64>,
    pub backorder: Option<f64>,
    pub arrival_dates: Vec<Option<NaiveDate>>,
}

impl WarehouseColumns {
    fn from_record(record: &ReconciledRecord) -> Self {
        let c = &record.catalog;
        Self {
            design_name: Some(c.design_name.clone()),
            product_type: Some(c.product_type.clone()),
            finish: Some(c.finish.clone()),
            size_description: Some(c.size_description.clone()).filter(|s| !s.is_empty()),
            size: record.size.clone(),
            availability: record.availability(),
            on_order: record.on_order,
            backorder: record.backorder,
            arrival_dates: record.arrival_dates.clone(),
        }
    }

    /// In stock now, or at least one arrival is scheduled.
    #[must_use]
    pub fn has_supply(&self) -> bool {
        self.availability > 0.0 || self.arrival_dates.iter().any(Option::is_some)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub key: MergeKey,
    pub la: WarehouseColumns,
    pub sa: WarehouseColumns,
    /// Size code resolved across warehouses, LA first.
    pub size: Option<String>,
    pub size_description: Option<String>,
    pub provenance: Provenance,
    pub in_la: bool,
    pub in_sa: bool,
    pub available_la: bool,
    pub available_sa: bool,
    pub total_availability: f64,
    pub status: AvailabilityStatus,
}

impl ComparisonRow {
    fn new(key: MergeKey, la: Option<&ReconciledRecord>, sa: Option<&ReconciledRecord>) -> Self {
        let provenance = match (la, sa) {
            (Some(_), None) => Provenance::LeftOnly,
            (None, Some(_)) => Provenance::RightOnly,
            _ => Provenance::Both,
        };
        let mut la_cols = la.map(WarehouseColumns::from_record).unwrap_or_default();
        let mut sa_cols = sa.map(WarehouseColumns::from_record).unwrap_or_default();

        let size = la_cols.size.clone().or_else(|| sa_cols.size.clone());
        let size_description = la_cols
            .size_description
            .clone()
            .or_else(|| sa_cols.size_description.clone());
        la_cols.size.clone_from(&size);
        sa_cols.size.clone_from(&size);
        la_cols.size_description.clone_from(&size_description);
        sa_cols.size_description.clone_from(&size_description);

        let in_la = provenance.in_la();
        let in_sa = provenance.in_sa();
        let available_la = in_la && la_cols.has_supply();
        let available_sa = in_sa && sa_cols.has_supply();

        Self {
            key,
            total_availability: la_cols.availability + sa_cols.availability,
            la: la_cols,
            sa: sa_cols,
            size,
            size_description,
            provenance,
            in_la,
            in_sa,
            available_la,
            available_sa,
            status: AvailabilityStatus::from_flags(available_la, available_sa),
        }
    }

    #[must_use]
    pub fn side(&self, warehouse: Warehouse) -> &WarehouseColumns {
        match warehouse {
            Warehouse::La => &self.la,
            Warehouse::Seattle => &self.sa,
        }
    }
}

/// Every key seen in either warehouse, sorted by [`MergeKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
}

/// The subset of [`ComparisonTable`] available at both warehouses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BothAvailableTable {
    pub rows: Vec<ComparisonRow>,
}

impl From<&ComparisonTable> for BothAvailableTable {
    fn from(table: &ComparisonTable) -> Self {
        Self {
            rows: table
                .rows
                .iter()
                .filter(|r| r.available_la && r.available_sa)
                .cloned()
                .collect(),
        }
    }
}

fn index_by_key(records: &[ReconciledRecord]) -> BTreeMap<MergeKey, &ReconciledRecord> {
    let mut index = BTreeMap::new();
    let mut duplicates = 0usize;
    for record in records {
        match index.entry(record.merge_key()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(_) => duplicates += 1,
        }
    }
    if duplicates > 0 {
        tracing::debug!(duplicates, "collapsed rows sharing a merge key");
    }
    index
}

/// Outer-joins the two warehouses' records into a comparison table.
#[must_use]
pub fn compare_warehouses(la: &[ReconciledRecord], sa: &[ReconciledRecord]) -> ComparisonTable {
    type Sides<'a> = (Option<&'a ReconciledRecord>, Option<&'a ReconciledRecord>);

    let mut joined: BTreeMap<MergeKey, Sides<'_>> = BTreeMap::new();
    for (key, record) in index_by_key(la) {
        joined.entry(key).or_default().0 = Some(record);
    }
    for (key, record) in index_by_key(sa) {
        joined.entry(key).or_default().1 = Some(record);
    }

    let rows = joined
        .into_iter()
        .map(|(key, (la, sa))| ComparisonRow::new(key, la, sa))
        .collect();
    ComparisonTable { rows }
}

/// Runs the post-fetch pipeline for both warehouses.
///
/// Catalog records are reconciled (idempotent if already done), joined with
/// their warehouse's stock statuses, and compared. Row-level gaps surface as
/// empty fields; this never fails.
#[must_use]
pub fn reconcile(
    catalog_la: Vec<CatalogRecord>,
    catalog_sa: Vec<CatalogRecord>,
    stock_la: &[StockStatusRecord],
    stock_sa: &[StockStatusRecord],
) -> (ComparisonTable, BothAvailableTable) {
    let la = join_stock(reconcile_identifiers(catalog_la), stock_la);
    let sa = join_stock(reconcile_identifiers(catalog_sa), stock_sa);

    let comparison = compare_warehouses(&la, &sa);
    let both = BothAvailableTable::from(&comparison);

    tracing::info!(
        rows = comparison.rows.len(),
        both_available = both.rows.len(),
        "warehouse comparison complete"
    );
    (comparison, both)
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
