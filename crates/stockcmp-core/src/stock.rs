//! Live stock status: wire parsing and the catalog join.
//!
//! ## Wire format
//! The stock-status endpoint answers with a single line of UTF-8 text, fields
//! separated by `~`:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | 0 | current availability (numeric string) |
//! | 1 | quantity on order |
//! | 2 | quantity on backorder |
//! | 3 | optional: comma-separated arrival dates, or the literal `None` |
//!
//! Arrival dates are kept positionally; an entry that does not parse as a
//! date becomes `None` in its slot. The number of slots varies per part.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogRecord;
use crate::error::CoreError;
use crate::key::{part_number, MergeKey};
use crate::size::{canonicalize_size_description, size_code};

// `%y` precedes `%Y` so `05/01/24` is 2024, not year 24.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%y", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Live availability for one part at one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStatusRecord {
    #[serde(rename = "VendPartNumber")]
    pub vend_part_number: String,
    /// `None` when the endpoint sent something non-numeric.
    #[serde(rename = "CurrentAvailability")]
    pub current_availability: Option<f64>,
    #[serde(rename = "OnOrder")]
    pub on_order: Option<f64>,
    #[serde(rename = "Backorder")]
    pub backorder: Option<f64>,
    #[serde(rename = "ArrivalDates")]
    pub arrival_dates: Vec<Option<NaiveDate>>,
}

/// Parses a quantity field. Non-numeric and non-finite values are `None`.
#[must_use]
pub fn parse_quantity(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses one arrival date, with or without a time of day after a space or `T`.
///
/// The time, when present, must be well formed but is otherwise discarded.
/// A format that yields a year below 1000 read a two-digit field as the year
/// and is skipped.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let (date_part, time_part) = match value.find([' ', 'T']) {
        Some(at) => (&value[..at], Some(value[at + 1..].trim())),
        None => (value, None),
    };
    if let Some(time) = time_part {
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())?;
    }
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(date_part, fmt)
            .ok()
            .filter(|d| d.year() >= 1000)
    })
}

/// Splits the arrival-date field on commas, one slot per entry.
///
/// `"None"` and the empty string each produce a single `None` slot.
#[must_use]
pub fn parse_arrival_dates(field: &str) -> Vec<Option<NaiveDate>> {
    field.split(',').map(parse_date).collect()
}

/// Parses one stock-status response body.
///
/// # Errors
///
/// Returns [`CoreError::MalformedStockStatus`] when the body has fewer than
/// three `~`-separated fields.
pub fn parse_stock_status(part_number: &str, body: &str) -> Result<StockStatusRecord, CoreError> {
    let fields: Vec<&str> = body.trim().split('~').collect();
    if fields.len() < 3 {
        return Err(CoreError::MalformedStockStatus {
            part_number: part_number.to_owned(),
            fields: fields.len(),
        });
    }

    Ok(StockStatusRecord {
        vend_part_number: part_number.to_owned(),
        current_availability: parse_quantity(fields[0]),
        on_order: parse_quantity(fields[1]),
        backorder: parse_quantity(fields[2]),
        arrival_dates: parse_arrival_dates(fields.get(3).copied().unwrap_or("None")),
    })
}

/// A catalog row with its stock status and derived keys attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    #[serde(flatten)]
    pub catalog: CatalogRecord,
    #[serde(rename = "Size")]
    pub size: Option<String>,
    #[serde(rename = "PartNumber")]
    pub part_number: String,
    #[serde(rename = "CurrentAvailability")]
    pub current_availability: Option<f64>,
    #[serde(rename = "OnOrder")]
    pub on_order: Option<f64>,
    #[serde(rename = "Backorder")]
    pub backorder: Option<f64>,
    #[serde(rename = "ArrivalDates")]
    pub arrival_dates: Vec<Option<NaiveDate>>,
}

impl ReconciledRecord {
    /// Derives size code and part number for `catalog` and attaches `stock`.
    ///
    /// The record's `SizeDescription` is replaced by its canonical form.
    #[must_use]
    pub fn build(mut catalog: CatalogRecord, stock: Option<&StockStatusRecord>) -> Self {
        catalog.size_description = canonicalize_size_description(&catalog.size_description);
        let size = size_code(&catalog.size_description).map(str::to_owned);
        let part_number = part_number(
            &catalog.design_id,
            &catalog.grade,
            &catalog.finish_id,
            size.as_deref(),
        );

        Self {
            catalog,
            size,
            part_number,
            current_availability: stock.and_then(|s| s.current_availability),
            on_order: stock.and_then(|s| s.on_order),
            backorder: stock.and_then(|s| s.backorder),
            arrival_dates: stock.map(|s| s.arrival_dates.clone()).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn merge_key(&self) -> MergeKey {
        MergeKey {
            vend_part_number: self.catalog.vend_part_number.clone(),
            part_number: self.part_number.clone(),
            design_id: self.catalog.design_id.clone(),
            finish_id: self.catalog.finish_id.clone(),
            grade: self.catalog.grade.clone(),
        }
    }

    /// Numeric availability with missing treated as zero.
    #[must_use]
    pub fn availability(&self) -> f64 {
        self.current_availability.unwrap_or(0.0)
    }
}

/// Left-joins stock statuses onto catalog records by vendor part number.
///
/// Every catalog record survives; one with no stock response carries empty
/// availability fields. If a part number was answered twice, the first
/// answer wins.
#[must_use]
pub fn join_stock(
    catalog: Vec<CatalogRecord>,
    stock: &[StockStatusRecord],
) -> Vec<ReconciledRecord> {
    let mut by_part: HashMap<&str, &StockStatusRecord> = HashMap::with_capacity(stock.len());
    for status in stock {
        by_part
            .entry(status.vend_part_number.as_str())
            .or_insert(status);
    }

    let total = catalog.len();
    let records: Vec<ReconciledRecord> = catalog
        .into_iter()
        .map(|record| {
            let status = by_part.get(record.vend_part_number.as_str()).copied();
            ReconciledRecord::build(record, status)
        })
        .collect();

    let matched = records
        .iter()
        .filter(|r| by_part.contains_key(r.catalog.vend_part_number.as_str()))
        .count();
    tracing::debug!(
        catalog_rows = total,
        stock_rows = stock.len(),
        matched,
        "joined stock status onto catalog"
    );
    records
}

#[cfg(test)]
#[path = "stock_test.rs"]
mod tests;
