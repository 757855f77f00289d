//! Flat, named-column rendering of comparison tables for spreadsheet export.
//!
//! The number of `Arrival Dates{n}_{LA,SA}` columns is the longest arrival
//! list seen on that side in the table, so it varies from run to run.

use chrono::NaiveDate;

use crate::compare::{BothAvailableTable, ComparisonRow, ComparisonTable, WarehouseColumns};
use crate::regions::Warehouse;

pub const ALL_PRODUCTS_SHEET: &str = "All Products";
pub const BOTH_AVAILABLE_SHEET: &str = "Both Available";

const KEY_COLUMNS: [&str; 5] = ["VendPartNumber", "PartNumber", "DesignID", "FinishID", "Grade"];
const SIDE_COLUMNS: [&str; 8] = [
    "DesignName",
    "ProductType",
    "Finish",
    "SizeDescription",
    "Size",
    "Availability",
    "OnOrder",
    "Backorder",
];

/// An ordered sheet of string cells with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn opt_text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn number(value: f64) -> String {
    value.to_string()
}

fn opt_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_default()
}

fn opt_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn flag(value: bool) -> String {
    value.to_string()
}

struct Layout {
    la_dates: usize,
    sa_dates: usize,
    include_provenance: bool,
}

impl Layout {
    fn for_rows(rows: &[ComparisonRow], include_provenance: bool) -> Self {
        let width = |w: Warehouse| {
            rows.iter()
                .map(|r| r.side(w).arrival_dates.len())
                .max()
                .unwrap_or(0)
        };
        Self {
            la_dates: width(Warehouse::La),
            sa_dates: width(Warehouse::Seattle),
            include_provenance,
        }
    }

    fn date_width(&self, warehouse: Warehouse) -> usize {
        match warehouse {
            Warehouse::La => self.la_dates,
            Warehouse::Seattle => self.sa_dates,
        }
    }

    fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = KEY_COLUMNS.iter().map(|c| (*c).to_owned()).collect();
        for warehouse in [Warehouse::La, Warehouse::Seattle] {
            let suffix = warehouse.suffix();
            headers.extend(SIDE_COLUMNS.iter().map(|c| format!("{c}_{suffix}")));
            headers.extend(
                (1..=self.date_width(warehouse)).map(|i| format!("Arrival Dates{i}_{suffix}")),
            );
        }
        headers.push("Size".to_owned());
        headers.push("SizeDescription".to_owned());
        if self.include_provenance {
            headers.push("_merge".to_owned());
        }
        headers.extend(
            [
                "In_LA",
                "In_SA",
                "Available_LA",
                "Available_SA",
                "Total_Availability",
                "Availability_Status",
            ]
            .iter()
            .map(|c| (*c).to_owned()),
        );
        headers
    }

    fn side_cells(&self, cells: &mut Vec<String>, side: &WarehouseColumns, warehouse: Warehouse) {
        cells.push(opt_text(side.design_name.as_ref()));
        cells.push(opt_text(side.product_type.as_ref()));
        cells.push(opt_text(side.finish.as_ref()));
        cells.push(opt_text(side.size_description.as_ref()));
        cells.push(opt_text(side.size.as_ref()));
        cells.push(number(side.availability));
        cells.push(opt_number(side.on_order));
        cells.push(opt_number(side.backorder));
        for i in 0..self.date_width(warehouse) {
            cells.push(opt_date(side.arrival_dates.get(i).copied().flatten()));
        }
    }

    fn row(&self, row: &ComparisonRow) -> Vec<String> {
        let key = &row.key;
        let mut cells = vec![
            key.vend_part_number.clone(),
            key.part_number.clone(),
            key.design_id.clone(),
            key.finish_id.clone(),
            key.grade.clone(),
        ];
        self.side_cells(&mut cells, &row.la, Warehouse::La);
        self.side_cells(&mut cells, &row.sa, Warehouse::Seattle);
        cells.push(opt_text(row.size.as_ref()));
        cells.push(opt_text(row.size_description.as_ref()));
        if self.include_provenance {
            cells.push(row.provenance.to_string());
        }
        cells.push(flag(row.in_la));
        cells.push(flag(row.in_sa));
        cells.push(flag(row.available_la));
        cells.push(flag(row.available_sa));
        cells.push(number(row.total_availability));
        cells.push(row.status.to_string());
        cells
    }
}

fn render(name: &'static str, rows: &[ComparisonRow], include_provenance: bool) -> Sheet {
    let layout = Layout::for_rows(rows, include_provenance);
    Sheet {
        name,
        headers: layout.headers(),
        rows: rows.iter().map(|r| layout.row(r)).collect(),
    }
}

impl ComparisonTable {
    /// The "All Products" sheet, including the `_merge` provenance column.
    #[must_use]
    pub fn to_sheet(&self) -> Sheet {
        render(ALL_PRODUCTS_SHEET, &self.rows, true)
    }
}

impl BothAvailableTable {
    /// The "Both Available" sheet; provenance is implied and omitted.
    #[must_use]
    pub fn to_sheet(&self) -> Sheet {
        render(BOTH_AVAILABLE_SHEET, &self.rows, false)
    }
}
