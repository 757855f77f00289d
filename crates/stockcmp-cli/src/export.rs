//! Report and snapshot files.
//!
//! The report is one workbook named after the run timestamp, with an "All
//! Products" and a "Both Available" worksheet. `--format csv` writes one CSV
//! file per sheet instead. Snapshots are the raw per-warehouse rows as pretty
//! JSON.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook};

use stockcmp_core::table::Sheet;
use stockcmp_core::{BothAvailableTable, ComparisonTable};
use stockcmp_scraper::WarehouseSnapshot;

/// File layout of a written report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// One `.xlsx` workbook with a worksheet per sheet
    #[default]
    Xlsx,
    /// One `.csv` file per sheet
    Csv,
}

/// `warehouse_availability_report_YYYYMMDD_HHMM` for the given local time.
pub(crate) fn report_stem(at: NaiveDateTime) -> String {
    format!("warehouse_availability_report_{}", at.format("%Y%m%d_%H%M"))
}

/// `"All Products"` becomes `all_products`.
fn sheet_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Writes `sheet` as CSV: one header row, then one record per row.
pub(crate) fn write_sheet<W: Write>(sheet: &Sheet, writer: W) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes `sheets` as worksheets of one workbook at `path`, bold header row
/// first. Empty cells are left blank.
pub(crate) fn write_workbook(path: &Path, sheets: &[Sheet]) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, u16::try_from(col)?, header, &bold)?;
        }
        for (row, cells) in sheet.rows.iter().enumerate() {
            let row = u32::try_from(row + 1)?;
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet.write_string(row, u16::try_from(col)?, cell)?;
                }
            }
        }
    }
    workbook
        .save(path)
        .with_context(|| format!("writing workbook {}", path.display()))?;
    Ok(())
}

fn write_sheet_file(dir: &Path, stem: &str, sheet: &Sheet) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!("{stem}_{}.csv", sheet_slug(sheet.name)));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_sheet(sheet, BufWriter::new(file))
        .with_context(|| format!("writing sheet \"{}\" to {}", sheet.name, path.display()))?;
    Ok(path)
}

/// Writes both sheets into `dir`, creating it if needed, and returns the
/// paths written.
pub(crate) fn write_report(
    dir: &Path,
    stem: &str,
    table: &ComparisonTable,
    both: &BothAvailableTable,
    format: ReportFormat,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let sheets = [table.to_sheet(), both.to_sheet()];
    match format {
        ReportFormat::Xlsx => {
            let path = dir.join(format!("{stem}.xlsx"));
            write_workbook(&path, &sheets)?;
            Ok(vec![path])
        }
        ReportFormat::Csv => sheets
            .iter()
            .map(|sheet| write_sheet_file(dir, stem, sheet))
            .collect(),
    }
}

pub(crate) fn write_snapshot(
    dir: &Path,
    stem: &str,
    snapshot: &WarehouseSnapshot,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(format!("{stem}_{}.json", snapshot.warehouse.suffix().to_lowercase()));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)
        .with_context(|| format!("writing snapshot {}", path.display()))?;
    Ok(path)
}

pub(crate) fn read_snapshot(path: &Path) -> anyhow::Result<WarehouseSnapshot> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing snapshot {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Reader, Xlsx};
    use chrono::NaiveDate;
    use stockcmp_core::{parse_stock_status, reconcile, CatalogRecord, Warehouse};

    fn catalog(part: &str) -> CatalogRecord {
        CatalogRecord {
            design_id: "1573".to_owned(),
            design_name: "FROSTY WHITE, MATTE".to_owned(),
            vend_part_number: part.to_owned(),
            grade: "HGS".to_owned(),
            product_type: "STANDARD".to_owned(),
            finish_id: "60".to_owned(),
            finish: "MATTE".to_owned(),
            size_description: "48 X 96".to_owned(),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stockcmp-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn stem_uses_minute_resolution() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 59)
            .unwrap();
        assert_eq!(report_stem(at), "warehouse_availability_report_20240309_0705");
    }

    #[test]
    fn sheet_names_become_file_slugs() {
        assert_eq!(sheet_slug("All Products"), "all_products");
        assert_eq!(sheet_slug("Both Available"), "both_available");
    }

    #[test]
    fn csv_quotes_cells_with_commas() {
        let (table, _) = reconcile(
            vec![catalog("1573K6012")],
            vec![],
            &[parse_stock_status("1573K6012", "3~0~0").unwrap()],
            &[],
        );
        let mut buf = Vec::new();
        write_sheet(&table.to_sheet(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("VendPartNumber,PartNumber,DesignID"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("1573K6012,1573-HGS-60C1,1573,60,HGS,"));
        assert!(row.contains("\"FROSTY WHITE, MATTE\""));
        assert!(row.ends_with(",left_only,true,false,true,false,3,LA Only"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn report_is_one_workbook_with_both_sheets() {
        let dir = scratch_dir("workbook");
        let (table, both) = reconcile(
            vec![catalog("1573K6012")],
            vec![catalog("1573K6012")],
            &[parse_stock_status("1573K6012", "3~0~0").unwrap()],
            &[parse_stock_status("1573K6012", "0~0~0~05/01/2024 10:00:00").unwrap()],
        );
        let stem = "warehouse_availability_report_20240101_0000";
        let files = write_report(&dir, stem, &table, &both, ReportFormat::Xlsx).unwrap();
        assert_eq!(files, vec![dir.join(format!("{stem}.xlsx"))]);

        let mut workbook: Xlsx<_> = open_workbook(&files[0]).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["All Products", "Both Available"]);

        let all = workbook.worksheet_range("All Products").unwrap();
        let mut rows = all.rows();
        let header: Vec<String> = rows.next().unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(header, table.to_sheet().headers);
        let first = rows.next().unwrap();
        assert_eq!(first[0].to_string(), "1573K6012");
        assert_eq!(first.last().unwrap().to_string(), "Available in Both");
        assert!(rows.next().is_none());

        let both_range = workbook.worksheet_range("Both Available").unwrap();
        let header: Vec<String> = both_range
            .rows()
            .next()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(header, both.to_sheet().headers);
        assert!(!header.iter().any(|h| h == "_merge"));
        assert_eq!(both_range.rows().count(), 2);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn csv_format_writes_one_file_per_sheet() {
        let dir = scratch_dir("report");
        let (table, both) = reconcile(
            vec![catalog("1573K6012")],
            vec![catalog("1573K6012")],
            &[],
            &[],
        );
        let files = write_report(
            &dir,
            "warehouse_availability_report_20240101_0000",
            &table,
            &both,
            ReportFormat::Csv,
        )
        .unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("warehouse_availability_report_20240101_0000_all_products.csv"));
        assert!(files[1].ends_with("warehouse_availability_report_20240101_0000_both_available.csv"));
        let both_text = std::fs::read_to_string(&files[1]).unwrap();
        assert_eq!(both_text.lines().count(), 1, "header only");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn snapshot_survives_write_and_read() {
        let dir = scratch_dir("snapshot");
        let mut snapshot = WarehouseSnapshot::empty("SEATTLE", Warehouse::Seattle);
        snapshot.catalog.push(catalog("1573K6012"));
        snapshot
            .stock
            .push(parse_stock_status("1573K6012", "0~0~0~2024-05-01").unwrap());
        let path = write_snapshot(&dir, "run", &snapshot).unwrap();
        assert!(path.ends_with("run_sa.json"));
        assert_eq!(read_snapshot(&path).unwrap(), snapshot);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
