//! Command handlers: the full scrape-and-compare run, offline comparison
//! from snapshots, and region listing.

use std::path::Path;

use anyhow::Context;
use chrono::Local;

use stockcmp_core::{load_regions, reconcile, AppConfig, RegionConfig, Regions, Warehouse};
use stockcmp_scraper::{
    run_warehouse, Pacer, ProgressSink, RunSettings, ScraperError, TracingProgress, VendorClient,
    WarehouseSnapshot,
};

use crate::export::{read_snapshot, report_stem, write_report, write_snapshot, ReportFormat};

pub(crate) struct RunOptions<'a> {
    pub region: Option<&'a str>,
    pub dry_run: bool,
    pub snapshot: bool,
    pub output_dir: &'a Path,
    pub format: ReportFormat,
}

/// Loads the regions file, falling back to the built-in vendor values when
/// the file does not exist. A file that exists but fails validation is an error.
pub(crate) fn load_regions_or_defaults(config: &AppConfig) -> anyhow::Result<Regions> {
    if config.regions_path.exists() {
        return load_regions(&config.regions_path)
            .with_context(|| format!("loading {}", config.regions_path.display()));
    }
    tracing::warn!(
        path = %config.regions_path.display(),
        "regions file not found, using built-in defaults"
    );
    Ok(RegionConfig::defaults())
}

/// Which warehouses a run scrapes. `None` means both.
pub(crate) fn selected_warehouses(region: Option<&str>) -> anyhow::Result<Vec<Warehouse>> {
    match region {
        None => Ok(vec![Warehouse::La, Warehouse::Seattle]),
        Some(name) => Warehouse::from_region_name(name)
            .map(|w| vec![w])
            .ok_or_else(|| anyhow::anyhow!("unknown region '{name}'; expected LA or SEATTLE")),
    }
}

async fn scrape_or_skip(
    client: &VendorClient,
    region: &RegionConfig,
    warehouse: Warehouse,
    selected: &[Warehouse],
    settings: RunSettings,
    pacer: &Pacer,
    progress: &dyn ProgressSink,
) -> Result<WarehouseSnapshot, ScraperError> {
    if selected.contains(&warehouse) {
        run_warehouse(client, region, settings, pacer, progress).await
    } else {
        tracing::info!(region = %region.name, "region not selected, treating as empty");
        Ok(WarehouseSnapshot::empty(&region.name, warehouse))
    }
}

fn print_dry_run(
    client: &VendorClient,
    regions: &Regions,
    selected: &[Warehouse],
) -> anyhow::Result<()> {
    for warehouse in selected {
        let region = regions.get(*warehouse);
        println!(
            "{} (zipcode {}, warehouse {}, infor id {}):",
            region.name, region.zipcode, region.warehouse_code, region.infor_id
        );
        for page in 1..=region.num_pages {
            println!("  GET  {}", client.catalog_url(&region.zipcode, page)?);
        }
        println!("  POST {}", client.endpoints().stock_status_url);
    }
    Ok(())
}

/// Scrapes the selected warehouses concurrently, compares them, and writes
/// the two-sheet report.
///
/// Both warehouses draw request slots from one pacer, so running them side by
/// side does not raise the request rate.
///
/// # Errors
///
/// Returns an error if the regions file is invalid, the region filter names
/// no warehouse, the HTTP client cannot be built, or an output file cannot be
/// written. Per-page and per-part fetch failures are logged and skipped.
pub(crate) async fn run_comparison(
    config: &AppConfig,
    options: &RunOptions<'_>,
) -> anyhow::Result<()> {
    let regions = load_regions_or_defaults(config)?;
    let selected = selected_warehouses(options.region)?;
    let client = VendorClient::from_config(config)?;

    if options.dry_run {
        return print_dry_run(&client, &regions, &selected);
    }

    let settings = RunSettings::from(config);
    let pacer = settings.pacer();
    let progress = TracingProgress;
    let (la, sa) = tokio::join!(
        scrape_or_skip(
            &client,
            &regions.la,
            Warehouse::La,
            &selected,
            settings,
            &pacer,
            &progress
        ),
        scrape_or_skip(
            &client,
            &regions.seattle,
            Warehouse::Seattle,
            &selected,
            settings,
            &pacer,
            &progress
        ),
    );
    let (la, sa) = (la?, sa?);
    for snapshot in [&la, &sa] {
        if selected.contains(&snapshot.warehouse) && snapshot.catalog.is_empty() {
            tracing::warn!(
                region = %snapshot.region,
                failed_pages = snapshot.failed_pages.len(),
                "no catalog rows scraped; this side will be reported as absent"
            );
        }
    }

    let stem = report_stem(Local::now().naive_local());
    if options.snapshot {
        for snapshot in [&la, &sa] {
            let path = write_snapshot(options.output_dir, &stem, snapshot)?;
            println!("Snapshot written to {}", path.display());
        }
    }

    write_comparison(la, sa, options.output_dir, &stem, options.format)?;
    progress.log("Scraper finished successfully!");
    Ok(())
}

fn write_comparison(
    la: WarehouseSnapshot,
    sa: WarehouseSnapshot,
    output_dir: &Path,
    stem: &str,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let (table, both) = reconcile(la.catalog, sa.catalog, &la.stock, &sa.stock);
    let files = write_report(output_dir, stem, &table, &both, format)?;
    println!(
        "{} products compared, {} available in both warehouses",
        table.rows.len(),
        both.rows.len()
    );
    for path in &files {
        println!("Report written to {}", path.display());
    }
    Ok(())
}

/// Reads two saved snapshots and writes a fresh report from them.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be read, the snapshots are passed
/// for the wrong warehouses, or the report cannot be written.
pub(crate) fn compare_snapshots(
    la_path: &Path,
    sa_path: &Path,
    output_dir: &Path,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let la = read_snapshot(la_path)?;
    let sa = read_snapshot(sa_path)?;
    if la.warehouse != Warehouse::La {
        anyhow::bail!(
            "{} holds {} data, expected LA",
            la_path.display(),
            la.warehouse
        );
    }
    if sa.warehouse != Warehouse::Seattle {
        anyhow::bail!(
            "{} holds {} data, expected SEATTLE",
            sa_path.display(),
            sa.warehouse
        );
    }
    let stem = report_stem(Local::now().naive_local());
    write_comparison(la, sa, output_dir, &stem, format)
}

/// Prints each configured region.
///
/// # Errors
///
/// Returns an error if the regions file exists but is invalid.
pub(crate) fn print_regions(config: &AppConfig) -> anyhow::Result<()> {
    let regions = load_regions_or_defaults(config)?;
    for region in [&regions.la, &regions.seattle] {
        println!(
            "{:<8} zipcode={} pages={} warehouse={} inforid={}",
            region.name, region.zipcode, region.num_pages, region.warehouse_code, region.infor_id
        );
    }
    Ok(())
}
