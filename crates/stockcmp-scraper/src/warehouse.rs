//! One warehouse's scrape: catalog pages, then a stock lookup per part number.
//!
//! Catalog pages and stock lookups start on the ticks of a [`Pacer`]. Callers
//! that run several warehouses at once hand them the same pacer, so the
//! vendor sees at most one new call per `inter_request_delay_ms` across all
//! of them. Retries inside the client wait out their own backoff and do not
//! take a tick. Failures are logged and dropped; a run never aborts because
//! of one bad page or part.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use stockcmp_core::{
    normalize_entries, parse_stock_status, reconcile_identifiers, AppConfig, CatalogRecord,
    RegionConfig, StockStatusRecord, Warehouse,
};

use crate::client::VendorClient;
use crate::decode::decode_catalog_page;
use crate::error::ScraperError;
use crate::progress::ProgressSink;

/// Pacing and concurrency knobs for a warehouse run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub inter_request_delay_ms: u64,
    pub max_concurrent_lookups: usize,
}

impl From<&AppConfig> for RunSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            inter_request_delay_ms: config.inter_request_delay_ms,
            max_concurrent_lookups: config.max_concurrent_lookups,
        }
    }
}

impl RunSettings {
    /// A fresh pacer ticking every `inter_request_delay_ms`.
    #[must_use]
    pub fn pacer(&self) -> Pacer {
        Pacer::new(Duration::from_millis(self.inter_request_delay_ms))
    }
}

/// Everything one warehouse run produced, ready for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSnapshot {
    pub region: String,
    pub warehouse: Warehouse,
    /// Normalized, identifier-reconciled catalog rows.
    pub catalog: Vec<CatalogRecord>,
    pub stock: Vec<StockStatusRecord>,
    #[serde(default)]
    pub failed_pages: Vec<u32>,
    #[serde(default)]
    pub failed_lookups: Vec<String>,
}

impl WarehouseSnapshot {
    /// A snapshot with no rows, standing in for a warehouse that was not scraped.
    #[must_use]
    pub fn empty(region: &str, warehouse: Warehouse) -> Self {
        Self {
            region: region.to_owned(),
            warehouse,
            catalog: Vec::new(),
            stock: Vec::new(),
            failed_pages: Vec::new(),
            failed_lookups: Vec::new(),
        }
    }
}

/// Start-time gate for vendor calls, shared by reference between every task
/// that talks to the vendor. A zero delay disables pacing.
pub struct Pacer {
    interval: Option<Mutex<Interval>>,
}

impl Pacer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let interval = (!delay.is_zero()).then(|| {
            let mut interval = tokio::time::interval_at(Instant::now() + delay, delay);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Mutex::new(interval)
        });
        Self { interval }
    }

    /// Waits for the next free tick.
    pub async fn wait(&self) {
        if let Some(interval) = &self.interval {
            interval.lock().await.tick().await;
        }
    }
}

/// Fetches and decodes every configured catalog page for `region`, then
/// normalizes and reconciles the rows.
///
/// Pages are fetched in order, each on its own pacer tick. A page that fails
/// to fetch is skipped and its number returned in the second element.
pub async fn scrape_catalog(
    client: &VendorClient,
    region: &RegionConfig,
    pacer: &Pacer,
    progress: &dyn ProgressSink,
) -> (Vec<CatalogRecord>, Vec<u32>) {
    let mut raw = Vec::new();
    let mut failed_pages = Vec::new();

    progress.log(&format!(
        "===== Scraping {} ({}) =====",
        region.name, region.zipcode
    ));
    for page in 1..=region.num_pages {
        pacer.wait().await;
        progress.log(&format!("{}: Scraping page {page}", region.name));
        match client.fetch_catalog_page(&region.zipcode, page).await {
            Ok(html) => {
                let entries = decode_catalog_page(&html);
                tracing::debug!(
                    region = %region.name,
                    page,
                    entries = entries.len(),
                    "decoded catalog page"
                );
                raw.extend(entries);
            }
            Err(e) => {
                tracing::warn!(
                    region = %region.name,
                    page,
                    error = %e,
                    "catalog page fetch failed"
                );
                progress.log(&format!(
                    "Request failed for {} page {page}: {e}",
                    region.name
                ));
                failed_pages.push(page);
            }
        }
    }

    let catalog = reconcile_identifiers(normalize_entries(&raw).collect());
    (catalog, failed_pages)
}

/// Unique part numbers in first-seen order.
fn unique_part_numbers(catalog: &[CatalogRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter(|r| seen.insert(r.vend_part_number.as_str()))
        .map(|r| r.vend_part_number.clone())
        .collect()
}

async fn lookup_one(
    client: &VendorClient,
    region: &RegionConfig,
    part_number: &str,
) -> Result<StockStatusRecord, String> {
    let body = client
        .fetch_stock_status(part_number, &region.warehouse_code, region.infor_id)
        .await
        .map_err(|e| match e {
            ScraperError::UnexpectedStatus { status, .. } => {
                format!("Failed for {part_number}, status code: {status}")
            }
            other => format!("Error for {part_number}: {other}"),
        })?;
    parse_stock_status(part_number, &body).map_err(|e| format!("Error for {part_number}: {e}"))
}

/// Looks up stock for each part number at `region`'s warehouse.
///
/// At most `max_concurrent_lookups` requests are in flight, and each starts
/// on a tick of `pacer`. Results keep input order. Parts whose lookup or
/// parse failed are returned separately.
pub async fn fetch_stock_statuses(
    client: &VendorClient,
    region: &RegionConfig,
    part_numbers: &[String],
    settings: RunSettings,
    pacer: &Pacer,
    progress: &dyn ProgressSink,
) -> (Vec<StockStatusRecord>, Vec<String>) {
    let total = part_numbers.len();
    let label = region.warehouse().map_or(region.name.as_str(), |w| w.suffix());

    let outcomes: Vec<(&String, Result<StockStatusRecord, String>)> =
        stream::iter(part_numbers.iter().enumerate())
            .map(|(i, part_number)| async move {
                pacer.wait().await;
                let outcome = lookup_one(client, region, part_number).await;
                progress.log(&format!(
                    "Processed {label} -> {}/{total}: {part_number}",
                    i + 1
                ));
                (part_number, outcome)
            })
            .buffered(settings.max_concurrent_lookups.max(1))
            .collect()
            .await;

    let mut records = Vec::with_capacity(outcomes.len());
    let mut failed = Vec::new();
    for (part_number, outcome) in outcomes {
        match outcome {
            Ok(record) => records.push(record),
            Err(message) => {
                tracing::warn!(region = %region.name, part_number = %part_number, "{message}");
                progress.log(&message);
                failed.push(part_number.clone());
            }
        }
    }
    (records, failed)
}

/// Runs the full scrape for one region, taking request slots from `pacer`.
///
/// # Errors
///
/// Returns [`ScraperError::UnknownRegion`] when the region names no known
/// warehouse; transport failures are absorbed per page and per part.
pub async fn run_warehouse(
    client: &VendorClient,
    region: &RegionConfig,
    settings: RunSettings,
    pacer: &Pacer,
    progress: &dyn ProgressSink,
) -> Result<WarehouseSnapshot, ScraperError> {
    let warehouse = region.warehouse().ok_or_else(|| ScraperError::UnknownRegion {
        name: region.name.clone(),
    })?;

    tracing::info!(
        region = %region.name,
        zipcode = %region.zipcode,
        pages = region.num_pages,
        "starting warehouse run"
    );
    let (catalog, failed_pages) = scrape_catalog(client, region, pacer, progress).await;

    let part_numbers = unique_part_numbers(&catalog);
    let (stock, failed_lookups) =
        fetch_stock_statuses(client, region, &part_numbers, settings, pacer, progress).await;

    progress.log(&format!("{} completed - {} rows", region.name, catalog.len()));
    tracing::info!(
        region = %region.name,
        catalog_rows = catalog.len(),
        stock_rows = stock.len(),
        failed_pages = failed_pages.len(),
        failed_lookups = failed_lookups.len(),
        "warehouse run complete"
    );

    Ok(WarehouseSnapshot {
        region: region.name.clone(),
        warehouse,
        catalog,
        stock,
        failed_pages,
        failed_lookups,
    })
}
