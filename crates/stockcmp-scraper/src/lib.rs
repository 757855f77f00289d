pub mod client;
pub mod decode;
pub mod error;
pub mod progress;
mod rate_limit;
pub mod types;
pub mod warehouse;

pub use client::{Endpoints, VendorClient};
pub use decode::decode_catalog_page;
pub use error::ScraperError;
pub use progress::{CollectingProgress, ProgressSink, TracingProgress};
pub use warehouse::{
    fetch_stock_statuses, run_warehouse, scrape_catalog, Pacer, RunSettings, WarehouseSnapshot,
};
