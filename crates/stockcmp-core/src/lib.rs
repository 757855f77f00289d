//! Catalog and stock-status reconciliation for two-warehouse laminate availability.
//!
//! Data flows strictly forward: [`catalog`] → [`identifiers`] → [`size`] →
//! [`key`] → [`stock`] → [`compare`] → [`table`]. Nothing here performs I/O
//! beyond reading configuration files.

pub mod app_config;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod key;
pub mod regions;
pub mod size;
pub mod stock;
pub mod table;

pub use app_config::{AppConfig, Environment};
pub use catalog::{normalize_entries, normalize_entry, CatalogRecord, RawCatalogEntry};
pub use compare::{
    compare_warehouses, reconcile, AvailabilityStatus, BothAvailableTable, ComparisonRow,
    ComparisonTable, Provenance, WarehouseColumns,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use identifiers::reconcile_identifiers;
pub use key::{part_number, MergeKey};
pub use regions::{load_regions, parse_regions, RegionConfig, Regions, Warehouse};
pub use size::size_code;
pub use stock::{join_stock, parse_stock_status, ReconciledRecord, StockStatusRecord};
pub use table::Sheet;
