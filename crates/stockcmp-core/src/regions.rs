use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One of the two warehouse sites the comparison covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Warehouse {
    #[serde(rename = "LA")]
    La,
    #[serde(rename = "SEATTLE")]
    Seattle,
}

impl Warehouse {
    /// Column suffix used in comparison output (`Availability_LA`, `Availability_SA`).
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Warehouse::La => "LA",
            Warehouse::Seattle => "SA",
        }
    }

    /// Resolve a region name from the regions file. Case-insensitive.
    #[must_use]
    pub fn from_region_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "LA" | "LOS ANGELES" => Some(Warehouse::La),
            "SEATTLE" | "SEA" | "SA" => Some(Warehouse::Seattle),
            _ => None,
        }
    }
}

impl std::fmt::Display for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warehouse::La => write!(f, "LA"),
            Warehouse::Seattle => write!(f, "SEATTLE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    /// Zip code the catalog is browsed from; selects the serving warehouse.
    pub zipcode: String,
    pub num_pages: u32,
    /// Warehouse code sent to the stock-status endpoint (e.g. `"SEA"`).
    pub warehouse_code: String,
    pub infor_id: u64,
}

impl RegionConfig {
    /// The known vendor values for both sites, one catalog page each.
    #[must_use]
    pub fn defaults() -> Regions {
        Regions {
            la: RegionConfig {
                name: "LA".to_string(),
                zipcode: "90058".to_string(),
                num_pages: 1,
                warehouse_code: "LA".to_string(),
                infor_id: 109_284,
            },
            seattle: RegionConfig {
                name: "SEATTLE".to_string(),
                zipcode: "98001".to_string(),
                num_pages: 1,
                warehouse_code: "SEA".to_string(),
                infor_id: 109_283,
            },
        }
    }

    /// Always `Some` for regions that passed [`load_regions`] validation.
    #[must_use]
    pub fn warehouse(&self) -> Option<Warehouse> {
        Warehouse::from_region_name(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionConfig>,
}

/// Validated region configuration: exactly one entry per warehouse site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regions {
    pub la: RegionConfig,
    pub seattle: RegionConfig,
}

impl Regions {
    #[must_use]
    pub fn get(&self, warehouse: Warehouse) -> &RegionConfig {
        match warehouse {
            Warehouse::La => &self.la,
            Warehouse::Seattle => &self.seattle,
        }
    }

    /// Look up a region by its configured name (case-insensitive).
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RegionConfig> {
        Warehouse::from_region_name(name).map(|w| self.get(w))
    }
}

/// Load and validate the regions configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<Regions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_regions(&content)
}

/// Parse and validate regions YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_regions(content: &str) -> Result<Regions, ConfigError> {
    let file: RegionsFile = serde_yaml::from_str(content)?;
    validate_regions(file)
}

fn validate_regions(file: RegionsFile) -> Result<Regions, ConfigError> {
    let mut la: Option<RegionConfig> = None;
    let mut seattle: Option<RegionConfig> = None;

    for region in file.regions {
        if region.zipcode.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "region '{}' has an empty zipcode",
                region.name
            )));
        }
        if region.warehouse_code.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "region '{}' has an empty warehouse_code",
                region.name
            )));
        }
        if region.num_pages == 0 {
            return Err(ConfigError::Validation(format!(
                "region '{}' has num_pages 0; must be at least 1",
                region.name
            )));
        }

        let slot = match region.warehouse() {
            Some(Warehouse::La) => &mut la,
            Some(Warehouse::Seattle) => &mut seattle,
            None => {
                return Err(ConfigError::Validation(format!(
                    "unknown region '{}'; expected LA or SEATTLE",
                    region.name
                )))
            }
        };
        if slot.is_some() {
            return Err(ConfigError::Validation(format!(
                "duplicate region: '{}'",
                region.name
            )));
        }
        *slot = Some(region);
    }

    match (la, seattle) {
        (Some(la), Some(seattle)) => Ok(Regions { la, seattle }),
        (None, _) => Err(ConfigError::Validation("missing LA region".to_string())),
        (_, None) => Err(ConfigError::Validation(
            "missing SEATTLE region".to_string(),
        )),
    }
}
