use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rates::RateTables;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub distance: DistanceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rates: RateTables,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Distance-matrix style endpoint. Empty means every lookup falls back
    /// to `rates.business.default_distance_miles`.
    #[serde(default)]
    pub provider_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_address: Option<String>,
    pub distance_provider_url: Option<String>,
    pub default_distance_miles: Option<f64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/paving-estimator/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(base_address) = overrides.base_address {
            self.rates.business.base_address = base_address;
        }
        if let Some(url) = overrides.distance_provider_url {
            self.distance.provider_url = url;
        }
        if let Some(miles) = overrides.default_distance_miles {
            self.rates.business.default_distance_miles = miles;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[distance]
provider_url = ""
api_key = ""
timeout_secs = 8

[server]
host = "127.0.0.1"
port = 3001

[rates.business]
name = "Blacktop Pavement Services"
base_address = "337 Ayers Orchard Road, Stuart, VA 24171"
default_distance_miles = 50.0

[rates.vehicle]
name = "1978 Chevy C30 dually"
curb_weight_lbs = 4300.0
gvwr_lbs = 10000.0
miles_per_gallon = 12.0

[rates.sealer_tank]
name = "SK 550 skid unit"
empty_weight_lbs = 1865.0
capacity_gallons = 550.0

[rates.materials]
sealer_per_gallon = 3.65
sand_per_bag = 10.0
water_per_gallon = 0.0
fast_dry_per_bucket = 50.0
prep_seal_per_bucket = 50.0
crack_fill_per_box = 44.95
propane_per_tank = 10.0
paint_per_linear_foot = 0.85
stencil_each = 15.0
hot_mix_per_sqft = 4.0
cold_patch_per_sqft = 3.0
diesel_per_gallon = 3.5

[rates.labor]
hourly_rate = 75.0
cleanup_hours = 1.0

[rates.pricing]
overhead_rate = 0.15
profit_rate = 0.20
alternative_markup_rate = 0.25
mobilization_base_fee = 150.0
mobilization_free_miles = 30.0
mobilization_per_mile = 5.0
quote_validity_days = 30
"#;
        template.to_string()
    }
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            provider_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}
