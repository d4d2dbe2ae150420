//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/pickup-clusters/config.toml

pub mod defaults;

use crate::cluster::{ClusterEngine, ClusterPolicy};
use crate::constants::pickup::MAX_RECENT_PICKUP_DAYS;
use crate::constants::url::GOOGLE_DIRECTIONS;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for CLI output
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Clustering settings
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,

    /// Map link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default values for CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Clustering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Geocoder name
    #[serde(default = "default_geocoder")]
    pub geocoder: String,

    /// Pickup detail enrichment ("random" or "none")
    #[serde(default = "default_enrichment")]
    pub enrichment: String,

    /// Seed for the "seeded" enrichment
    #[serde(default)]
    pub seed: u64,

    /// Flat revenue per customer, in dollars
    #[serde(default = "default_revenue_per_customer")]
    pub revenue_per_customer: u64,

    /// Window in days for a pickup to mark a cluster completed
    #[serde(default = "default_recent_pickup_days")]
    pub recent_pickup_days: i64,
}

/// Data source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Customer store file; empty means the XDG data directory
    #[serde(default)]
    pub customers_file: String,
}

/// Map link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// Multi-stop directions template
    #[serde(default = "default_directions")]
    pub directions: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_geocoder() -> String {
    DEFAULT_GEOCODER.to_string()
}
fn default_enrichment() -> String {
    DEFAULT_ENRICHMENT.to_string()
}
fn default_revenue_per_customer() -> u64 {
    DEFAULT_REVENUE_PER_CUSTOMER
}
fn default_recent_pickup_days() -> i64 {
    DEFAULT_RECENT_PICKUP_DAYS
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_directions() -> String {
    GOOGLE_DIRECTIONS.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=16/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
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

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            geocoder: default_geocoder(),
            enrichment: default_enrichment(),
            seed: DEFAULT_SEED,
            revenue_per_customer: default_revenue_per_customer(),
            recent_pickup_days: default_recent_pickup_days(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            directions: default_directions(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            let config: Config = toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["clustering", "geocoder"] => Some(self.clustering.geocoder.clone()),
            ["clustering", "enrichment"] => Some(self.clustering.enrichment.clone()),
            ["clustering", "seed"] => Some(self.clustering.seed.to_string()),
            ["clustering", "revenue_per_customer"] => {
                Some(self.clustering.revenue_per_customer.to_string())
            }
            ["clustering", "recent_pickup_days"] => {
                Some(self.clustering.recent_pickup_days.to_string())
            }

            ["data", "customers_file"] => Some(self.data.customers_file.clone()),

            ["url", "default"] => Some(self.url.default.clone()),
            ["url", "directions"] => Some(self.url.directions.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["clustering", "geocoder"] => {
                self.clustering.geocoder = value.to_string();
            }
            ["clustering", "enrichment"] => {
                self.clustering.enrichment = value.to_string();
            }
            ["clustering", "seed"] => {
                self.clustering.seed = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid seed: {}", value))
                })?;
            }
            ["clustering", "revenue_per_customer"] => {
                self.clustering.revenue_per_customer = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid revenue value: {}", value))
                })?;
            }
            ["clustering", "recent_pickup_days"] => {
                let days: i64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid day count: {}", value))
                })?;
                check_recent_pickup_days(days)?;
                self.clustering.recent_pickup_days = days;
            }

            ["data", "customers_file"] => {
                self.data.customers_file = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }
            ["url", "directions"] => {
                check_directions(value)?;
                self.url.directions = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// Check values that `set` would reject
    pub fn validate(&self) -> Result<()> {
        check_recent_pickup_days(self.clustering.recent_pickup_days)?;
        check_directions(&self.url.directions)?;
        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "server.host",
            "server.port",
            "clustering.geocoder",
            "clustering.enrichment",
            "clustering.seed",
            "clustering.revenue_per_customer",
            "clustering.recent_pickup_days",
            "data.customers_file",
            "url.default",
            "url.directions",
        ]
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Clustering engine for the configured geocoder, enrichment and policy
    pub fn engine(&self) -> ClusterEngine {
        ClusterEngine::from_names(
            &self.clustering.geocoder,
            &self.clustering.enrichment,
            self.clustering.seed,
            self.policy(),
        )
    }

    /// Cluster aggregation rules
    pub fn policy(&self) -> ClusterPolicy {
        ClusterPolicy {
            revenue_per_customer: self.clustering.revenue_per_customer,
            recent_pickup_days: self.clustering.recent_pickup_days,
        }
    }
}

fn check_recent_pickup_days(days: i64) -> Result<()> {
    if !(0..=MAX_RECENT_PICKUP_DAYS).contains(&days) {
        return Err(Error::Config(format!(
            "recent_pickup_days must be between 0 and {}: {}",
            MAX_RECENT_PICKUP_DAYS, days
        )));
    }
    Ok(())
}

fn check_directions(template: &str) -> Result<()> {
    if !template.contains("{stops}") {
        return Err(Error::Config(
            "Directions template must contain {stops}".to_string(),
        ));
    }
    Ok(())
}
