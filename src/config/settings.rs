//! Application settings loading from config.toml
//!
//! Settings come from three places, later ones winning:
//! built-in defaults, the TOML file named by `SHOP_API_CONFIG` (default
//! `./config.toml`), and the `DATABASE_URL` / `SHOP_API_LISTEN_ADDR` environment
//! variables. The TOML file is optional.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::core::money;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "SHOP_API_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// `SeaORM` connection string
    pub database_url: String,
    /// Currency for lists created without one
    pub default_currency: String,
    /// Whether to attach a permissive CORS layer
    pub enable_cors: bool,
    /// Users to seed at startup
    pub users: Vec<UserConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            default_currency: "USD".to_string(),
            enable_cors: true,
            users: Vec::new(),
        }
    }
}

/// One `[[users]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserConfig {
    /// Login name
    pub username: String,
    /// Bearer token the user authenticates with
    pub token: String,
}

impl AppConfig {
    /// Applies environment overrides, reading variables through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(addr) = lookup("SHOP_API_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
    }

    /// Checks the settings that can be wrong independently of the environment.
    pub fn validate(&mut self) -> Result<()> {
        self.default_currency =
            money::normalize_currency(&self.default_currency).map_err(|e| Error::Config {
                message: format!("default_currency: {e}"),
            })?;
        Ok(())
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads the full application configuration.
///
/// A missing config file is not an error; defaults are used instead.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());

    let mut config = if Path::new(&path).exists() {
        let config = load_config(&path)?;
        info!("Loaded configuration from {path}");
        config
    } else {
        warn!("No config file at {path}, using defaults");
        AppConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    if config.users.is_empty() {
        warn!("No users configured; every authenticated request will be rejected");
    }

    Ok(config)
}
