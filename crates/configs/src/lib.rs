//! # Configs
//!
//! Layered runtime configuration: built-in defaults, then an optional
//! `sitekit.toml` next to the binary, then `SITEKIT_*` environment
//! variables (`SITEKIT_SERVER__PORT=9000` style). A `.env` file is
//! honored before the environment is read.

use config::{Config, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "sitekit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
    #[error("server port must be non-zero")]
    PortOutOfRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    JsonFile,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data file location for the `json-file` backend.
    pub path: String,
    /// Seed the three demo projects on first start.
    pub seed_samples: bool,
}

#[derive(Debug, Deserialize)]
pub struct SuperAdminConfig {
    pub username: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub super_admin: SuperAdminConfig,
}

impl AppConfig {
    /// Loads configuration from the default file location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration, layering `config_file` (if present) and the
    /// environment over the built-in defaults.
    pub fn load_from(config_file: &str) -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            debug!("loaded environment overrides from .env");
        }

        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("storage.backend", "json-file")?
            .set_default("storage.path", "data/sitekit.json")?
            .set_default("storage.seed_samples", true)?
            .set_default("super_admin.username", "admin")?
            .set_default("super_admin.password", "admin123")?
            .add_source(File::new(config_file, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("SITEKIT").separator("__"))
            .build()?;

        let app: AppConfig = settings.try_deserialize()?;
        if app.server.port == 0 {
            return Err(ConfigError::PortOutOfRange);
        }
        Ok(app)
    }
}
