//! Configuration management for the evacuation engine
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and provides validation for all configuration settings.

use crate::EvacError;
use crate::evacuation::{CenterDirectory, MapsPlatform, StaticDirectory};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Where evacuation centers are read from
    pub directory: DirectoryConfig,
    /// Proximity search defaults
    pub search: SearchConfig,
    /// HTTP API settings
    pub server: ServerConfig,
    /// Maps deep link settings
    pub maps: MapsConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Directory source settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// JSON file with center records; the built-in Baguio table when unset
    pub source: Option<PathBuf>,
}

/// Proximity search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search radius in kilometers
    pub radius_km: f64,
    /// Maximum number of centers to return
    pub max_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapsConfig {
    pub platform: MapsPlatform,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_search_radius() -> f64 {
    25.0
}

fn default_max_results() -> u32 {
    10
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: default_search_radius(),
            max_results: default_max_results(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path.
    ///
    /// Environment variables override file values, e.g.
    /// `EBAGUIO_SEARCH__RADIUS_KM=10`.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicitly given file must exist; the default location is optional
        let required = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if required || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(required)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("EBAGUIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ebaguio").join("config.toml"))
    }

    /// Apply default values to empty or zero configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.search.radius_km == 0.0 {
            self.search.radius_km = default_search_radius();
        }
        if self.search.max_results == 0 {
            self.search.max_results = default_max_results();
        }
        if self.server.bind.is_empty() {
            self.server.bind = default_bind();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !self.search.radius_km.is_finite() || self.search.radius_km <= 0.0 {
            return Err(EvacError::config("Search radius must be a positive number").into());
        }

        if self.search.radius_km > 500.0 {
            return Err(EvacError::config("Search radius cannot exceed 500 km").into());
        }

        if self.search.max_results > 100 {
            return Err(EvacError::config("Maximum results cannot exceed 100").into());
        }

        if self.server.port == 0 {
            return Err(EvacError::config("Server port must be non-zero").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(EvacError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(EvacError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if let Some(source) = &self.directory.source
            && source.as_os_str().is_empty()
        {
            return Err(EvacError::config("Directory source path cannot be empty").into());
        }

        Ok(())
    }

    /// Open the configured center directory
    pub fn open_directory(&self) -> Result<Arc<dyn CenterDirectory>> {
        let directory = match &self.directory.source {
            Some(path) => StaticDirectory::load(path)
                .with_context(|| format!("Failed to load centers from {}", path.display()))?,
            None => StaticDirectory::builtin().clone(),
        };
        Ok(Arc::new(directory))
    }
}
