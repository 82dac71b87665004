//! Configuration file loading for the CLI
//!
//! This module finds the reconstruction settings on disk, decodes them from
//! TOML and rejects values the pipeline cannot work with (negative or
//! non-finite distances). Lookup goes through an explicit path, the local
//! project directory and the platform config directory, in that order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use bpmn_recon::{ReconError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid value for `{key}`: {value}")]
    Validation { key: &'static str, value: f32 },
}

impl From<ConfigError> for ReconError {
    fn from(err: ConfigError) -> Self {
        ReconError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (bpmn-recon/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - A distance in the file is negative or not finite
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ReconError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("bpmn-recon/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "bpmn-recon", "bpmn-recon") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ReconError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    debug!(
        containment_margin = config.linking().containment_margin(),
        boundary_margin = config.pool().boundary_margin(),
        seeded = config.ids().seed().is_some();
        "Configuration loaded"
    );
    Ok(config)
}

/// Rejects distances that would make containment or repair meaningless.
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let distances = [
        ("linking.containment_margin", Some(config.linking().containment_margin())),
        ("pool.boundary_margin", Some(config.pool().boundary_margin())),
        ("text.max_distance", config.text().max_distance()),
    ];

    for (key, value) in distances {
        if let Some(value) = value.filter(|value| !value.is_finite() || *value < 0.0) {
            return Err(ConfigError::Validation { key, value });
        }
    }
    Ok(())
}
