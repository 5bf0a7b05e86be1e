//! Configuration handling for Armature templates.
//! A template directory may carry its own option schema as
//! armature.json, armature.yml or armature.yaml; without one the built-in
//! scaffolding schema applies.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::schema::{builtin_schema, Schema};
use log::debug;
use std::path::Path;

/// Loads the raw schema file from a template directory, trying each
/// supported file name in order.
///
/// # Errors
/// * `Error::ConfigError` if none of the candidate files exists
pub fn load_config<P: AsRef<Path>>(template_dir: P, config_files: &[&str]) -> Result<String> {
    for file in config_files {
        let config_path = template_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return std::fs::read_to_string(&config_path).map_err(Error::IoError);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        config_files.join(", ")
    )))
}

/// Parses schema content, trying JSON first and falling back to YAML.
pub fn parse_config(content: &str) -> Result<Schema> {
    match serde_json::from_str(content) {
        Ok(schema) => Ok(schema),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e))),
    }
}

/// Returns the option schema for a template directory: the template's own
/// schema file when present, the built-in scaffolding schema otherwise.
pub fn get_schema<P: AsRef<Path>>(template_dir: P) -> Result<Schema> {
    match load_config(template_dir, &CONFIG_FILES) {
        Ok(content) => parse_config(&content),
        Err(Error::ConfigError(_)) => {
            debug!("Template has no schema file, using the built-in schema");
            Ok(builtin_schema())
        }
        Err(err) => Err(err),
    }
}
