//! Default logbook section configuration from config.toml
//!
//! This module provides functionality to load the default logbook sections
//! from a TOML configuration file. The sections defined in config.toml are
//! used to seed the logbook of a user who has no nodes yet.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of default sections to seed
    pub sections: Vec<SectionConfig>,
}

/// Configuration for a single root-level logbook section
#[derive(Debug, Deserialize, Clone)]
pub struct SectionConfig {
    /// Name of the section
    pub name: String,
    /// Free-text target for this section, if any
    pub goal: Option<String>,
    /// Subcategories created under this section
    #[serde(default)]
    pub subsections: Vec<SubsectionConfig>,
}

/// Configuration for a subcategory under a section
#[derive(Debug, Deserialize, Clone)]
pub struct SubsectionConfig {
    /// Name of the subcategory
    pub name: String,
    /// Free-text target for this subcategory, if any
    pub goal: Option<String>,
}

/// Loads section configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads section configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_section_config() {
        let toml_str = r#"
            [[sections]]
            name = "Cirugías"
            goal = "250"

            [[sections.subsections]]
            name = "Laparoscópicas"
            goal = "80"

            [[sections.subsections]]
            name = "Abiertas"

            [[sections]]
            name = "Guardias"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sections.len(), 2);
        assert_eq!(config.sections[0].name, "Cirugías");
        assert_eq!(config.sections[0].goal.as_deref(), Some("250"));
        assert_eq!(config.sections[0].subsections.len(), 2);
        assert_eq!(config.sections[0].subsections[0].name, "Laparoscópicas");
        assert_eq!(config.sections[0].subsections[1].goal, None);

        assert_eq!(config.sections[1].name, "Guardias");
        assert!(config.sections[1].subsections.is_empty());
        assert_eq!(config.sections[1].goal, None);
    }

    #[test]
    fn test_missing_sections_key_is_error() {
        let result: std::result::Result<Config, _> = toml::from_str("");
        assert!(result.is_err());
    }
}
