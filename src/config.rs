//! Run configuration.
//!
//! Defaults describe the MeteoSwiss IDAweb export layout. Any field can be
//! overridden from a TOML file; absent fields keep their default.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

const CONFIG_DIR: &str = "station-series";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub legend_suffix: String,
    pub data_suffix: String,
    pub missing_values_dir: String,
    pub station_column: String,
    pub time_column: String,
    pub file_key: FileKeyConfig,
    /// Written into the header of the `.cli` index file.
    pub author: String,
    pub temperature: TemperatureConfig,
    pub wind: WindConfig,
}

/// Token positions in an underscore-delimited data file name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileKeyConfig {
    pub station_position: usize,
    pub parameter_position: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemperatureConfig {
    pub min_column: String,
    pub max_column: String,
    pub extension: String,
    pub description: String,
    pub name_noise: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindConfig {
    pub column: String,
    pub extension: String,
    pub description: String,
    pub name_noise: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            legend_suffix: "_legend.txt".to_string(),
            data_suffix: "_data.txt".to_string(),
            missing_values_dir: "missed_values".to_string(),
            station_column: "stn".to_string(),
            time_column: "time".to_string(),
            file_key: FileKeyConfig::default(),
            author: "unknown".to_string(),
            temperature: TemperatureConfig::default(),
            wind: WindConfig::default(),
        }
    }
}

impl Default for FileKeyConfig {
    fn default() -> Self {
        FileKeyConfig {
            station_position: 2,
            parameter_position: 3,
        }
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        TemperatureConfig {
            min_column: "tre200dn".to_string(),
            max_column: "tre200dx".to_string(),
            extension: "tmp".to_string(),
            description: "Temperature".to_string(),
            name_noise: Vec::new(),
        }
    }
}

impl Default for WindConfig {
    fn default() -> Self {
        let column = "fkl010d0".to_string();
        WindConfig {
            name_noise: vec![
                column.clone(),
                "meteoschweiz".to_string(),
                "schweiz".to_string(),
                "meteo".to_string(),
            ],
            column,
            extension: "wnd".to_string(),
            description: "Wind speed".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path` if given, else the per-user config file if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };

        match path {
            Some(p) => {
                tracing::debug!("Loading configuration from {}", p.display());
                let text = fs::read_to_string(&p).map_err(|source| Error::ConfigRead {
                    path: p.clone(),
                    source,
                })?;
                Config::from_toml(&text)
            }
            None => Ok(Config::default()),
        }
    }

    pub fn missing_values_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.missing_values_dir)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_meteoswiss_columns() {
        let config = Config::default();

        assert_eq!(config.temperature.min_column, "tre200dn");
        assert_eq!(config.temperature.max_column, "tre200dx");
        assert_eq!(config.wind.column, "fkl010d0");
        assert_eq!(config.wind.name_noise[0], "fkl010d0");
        assert_eq!(config.file_key.station_position, 2);
    }

    #[test]
    fn should_override_subset_from_toml() {
        let text = r#"
            author = "Hydrology Lab"

            [wind]
            column = "fu3010d0"
            extension = "wnd"
        "#;
        let config = Config::from_toml(text).unwrap();

        assert_eq!(config.author, "Hydrology Lab");
        assert_eq!(config.wind.column, "fu3010d0");
        assert_eq!(config.wind.description, "Wind speed");
        assert_eq!(config.temperature, TemperatureConfig::default());
    }

    #[test]
    fn should_reject_unknown_keys() {
        assert!(Config::from_toml("colour = \"blue\"").is_err());
    }

    #[test]
    fn should_load_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "missing_values_dir = \"gaps\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.missing_values_path(Path::new("out")), Path::new("out/gaps"));
    }

    #[test]
    fn should_name_unreadable_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::load(Some(&path)).unwrap_err();

        assert!(matches!(err, Error::ConfigRead { path: ref p, .. } if *p == path));
        assert!(err.to_string().contains("absent.toml"));
    }
}
