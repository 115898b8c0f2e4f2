#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Runtime settings for the ASRS incident dashboard.
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional TOML file, then `ASRS_*` environment variables. Everything
//! downstream receives plain values (paths, year spans, a cache mode), never
//! the settings object itself.

use std::path::{Path, PathBuf};

use asrs_dashboard_dataset::cache::CacheMode;
use asrs_dashboard_incident_models::YearSpan;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Failed to read settings file {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`Settings`].
    #[error("Invalid settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Offending value.
        value: String,
    },
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `development` or `production`. Production caches the dataset.
    pub env: String,
    /// Directory holding the CSV exports.
    pub data_dir: PathBuf,
    /// File name of the 2001-2017 export.
    pub csv_2001_2017: String,
    /// File name of the 2018-2025 export.
    pub csv_2018_2025: String,
    /// Default baseline period.
    pub baseline: YearSpan,
    /// Default inference period.
    pub inference: YearSpan,
    /// Full-history period.
    pub longitudinal: YearSpan,
    /// Split year marked on the timeline.
    pub benchmark_year: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            data_dir: PathBuf::from("data"),
            csv_2001_2017: "raw_runway_incursion_data_Jan_2001_to_Dec_2017.csv".to_string(),
            csv_2018_2025: "raw_runway_incursion_data_Jan_2018_to_May_2025.csv".to_string(),
            baseline: YearSpan::new(2012, 2017),
            inference: YearSpan::new(2018, 2025),
            longitudinal: YearSpan::new(2001, 2025),
            benchmark_year: 2017,
        }
    }
}

fn parse_year(name: &str, value: &str) -> Result<i32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl Settings {
    /// Parses settings from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// * If the TOML is malformed or a value has the wrong type
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read
    /// * If the TOML is malformed or a value has the wrong type
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Applies `ASRS_*` overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// * If a year override is not an integer
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("ASRS_ENV") {
            self.env = env;
        }
        if let Some(dir) = lookup("ASRS_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(name) = lookup("ASRS_CSV_2001_2017") {
            self.csv_2001_2017 = name;
        }
        if let Some(name) = lookup("ASRS_CSV_2018_2025") {
            self.csv_2018_2025 = name;
        }

        let years: [(&str, &mut i32); 7] = [
            ("ASRS_BASELINE_START", &mut self.baseline.start),
            ("ASRS_BASELINE_END", &mut self.baseline.end),
            ("ASRS_INFERENCE_START", &mut self.inference.start),
            ("ASRS_INFERENCE_END", &mut self.inference.end),
            ("ASRS_LONGITUDINAL_START", &mut self.longitudinal.start),
            ("ASRS_LONGITUDINAL_END", &mut self.longitudinal.end),
            ("ASRS_BENCHMARK_YEAR", &mut self.benchmark_year),
        ];
        for (name, slot) in years {
            if let Some(value) = lookup(name) {
                *slot = parse_year(name, &value)?;
            }
        }

        Ok(())
    }

    /// Applies `ASRS_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// * If a year override is not an integer
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Defaults, then the optional file, then the environment.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read or parsed
    /// * If an environment override is invalid
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    /// Whether this is a production deployment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    /// Paths of the two CSV exports, oldest first.
    #[must_use]
    pub fn csv_paths(&self) -> [PathBuf; 2] {
        [
            self.data_dir.join(&self.csv_2001_2017),
            self.data_dir.join(&self.csv_2018_2025),
        ]
    }

    /// Eager caching in production, fresh loads otherwise.
    #[must_use]
    pub fn cache_mode(&self) -> CacheMode {
        if self.is_production() {
            CacheMode::EagerCached
        } else {
            CacheMode::AlwaysFresh
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.baseline, YearSpan::new(2012, 2017));
        assert_eq!(settings.inference, YearSpan::new(2018, 2025));
        assert_eq!(settings.longitudinal, YearSpan::new(2001, 2025));
        assert_eq!(settings.benchmark_year, 2017);
        assert!(!settings.is_production());
        assert_eq!(settings.cache_mode(), CacheMode::AlwaysFresh);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            env = "Production"
            data_dir = "/srv/asrs"

            [baseline]
            start = 2010
            end = 2015
            "#,
        )
        .unwrap();

        assert!(settings.is_production());
        assert_eq!(settings.cache_mode(), CacheMode::EagerCached);
        assert_eq!(settings.baseline, YearSpan::new(2010, 2015));
        assert_eq!(settings.inference, YearSpan::new(2018, 2025));
        assert_eq!(
            settings.csv_paths()[1],
            PathBuf::from("/srv/asrs/raw_runway_incursion_data_Jan_2018_to_May_2025.csv")
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = Settings::from_toml_str("benchmark_year = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::from_toml_str("env = \"production\"").unwrap();
        settings
            .apply_env_with(lookup(&[
                ("ASRS_ENV", "development"),
                ("ASRS_CSV_2001_2017", "old.csv"),
                ("ASRS_INFERENCE_START", "2019"),
                ("ASRS_BENCHMARK_YEAR", " 2018 "),
            ]))
            .unwrap();

        assert!(!settings.is_production());
        assert_eq!(settings.csv_2001_2017, "old.csv");
        assert_eq!(settings.inference, YearSpan::new(2019, 2025));
        assert_eq!(settings.benchmark_year, 2018);
    }

    #[test]
    fn invalid_env_year_is_rejected() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env_with(lookup(&[("ASRS_BASELINE_END", "last year")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref name, .. } if name == "ASRS_BASELINE_END"
        ));
    }

    #[test]
    fn reads_settings_file() {
        let dir = std::env::temp_dir().join(format!("asrs_config_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("asrs.toml");
        std::fs::write(&path, "benchmark_year = 2015\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.benchmark_year, 2015);

        let missing = Settings::from_file(&dir.join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
