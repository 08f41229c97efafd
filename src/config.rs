//! Client configuration.
//!
//! Precedence: explicit path > `DOCFILTER_CONFIG` > `~/.config/docfilter.toml` > `./docfilter.toml`,
//! with the first readable file winning per field, then environment overrides for the
//! connection settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::FilterError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub connection_string: Option<String>,
    pub database_name: Option<String>,
    pub collection_name: Option<String>,
    pub default_page_size: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Where a driver connects: the validated connection fields of a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub connection_string: String,
    pub database_name: String,
    pub collection_name: String,
}

impl ClientConfig {
    /// Connection fields for a driver constructor. Blank values count as missing.
    ///
    /// # Errors
    /// Returns `FilterError::Config` naming the first missing field.
    pub fn connection(&self) -> Result<ConnectionSettings, FilterError> {
        fn required(value: Option<&String>, name: &str) -> Result<String, FilterError> {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .ok_or_else(|| FilterError::Config(format!("{name} is not set")))
        }
        Ok(ConnectionSettings {
            connection_string: required(self.connection_string.as_ref(), "connection_string")?,
            database_name: required(self.database_name.as_ref(), "database_name")?,
            collection_name: required(self.collection_name.as_ref(), "collection_name")?,
        })
    }

    /// Parses one TOML document.
    ///
    /// # Errors
    /// Returns `FilterError::Config` for invalid TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, FilterError> {
        toml::from_str(s).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// # Errors
    /// Returns `FilterError::Io` if the file cannot be read and `FilterError::Config` if it is
    /// not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, FilterError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }

    /// Fills every unset field from `other`.
    pub fn merge_missing(&mut self, other: Self) {
        if self.connection_string.is_none() {
            self.connection_string = other.connection_string;
        }
        if self.database_name.is_none() {
            self.database_name = other.database_name;
        }
        if self.collection_name.is_none() {
            self.collection_name = other.collection_name;
        }
        if self.default_page_size.is_none() {
            self.default_page_size = other.default_page_size;
        }
        if self.log_dir.is_none() {
            self.log_dir = other.log_dir;
        }
        if self.log_level.is_none() {
            self.log_level = other.log_level;
        }
    }

    /// Applies `DOCFILTER_CONNECTION_STRING`, `DOCFILTER_DATABASE`, `DOCFILTER_COLLECTION`.
    pub fn apply_env(&mut self) {
        if let Ok(s) = std::env::var("DOCFILTER_CONNECTION_STRING") {
            self.connection_string = Some(s);
        }
        if let Ok(s) = std::env::var("DOCFILTER_DATABASE") {
            self.database_name = Some(s);
        }
        if let Ok(s) = std::env::var("DOCFILTER_COLLECTION") {
            self.collection_name = Some(s);
        }
    }

    /// Loads from the candidate files in precedence order, then applies the environment.
    /// An explicitly given path must exist and parse; other candidates are skipped with a
    /// warning when broken.
    ///
    /// # Errors
    /// Returns an error only for a bad explicit path.
    pub fn load(explicit: Option<&Path>) -> Result<Self, FilterError> {
        let mut cfg = match explicit {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        for p in candidate_paths() {
            if !p.exists() {
                continue;
            }
            match Self::from_file(&p) {
                Ok(file_cfg) => cfg.merge_missing(file_cfg),
                Err(e) => log::warn!("ignoring config {}: {e}", p.display()),
            }
        }
        cfg.apply_env();
        Ok(cfg)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(p) = std::env::var("DOCFILTER_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Some(home) = dirs_next::home_dir() {
        paths.push(home.join(".config").join("docfilter.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("docfilter.toml"));
    }
    paths
}
