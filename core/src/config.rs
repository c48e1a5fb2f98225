//! Runtime configuration.
//!
//! Names the dictionary resources and a few conversion switches. Designed to
//! be deserialized from TOML; every field has a default so a partial file
//! works:
//!
//! ```toml
//! dict_dir = "/usr/share/hanpin"
//! general_tiers = ["words_0.dict", "words_1.dict"]
//! surname_tiers = ["surnames.dict"]
//! delimiter = "_"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "HANPIN_CONFIG";
/// Environment variable overriding `dict_dir`.
pub const DICT_DIR_ENV: &str = "HANPIN_DICT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory relative tier paths are resolved against.
    pub dict_dir: PathBuf,

    /// General tiers, most specific first.
    pub general_tiers: Vec<PathBuf>,

    /// Surname tiers, consulted only in name mode.
    pub surname_tiers: Vec<PathBuf>,

    /// Delimiter the CLI uses for permalink/abbreviation output when none is
    /// given on the command line. Library calls always take it explicitly.
    pub delimiter: String,

    /// Remove stray non-ASCII symbols (emoji etc.) before substitution.
    pub strip_symbols: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dict_dir: PathBuf::from("dict"),
            general_tiers: (0..6)
                .map(|i| PathBuf::from(format!("words_{i}.dict")))
                .collect(),
            surname_tiers: vec![PathBuf::from("surnames.dict")],
            delimiter: "-".to_string(),
            strip_symbols: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        // a relative dict_dir is relative to the config file
        if config.dict_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.dict_dir = parent.join(&config.dict_dir);
            }
        }
        Ok(config)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Defaults, then `HANPIN_CONFIG` (a TOML file) if set, then
    /// `HANPIN_DICT_DIR` if set.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_toml(PathBuf::from(path))?,
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os(DICT_DIR_ENV) {
            config.dict_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn with_dict_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.dict_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.general_tiers.is_empty() && self.surname_tiers.is_empty() {
            return Err(Error::InvalidConfig("no dictionary tiers configured".into()));
        }
        Ok(())
    }

    /// General tier paths resolved against `dict_dir`.
    pub fn general_paths(&self) -> Vec<PathBuf> {
        self.resolve(&self.general_tiers)
    }

    /// Surname tier paths resolved against `dict_dir`.
    pub fn surname_paths(&self) -> Vec<PathBuf> {
        self.resolve(&self.surname_tiers)
    }

    fn resolve(&self, tiers: &[PathBuf]) -> Vec<PathBuf> {
        tiers.iter().map(|p| self.dict_dir.join(p)).collect()
    }
}
