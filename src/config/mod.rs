use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use crate::{
    core::utils::{app_data_dir, data_file, ensure_dir},
    errors::LedgerError,
};

const CONFIG_FILE: &str = "config.json";

/// User-tunable settings for the shell and the backing store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the managed transaction-file location when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Display label prefixed to rendered amounts. Label only; the core does
    /// no currency arithmetic or locale handling.
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: "₹".into(),
        }
    }
}

impl Config {
    /// Resolved transaction-file path: the explicit override when present,
    /// otherwise the managed default.
    pub fn data_file_path(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(data_file)
    }
}

/// Loads and saves the JSON configuration file in the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(app_data_dir())
    }

    /// Builds a manager rooted at an explicit directory; test harnesses use
    /// this to stay out of the real home directory.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load defaults");
        assert_eq!(config.currency_symbol, "₹");
        assert!(config.data_file.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");

        let config = Config {
            data_file: Some(temp.path().join("elsewhere.csv")),
            currency_symbol: "$".into(),
        };
        manager.save(&config).expect("save config");

        let loaded = manager.load().expect("reload config");
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.data_file_path(), temp.path().join("elsewhere.csv"));
    }
}
