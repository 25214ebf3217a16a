use crate::error::{CoinCollectionError, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "coin-collection";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding every collection
    pub database_path: Option<PathBuf>,
    /// Directory used by export and import
    pub backup_dir: Option<PathBuf>,
    /// Overrides the clock when resolving series still in production
    pub current_year: Option<i32>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoinCollectionError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join(APP_DIR).join("config.json"))
    }

    fn data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| CoinCollectionError::Config("Data directory not found".into()))?;
        Ok(base.join(APP_DIR))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("collections.db")),
        }
    }

    pub fn backup_dir(&self) -> Result<PathBuf> {
        match &self.backup_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("coin-collection-app-files")),
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}
