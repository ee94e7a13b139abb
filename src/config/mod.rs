use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_rest_minutes")]
    pub rest_minutes: u32,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_dir() -> String {
    Config::config_dir()
        .join("logs")
        .to_string_lossy()
        .to_string()
}
fn default_work_minutes() -> u32 {
    45
}
fn default_rest_minutes() -> u32 {
    10
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            work_minutes: default_work_minutes(),
            rest_minutes: default_rest_minutes(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// `~/.rworklog` (or `./.rworklog` when no home directory is known)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rworklog")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworklog.conf")
    }

    /// Where diagnostic logs are written
    pub fn log_dir() -> PathBuf {
        Self::config_dir().join("log")
    }

    /// The day files directory with `~` expanded
    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write this configuration to the config file, creating the directory.
    pub fn save(&self) -> AppResult<PathBuf> {
        fs::create_dir_all(Self::config_dir())?;
        let path = Self::config_file();
        fs::write(&path, self.to_yaml()?)?;
        Ok(path)
    }
}
