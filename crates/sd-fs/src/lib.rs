//! Filesystem-backed persistence for ServiceDesk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sd_core::{CoreError, CoreResult, RecordStore, StoreKey};

/// Default directory name for the data directory and config folder.
pub const DATA_DIR_NAME: &str = "servicedesk";

/// Environment variable overriding the data directory.
pub const DATA_PATH_ENV: &str = "SERVICEDESK_PATH";

/// File name of the application log inside the data directory.
pub const LOG_FILE_NAME: &str = "servicedesk.log";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Record store keeping one JSON document per key under a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at the provided path. Nothing is created on disk.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the root path of the store.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve the default data path (~/.servicedesk).
    pub fn default_path() -> CoreResult<PathBuf> {
        if let Some(dir) = dirs::home_dir() {
            return Ok(dir.join(format!(".{DATA_DIR_NAME}")));
        }
        Err(CoreError::Storage(
            "unable to determine a default data path".into(),
        ))
    }

    /// Check if the data directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Create the data directory.
    pub fn init(&self) -> CoreResult<()> {
        if self.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.root).map_err(|err| CoreError::Storage(err.to_string()))?;
        tracing::info!(path = %self.root.display(), "initialized data directory");
        Ok(())
    }

    /// Path of the log file inside the data directory.
    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE_NAME)
    }

    fn key_path(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl RecordStore for FsStore {
    fn read(&self, key: StoreKey) -> CoreResult<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|err| CoreError::Storage(format!("{}: {err}", path.display())))
    }

    fn write(&self, key: StoreKey, contents: &str) -> CoreResult<()> {
        let path = self.key_path(key);
        fs::create_dir_all(&self.root).map_err(|err| CoreError::Storage(err.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        let storage = |err: std::io::Error| CoreError::Storage(format!("{}: {err}", path.display()));
        let mut file = File::create(&tmp).map_err(storage)?;
        file.write_all(contents.as_bytes()).map_err(storage)?;
        file.sync_all().map_err(storage)?;
        fs::rename(&tmp, &path).map_err(storage)?;
        Ok(())
    }
}

/// Contents of the user config file.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: Option<String>,
}

fn config_path() -> CoreResult<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        return Ok(dir.join(DATA_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    Err(CoreError::Storage(
        "unable to determine config directory".into(),
    ))
}

pub fn load_config() -> CoreResult<StoreConfig> {
    read_config(&config_path()?)
}

pub fn save_config(config: &StoreConfig) -> CoreResult<()> {
    write_config(&config_path()?, config)
}

/// Remember `path` as the data directory in the user config file.
pub fn set_config_path(path: &Path) -> CoreResult<()> {
    let config = StoreConfig {
        path: Some(path.to_string_lossy().to_string()),
    };
    save_config(&config)
}

fn read_config(path: &Path) -> CoreResult<StoreConfig> {
    if !path.exists() {
        return Ok(StoreConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| CoreError::Storage(err.to_string()))?;
    serde_yaml::from_str(&contents).map_err(|err| CoreError::Storage(err.to_string()))
}

fn write_config(path: &Path, config: &StoreConfig) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| CoreError::Storage(err.to_string()))?;
    }
    let contents =
        serde_yaml::to_string(config).map_err(|err| CoreError::Storage(err.to_string()))?;
    fs::write(path, contents).map_err(|err| CoreError::Storage(err.to_string()))?;
    Ok(())
}

/// Resolve the data directory: explicit override, then `SERVICEDESK_PATH`,
/// then the config file, then the default path.
pub fn resolve_data_path(override_path: Option<&Path>) -> CoreResult<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(value) = std::env::var(DATA_PATH_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }

    let config = load_config()?;
    if let Some(path) = config.path {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    FsStore::default_path()
}
