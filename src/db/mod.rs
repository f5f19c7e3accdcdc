//! Best-effort key/value storage backing the signed-in session.

pub mod seed;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::{AppError, AppResult};

pub const AUTH_KEY: &str = "isAuthenticated";
pub const USER_KEY: &str = "user";

pub trait LocalStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&mut self, key: &str) -> AppResult<()>;
    fn clear(&mut self) -> AppResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.items.clear();
        Ok(())
    }
}

/// Storage persisted as one JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStorage {
    /// Opens `path`, starting empty when the file is missing or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring malformed storage file {}: {}", path.display(), err);
                BTreeMap::new()
            }),
            Err(err) => {
                debug!("No storage file at {} ({}), starting empty", path.display(), err);
                BTreeMap::new()
            }
        };
        JsonFileStorage { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, raw).map_err(|err| {
            AppError::Storage(format!("failed to write {}: {}", self.path.display(), err))
        })
    }
}

impl LocalStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> AppResult<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.items.clear();
        self.flush()
    }
}
