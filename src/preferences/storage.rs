use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::model::Items;
use crate::error::Result;

/// Key-value store holding the persisted preference fields
///
/// Each call is a single request; a resolved future is the completion signal.
pub trait Storage {
    /// Reads every key of `defaults`, falling back to its value when absent
    fn get(&self, defaults: &Items) -> impl Future<Output = Result<Items>>;
    fn set(&self, values: Items) -> impl Future<Output = Result<()>>;
    fn remove(&self, keys: &[String]) -> impl Future<Output = Result<()>>;
}

fn with_defaults(stored: &Items, defaults: &Items) -> Items {
    defaults
        .iter()
        .map(|(key, default)| {
            let value = stored.get(key).unwrap_or(default);
            (key.clone(), value.clone())
        })
        .collect()
}

/// Process-local storage, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<Items>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Items) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    /// Copy of everything currently stored
    pub async fn snapshot(&self) -> Items {
        self.items.lock().await.clone()
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, defaults: &Items) -> Result<Items> {
        let stored = self.items.lock().await;
        Ok(with_defaults(&stored, defaults))
    }

    async fn set(&self, values: Items) -> Result<()> {
        trace!("Storing {} value(s) in memory", values.len());
        self.items.lock().await.extend(values);
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        let mut stored = self.items.lock().await;
        for key in keys {
            stored.remove(key);
        }
        Ok(())
    }
}

/// Storage backed by a JSON object in a file
///
/// A missing file reads as an empty store and is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Items> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Items::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Preference file {} not found, using empty store", self.path.display());
                Ok(Items::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, items: Items) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(items))?;
        tokio::fs::write(&self.path, content).await?;
        debug!("Wrote preference file {}", self.path.display());
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    async fn get(&self, defaults: &Items) -> Result<Items> {
        let stored = self.read().await?;
        Ok(with_defaults(&stored, defaults))
    }

    async fn set(&self, values: Items) -> Result<()> {
        let mut stored = self.read().await?;
        stored.extend(values);
        self.write(stored).await
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        let mut stored = self.read().await?;
        let before = stored.len();
        for key in keys {
            stored.remove(key);
        }
        if stored.len() == before {
            return Ok(());
        }
        self.write(stored).await
    }
}
