use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use super::model::{port_from_value, Items, Preferences, PORT};
use super::storage::Storage;
use super::validator::validator_for;
use crate::error::{Error, Result};

/// Result of a save that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to store: no recognized fields, or all equal to the current values
    Unchanged,
    Saved {
        /// Fields written to storage
        persisted: Vec<String>,
        /// Fields equal to their default, erased from storage
        reset: Vec<String>,
    },
}

/// Reads the stored preferences, with defaults for anything missing
///
/// A stored value that fails validation is replaced by its default and
/// erased from storage.
pub async fn fetch<S: Storage>(storage: &S) -> Result<Preferences> {
    let defaults = Preferences::default().to_items();
    let stored = storage.get(&defaults).await?;

    let mut merged = Items::new();
    let mut invalid = Vec::new();
    for (key, value) in stored {
        if !Preferences::is_field(&key) {
            continue;
        }
        let valid = validator_for(&key).map_or(true, |validator| validator.check(&value));
        if valid {
            merged.insert(key, value);
        } else {
            warn!("Dropping invalid stored value for {}: {}", key, value);
            invalid.push(key);
        }
    }
    if !invalid.is_empty() {
        storage.remove(&invalid).await?;
    }
    Preferences::merged(&Preferences::default(), &merged)
}

/// Session view of the preferences
///
/// Holds the last loaded or saved values and writes only the fields that
/// differ from the defaults. Subscribers see every change to those values.
#[derive(Debug)]
pub struct PreferenceStore<S: Storage> {
    storage: S,
    last: Preferences,
    notifier: watch::Sender<Preferences>,
}

impl<S: Storage> PreferenceStore<S> {
    /// Starts a session with the values currently in `storage`
    pub async fn load(storage: S) -> Result<Self> {
        let last = fetch(&storage).await?;
        info!("Loaded preferences: host={} port={}", last.host, last.port);
        let (notifier, _) = watch::channel(last.clone());
        Ok(Self {
            storage,
            last,
            notifier,
        })
    }

    pub fn defaults() -> Preferences {
        Preferences::default()
    }

    pub fn last(&self) -> &Preferences {
        &self.last
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.notifier.subscribe()
    }

    /// Reads the stored values again without touching the session
    pub async fn get(&self) -> Result<Preferences> {
        fetch(&self.storage).await
    }

    /// Validates and saves `candidate`
    ///
    /// Unknown fields are dropped. A single invalid field rejects the whole
    /// candidate with [`Error::InvalidOption`] and leaves both storage and the
    /// session untouched.
    #[instrument(level = "debug", skip_all)]
    pub async fn set(&mut self, candidate: impl Into<Items>) -> Result<SaveOutcome> {
        let candidate = self.validate(candidate.into())?;

        if candidate.is_empty() {
            debug!("No recognized preference fields to save");
            return Ok(SaveOutcome::Unchanged);
        }
        if candidate
            .iter()
            .all(|(key, value)| self.last.item(key).as_ref() == Some(value))
        {
            debug!("Preferences unchanged, skipping storage write");
            return Ok(SaveOutcome::Unchanged);
        }

        let updated = Preferences::merged(&self.last, &candidate)?;
        let defaults = Preferences::default();

        let (reset, persist): (Items, Items) = candidate
            .into_iter()
            .partition(|(key, value)| defaults.item(key).as_ref() == Some(value));
        let reset: Vec<String> = reset.into_iter().map(|(key, _)| key).collect();
        let persisted: Vec<String> = persist.keys().cloned().collect();

        if !reset.is_empty() {
            debug!("Resetting preferences to defaults: {:?}", reset);
            self.storage.remove(&reset).await?;
        }
        if !persist.is_empty() {
            debug!("Persisting preferences: {:?}", persisted);
            self.storage.set(persist).await?;
        }

        info!("Saved preferences: host={} port={}", updated.host, updated.port);
        self.last = updated;
        self.notifier.send_replace(self.last.clone());

        Ok(SaveOutcome::Saved { persisted, reset })
    }

    fn validate(&self, candidate: Items) -> Result<Items> {
        let mut valid = Items::new();
        for (key, value) in candidate {
            if !Preferences::is_field(&key) {
                debug!("Dropping unknown preference field {}", key);
                continue;
            }
            if let Some(validator) = validator_for(&key) {
                if !validator.check(&value) {
                    warn!("Rejected preference {}={}", key, value);
                    return Err(Error::InvalidOption {
                        field: key,
                        value: value.to_string(),
                    });
                }
            }
            valid.insert(key.clone(), normalize(&key, value));
        }
        Ok(valid)
    }
}

// 8080.0 and 8080 must compare equal against stored values
fn normalize(key: &str, value: Value) -> Value {
    if key == PORT {
        if let Some(port) = port_from_value(&value) {
            return Value::from(port);
        }
    }
    value
}
