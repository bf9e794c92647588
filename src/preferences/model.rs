use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Raw preference fields as they travel to and from storage
pub type Items = Map<String, Value>;

pub const HOST: &str = "Host";
pub const PORT: &str = "Port";

pub const DEFAULT_HOST: &str = "proxy-zakupki-gov-ru.local";
pub const DEFAULT_PORT: u16 = 80;

/// Address of the RSS proxy the export links point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "Host")]
    pub host: String,
    #[serde(rename = "Port")]
    pub port: u16,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Preferences {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Names of the recognized fields
    pub fn fields() -> [&'static str; 2] {
        [HOST, PORT]
    }

    pub fn is_field(key: &str) -> bool {
        Self::fields().contains(&key)
    }

    pub fn to_items(&self) -> Items {
        let mut items = Items::new();
        items.insert(HOST.to_string(), Value::from(self.host.clone()));
        items.insert(PORT.to_string(), Value::from(self.port));
        items
    }

    /// Reads recognized fields from `items`, taking the rest from `base`
    ///
    /// Values must already be valid; a wrong type is reported as
    /// `InvalidOption`.
    pub fn merged(base: &Preferences, items: &Items) -> Result<Self> {
        let mut prefs = base.clone();
        if let Some(value) = items.get(HOST) {
            prefs.host = value
                .as_str()
                .ok_or_else(|| invalid(HOST, value))?
                .to_string();
        }
        if let Some(value) = items.get(PORT) {
            prefs.port = port_from_value(value).ok_or_else(|| invalid(PORT, value))?;
        }
        Ok(prefs)
    }

    /// Current value of a recognized field
    pub fn item(&self, key: &str) -> Option<Value> {
        match key {
            HOST => Some(Value::from(self.host.clone())),
            PORT => Some(Value::from(self.port)),
            _ => None,
        }
    }
}

impl From<Preferences> for Items {
    fn from(prefs: Preferences) -> Self {
        prefs.to_items()
    }
}

impl From<&Preferences> for Items {
    fn from(prefs: &Preferences) -> Self {
        prefs.to_items()
    }
}

/// Integer port from a JSON number, accepting `8080.0` as well as `8080`
pub(crate) fn port_from_value(value: &Value) -> Option<u16> {
    let port = value.as_f64()?;
    if port.fract() != 0.0 || port < 0.0 || port > f64::from(u16::MAX) {
        return None;
    }
    Some(port as u16)
}

fn invalid(field: &str, value: &Value) -> Error {
    Error::InvalidOption {
        field: field.to_string(),
        value: value.to_string(),
    }
}
