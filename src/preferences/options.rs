use std::fmt;

use tracing::debug;

use super::model::{Preferences, DEFAULT_PORT};
use super::storage::Storage;
use super::store::PreferenceStore;
use super::validator::{HostValidator, PortValidator, Validator};
use crate::error::Result;

/// Message shown to the user after pressing "save"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMessage {
    InvalidHost,
    InvalidPort,
    Saved,
}

impl SaveMessage {
    pub fn text(self) -> &'static str {
        match self {
            SaveMessage::InvalidHost => "Введен не правильный хост",
            SaveMessage::InvalidPort => "Введен не правильный порт",
            SaveMessage::Saved => "Настройки сохранены",
        }
    }

    pub fn is_error(self) -> bool {
        self != SaveMessage::Saved
    }
}

impl fmt::Display for SaveMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Enabled/disabled flags of the options page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormState {
    pub port_input_disabled: bool,
    pub use_custom_port: bool,
    pub restore_defaults_enabled: bool,
    pub restore_last_enabled: bool,
    pub save_enabled: bool,
}

/// Text contents of the options page, independent of any UI toolkit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsForm {
    pub host: String,
    pub port: String,
}

impl OptionsForm {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            host: prefs.host.clone(),
            port: prefs.port.to_string(),
        }
    }

    /// Compares the form text with saved values the way a user would
    ///
    /// `"080"` and `" 80"` both equal port 80.
    pub fn matches(&self, prefs: &Preferences) -> bool {
        self.host == prefs.host && port_text_equals(&self.port, prefs.port)
    }

    pub fn state(&self, last: &Preferences) -> FormState {
        let default_port = port_text_equals(&self.port, DEFAULT_PORT);
        let unchanged = self.matches(last);
        FormState {
            port_input_disabled: default_port,
            use_custom_port: !default_port,
            restore_defaults_enabled: !self.matches(&Preferences::default()),
            restore_last_enabled: !unchanged,
            save_enabled: !unchanged,
        }
    }

    pub fn restore_defaults(&mut self) {
        *self = Self::from_preferences(&Preferences::default());
    }

    pub fn restore_last(&mut self, last: &Preferences) {
        *self = Self::from_preferences(last);
    }

    /// Checking the box clears the port for typing; unchecking restores the default
    pub fn toggle_custom_port(&mut self, checked: bool) {
        self.port = if checked {
            String::new()
        } else {
            DEFAULT_PORT.to_string()
        };
    }

    /// Validates the form and saves it into `store`
    ///
    /// The host is checked before the port; only a fully valid form reaches
    /// the store.
    pub async fn save<S: Storage>(&self, store: &mut PreferenceStore<S>) -> Result<SaveMessage> {
        if !HostValidator.check(self.host.as_str()) {
            debug!("Options form has invalid host {:?}", self.host);
            return Ok(SaveMessage::InvalidHost);
        }
        let port = match parse_leading_int(&self.port) {
            Some(port) if PortValidator.check(&port) => port as u16,
            _ => {
                debug!("Options form has invalid port {:?}", self.port);
                return Ok(SaveMessage::InvalidPort);
            }
        };

        store.set(Preferences::new(self.host.clone(), port)).await?;
        Ok(SaveMessage::Saved)
    }
}

fn port_text_equals(text: &str, port: u16) -> bool {
    loose_number(text).is_some_and(|value| value == f64::from(port))
}

/// Reads `text` as a whole number literal the way a form field compares
///
/// Accepts decimals with exponents, `0x`/`0o`/`0b` integers and `Infinity`.
/// Blank text, `NaN` and trailing garbage give `None`.
fn loose_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
        });
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // str::parse also takes "inf" and "nan"
    if text.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    text.parse().ok()
}

/// Reads the integer at the start of `text`, ignoring anything after it
///
/// Leading whitespace and a sign are allowed; `"8080abc"` gives 8080 and a
/// string without leading digits gives `None`.
pub fn parse_leading_int(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let value: f64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
