use std::fmt;
use std::str::FromStr;

use tracing::{debug, error};
use url::Url;

use super::query::QueryString;
use crate::error::{Error, Result};

/// A URL split into the components the rewrite engine works with
///
/// `query` keeps its leading `?` and `fragment` its leading `#`, both empty
/// when absent. `port` is empty when the URL uses the scheme default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlModel {
    scheme: String,
    username: String,
    password: Option<String>,
    hostname: String,
    port: String,
    path: String,
    query: String,
    fragment: String,
}

impl UrlModel {
    /// Parses an absolute URL string
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            error!("Received empty URL");
            return Err(Error::InvalidUrl {
                url: String::new(),
                reason: "URL cannot be empty".to_string(),
            });
        }

        let parsed = Url::parse(raw).map_err(|e| {
            error!("Failed to parse URL '{}': {}", raw, e);
            Error::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            }
        })?;

        let model = UrlModel {
            scheme: parsed.scheme().to_string(),
            username: parsed.username().to_string(),
            password: parsed.password().map(String::from),
            hostname: parsed.host_str().unwrap_or("").to_string(),
            port: parsed.port().map(|p| p.to_string()).unwrap_or_default(),
            path: parsed.path().to_string(),
            query: prefixed('?', parsed.query()),
            fragment: prefixed('#', parsed.fragment()),
        };
        debug!("Parsed URL model: {:?}", model);
        Ok(model)
    }

    /// Parses the stored query into a [`QueryString`]
    pub fn query(&self) -> QueryString {
        QueryString::parse(&self.query)
    }

    pub fn raw_query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &QueryString) {
        self.query = query.to_string();
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

fn prefixed(prefix: char, component: Option<&str>) -> String {
    match component {
        Some(value) if !value.is_empty() => format!("{}{}", prefix, value),
        _ => String::new(),
    }
}

impl fmt::Display for UrlModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}://", self.scheme.trim_end_matches(':'))?;
        }
        if !self.username.is_empty() {
            f.write_str(&self.username)?;
            if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
                write!(f, ":{}", password)?;
            }
            f.write_str("@")?;
        }
        f.write_str(&self.hostname)?;
        // port 80 is dropped whatever the scheme
        if !self.port.is_empty() && self.port != "80" {
            write!(f, ":{}", self.port)?;
        }
        if !self.path.is_empty() {
            if !self.path.starts_with('/') {
                f.write_str("/")?;
            }
            f.write_str(&self.path)?;
        }
        if !self.query.is_empty() {
            if !self.query.starts_with('?') {
                f.write_str("?")?;
            }
            f.write_str(&self.query)?;
        }
        if !self.fragment.is_empty() {
            if !self.fragment.starts_with('#') {
                f.write_str("#")?;
            }
            f.write_str(&self.fragment)?;
        }
        Ok(())
    }
}

impl FromStr for UrlModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UrlModel::parse(s)
    }
}

impl TryFrom<&str> for UrlModel {
    type Error = Error;

    fn try_from(url_str: &str) -> Result<Self> {
        UrlModel::parse(url_str)
    }
}
