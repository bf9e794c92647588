use thiserror::Error;

/// Errors produced by the link rewriting core and the preference store
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid option value for {field}: {value}")]
    InvalidOption { field: String, value: String },

    #[error("Required type is {0}")]
    RequiredType(&'static str),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
