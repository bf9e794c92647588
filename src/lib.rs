//! Export links for zakupki.gov.ru search pages.
//!
//! A search page URL is rewritten to the portal's CSV export endpoint and then
//! wrapped into an RSS link served by a local proxy. The proxy address comes
//! from a small preference store that only persists values differing from
//! the defaults.

pub mod error;
pub mod popup;
pub mod preferences;
pub mod rewrite;
pub mod settings;
pub mod url_parser;
pub mod utils;

pub use error::{Error, Result};
pub use popup::{export_link, ActiveTab, FixedTab};
pub use preferences::{JsonFileStorage, MemoryStorage, PreferenceStore, Preferences, Storage};
pub use rewrite::{is_valid_search_url, make_proxy_rss_url, rewrite, SearchPathKind};
pub use url_parser::{QueryString, UrlModel};
