pub mod engine;
pub mod navigation;
pub mod paths;

pub use engine::{is_valid_search_url, make_proxy_rss_url, rewrite, EXPORT_COLUMNS, PORTAL_HOSTS};
pub use navigation::{NavigationEvent, NavigationFilter, PageAction};
pub use paths::{classify, SearchPathKind};
