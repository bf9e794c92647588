use tracing::{debug, trace};
use url::Url;

use super::paths::SEARCH_PATHS;

/// Host suffix the page action is registered for
pub const PORTAL_HOST_SUFFIX: &str = "zakupki.gov.ru";

/// A committed top-level navigation reported by the browser
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    pub tab_id: u32,
    pub url: String,
}

/// Browser side of the page action icon
pub trait PageAction {
    fn show(&self, tab_id: u32);
}

/// Decides whether a navigation lands on a portal search page
///
/// Mirrors the `(hostSuffix, pathEquals)` pairs the extension registers: any
/// scheme, any host ending in the portal domain, one of the search paths.
#[derive(Debug, Clone)]
pub struct NavigationFilter {
    host_suffix: String,
    paths: Vec<String>,
}

impl Default for NavigationFilter {
    fn default() -> Self {
        Self {
            host_suffix: PORTAL_HOST_SUFFIX.to_string(),
            paths: SEARCH_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl NavigationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            trace!("Ignoring unparsable navigation URL: {}", url);
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        host.ends_with(&self.host_suffix) && self.paths.iter().any(|p| p == parsed.path())
    }

    /// Shows the page action for matching navigations, returns whether it did
    pub fn on_committed(&self, event: &NavigationEvent, action: &impl PageAction) -> bool {
        if !self.matches(&event.url) {
            return false;
        }
        debug!("Showing page action for tab {} at {}", event.tab_id, event.url);
        action.show(event.tab_id);
        true
    }
}
