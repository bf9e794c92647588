use tracing::{debug, info};

use crate::error::Result;
use crate::preferences::Preferences;
use crate::rewrite::{is_valid_search_url, make_proxy_rss_url, rewrite};
use crate::url_parser::{QueryString, UrlModel};

/// Source of the URL the user is currently looking at
pub trait ActiveTab {
    fn current_url(&self) -> Result<String>;
}

/// A tab whose URL is known up front, e.g. from the command line
#[derive(Debug, Clone)]
pub struct FixedTab(pub String);

impl ActiveTab for FixedTab {
    fn current_url(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Builds the proxy RSS link for a portal search page
///
/// The page URL is rewritten to its export endpoint and passed to the proxy
/// in the `url` parameter.
///
/// # Arguments
/// * `tab_url` - URL of the page the user is looking at
/// * `prefs` - Proxy host and port to point the link at
///
/// # Returns
/// * `Result<Option<String>>` - The link, `None` for pages that are not portal
///   searches, or `InvalidUrl` when `tab_url` does not parse
pub fn export_link(tab_url: &str, prefs: &Preferences) -> Result<Option<String>> {
    let url = UrlModel::parse(tab_url)?;
    if !is_valid_search_url(&url) {
        debug!("Not a portal search page: {}", tab_url);
        return Ok(None);
    }

    let rewritten = rewrite(url)?;
    let query: QueryString = [("url", rewritten.to_string())].into_iter().collect();
    let link = make_proxy_rss_url(&prefs.host, &prefs.port.to_string(), &query);
    info!("Generated export link: {}", link);
    Ok(Some(link))
}

pub fn export_link_for_tab(tab: &impl ActiveTab, prefs: &Preferences) -> Result<Option<String>> {
    export_link(&tab.current_url()?, prefs)
}
