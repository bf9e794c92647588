use crate::error::{Error, Result};

pub const EXTENDED_SEARCH_PATH: &str = "/epz/order/extendedsearch/search.html";
pub const QUICK_SEARCH_PATH: &str = "/epz/order/quicksearch/search.html";
pub const QUICK_SEARCH_UPDATE_PATH: &str = "/epz/order/quicksearch/update.html";

pub const EXTENDED_DOWNLOAD_PATH: &str = "/epz/order/orderCsvSettings/extendedSearch/download.html";
pub const QUICK_DOWNLOAD_PATH: &str = "/epz/order/orderCsvSettings/quickSearch/download.html";

/// Search pages a user can turn into an export link
pub const SEARCH_PATHS: [&str; 3] = [EXTENDED_SEARCH_PATH, QUICK_SEARCH_PATH, QUICK_SEARCH_UPDATE_PATH];

/// Which search family a portal path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPathKind {
    QuickSearch,
    ExtendedSearch,
    Ineligible,
}

impl SearchPathKind {
    /// Classifies search and download paths; anything else is `Ineligible`
    pub fn of(path: &str) -> Self {
        match path {
            EXTENDED_SEARCH_PATH | EXTENDED_DOWNLOAD_PATH => SearchPathKind::ExtendedSearch,
            QUICK_SEARCH_PATH | QUICK_SEARCH_UPDATE_PATH | QUICK_DOWNLOAD_PATH => {
                SearchPathKind::QuickSearch
            }
            _ => SearchPathKind::Ineligible,
        }
    }

    pub fn is_quick_search(self) -> bool {
        self == SearchPathKind::QuickSearch
    }

    /// Export endpoint serving this search family
    pub fn download_path(self) -> Option<&'static str> {
        match self {
            SearchPathKind::QuickSearch => Some(QUICK_DOWNLOAD_PATH),
            SearchPathKind::ExtendedSearch => Some(EXTENDED_DOWNLOAD_PATH),
            SearchPathKind::Ineligible => None,
        }
    }
}

/// Like [`SearchPathKind::of`], but an unknown path is an error
pub fn classify(path: &str) -> Result<SearchPathKind> {
    match SearchPathKind::of(path) {
        SearchPathKind::Ineligible => Err(Error::InvalidPath(path.to_string())),
        kind => Ok(kind),
    }
}

/// True for the three search pages (download paths excluded)
pub fn is_search_path(path: &str) -> bool {
    SEARCH_PATHS.contains(&path)
}
