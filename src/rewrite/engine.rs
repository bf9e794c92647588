use tracing::{debug, info, instrument};

use super::paths::{classify, is_search_path, SearchPathKind};
use crate::error::{Error, Result};
use crate::url_parser::{QueryString, UrlModel};

/// Hosts serving the procurement portal
pub const PORTAL_HOSTS: [&str; 2] = ["zakupki.gov.ru", "www.zakupki.gov.ru"];

/// Export column selection: all 17 columns enabled
pub const EXPORT_COLUMNS: &str = "true;true;true;true;true;true;true;true;true;true;true;true;true;true;true;true;true;";

/// Checks that `url` is a plain-http search page on the portal
pub fn is_valid_search_url(url: &UrlModel) -> bool {
    url.scheme() == "http" && PORTAL_HOSTS.contains(&url.hostname()) && is_search_path(url.path())
}

/// Points a search URL at its export endpoint
///
/// The path is swapped for the matching download path and the export
/// parameters are forced onto the query, overwriting anything already there.
/// Every other component is kept as is.
#[instrument(level = "debug", skip_all, fields(path = %url.path()))]
pub fn rewrite(mut url: UrlModel) -> Result<UrlModel> {
    if !is_search_path(url.path()) {
        return Err(Error::InvalidPath(url.path().to_string()));
    }

    let download_path = SearchPathKind::of(url.path())
        .download_path()
        .ok_or_else(|| Error::InvalidPath(url.path().to_string()))?;
    debug!("Rewriting {} -> {}", url.path(), download_path);
    url.set_path(download_path);

    let kind = classify(url.path())?;
    let mut query = url.query();
    query.set("quickSearch", if kind.is_quick_search() { "true" } else { "false" });
    query.set("sortBy", "PUBLISH_DATE");
    query.set("sortDirection", "false");
    query.set("userId", "null");
    query.set("conf", EXPORT_COLUMNS);
    url.set_query(&query);

    info!("Rewrote search URL to {}", url);
    Ok(url)
}

/// Builds the RSS address served by the local proxy
///
/// The port is left out when it is empty or `80`.
pub fn make_proxy_rss_url(hostname: &str, port: &str, query: &QueryString) -> String {
    let mut url = format!("http://{}", hostname);
    if !port.is_empty() && port != "80" {
        url.push(':');
        url.push_str(port);
    }
    url.push_str("/rss");
    url.push_str(&query.to_string());
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::paths::*;

    fn model(raw: &str) -> UrlModel {
        UrlModel::parse(raw).unwrap()
    }

    #[test]
    fn test_export_columns_has_17_fields() {
        assert_eq!(EXPORT_COLUMNS.matches("true;").count(), 17);
        assert_eq!(EXPORT_COLUMNS, "true;".repeat(17));
    }

    #[test]
    fn test_valid_search_urls() {
        assert!(is_valid_search_url(&model("http://zakupki.gov.ru/epz/order/extendedsearch/search.html")));
        assert!(is_valid_search_url(&model("http://www.zakupki.gov.ru/epz/order/quicksearch/search.html?a=1")));
        assert!(is_valid_search_url(&model("http://zakupki.gov.ru/epz/order/quicksearch/update.html")));
    }

    #[test]
    fn test_invalid_search_urls() {
        assert!(!is_valid_search_url(&model("http://evil.com/epz/order/extendedsearch/search.html")));
        assert!(!is_valid_search_url(&model("https://zakupki.gov.ru/epz/order/extendedsearch/search.html")));
        assert!(!is_valid_search_url(&model("http://zakupki.gov.ru/epz/order/orderCsvSettings/quickSearch/download.html")));
        assert!(!is_valid_search_url(&model("http://new.zakupki.gov.ru/epz/order/quicksearch/search.html")));
        assert!(!is_valid_search_url(&model("http://zakupki.gov.ru/")));
    }

    #[test]
    fn test_rewrite_extended_search_without_query() {
        let url = rewrite(model("http://zakupki.gov.ru/epz/order/extendedsearch/search.html")).unwrap();
        assert_eq!(url.path(), EXTENDED_DOWNLOAD_PATH);
        assert_eq!(
            url.raw_query(),
            format!(
                "?quickSearch=false&sortBy=PUBLISH_DATE&sortDirection=false&userId=null&conf={}",
                "true%3B".repeat(17)
            )
        );
        assert_eq!(url.query().get("conf"), EXPORT_COLUMNS);
    }

    #[test]
    fn test_rewrite_quick_search_update() {
        let url = rewrite(model("http://zakupki.gov.ru/epz/order/quicksearch/update.html?searchString=abc")).unwrap();
        assert_eq!(url.path(), QUICK_DOWNLOAD_PATH);
        let query = url.query();
        assert_eq!(query.get("quickSearch"), "true");
        assert_eq!(query.get("searchString"), "abc");
        assert_eq!(query.keys().next(), Some("searchString"));
    }

    #[test]
    fn test_rewrite_overwrites_existing_values() {
        let url = rewrite(model(
            "http://zakupki.gov.ru/epz/order/quicksearch/search.html?sortBy=PRICE&sortBy=X&userId=7&quickSearch=false",
        ))
        .unwrap();
        let query = url.query();
        assert_eq!(query.values("sortBy").unwrap(), &[Some("PUBLISH_DATE".to_string())]);
        assert_eq!(query.get("userId"), "null");
        assert_eq!(query.get("quickSearch"), "true");
        // overwritten keys keep their original position
        assert_eq!(
            query.keys().collect::<Vec<_>>(),
            vec!["sortBy", "userId", "quickSearch", "sortDirection", "conf"]
        );
    }

    #[test]
    fn test_rewrite_keeps_other_components() {
        let url = rewrite(model("http://user@www.zakupki.gov.ru:8080/epz/order/extendedsearch/search.html#results")).unwrap();
        let serialized = url.to_string();
        assert!(serialized.starts_with("http://user@www.zakupki.gov.ru:8080/epz/order/orderCsvSettings/extendedSearch/download.html?"));
        assert!(serialized.ends_with("#results"));
    }

    #[test]
    fn test_rewrite_rejects_other_paths() {
        let err = rewrite(model("http://zakupki.gov.ru/epz/order/orderCsvSettings/quickSearch/download.html")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert!(matches!(rewrite(model("http://zakupki.gov.ru/")), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_make_proxy_rss_url_port_handling() {
        let query: QueryString = vec![("url", "http://x")].into_iter().collect();
        assert_eq!(
            make_proxy_rss_url("proxy-zakupki-gov-ru.local", "80", &query),
            "http://proxy-zakupki-gov-ru.local/rss?url=http%3A%2F%2Fx"
        );
        assert_eq!(
            make_proxy_rss_url("proxy-zakupki-gov-ru.local", "8080", &query),
            "http://proxy-zakupki-gov-ru.local:8080/rss?url=http%3A%2F%2Fx"
        );
        assert_eq!(make_proxy_rss_url("localhost", "", &QueryString::new()), "http://localhost/rss");
    }
}
