#[cfg(test)]
mod tests {
    use anyhow::Result;
    use ru_supplier_link::popup::export_link;
    use ru_supplier_link::preferences::{MemoryStorage, PreferenceStore, Preferences};
    use ru_supplier_link::rewrite::{classify, is_valid_search_url, rewrite, SearchPathKind};
    use ru_supplier_link::url_parser::{QueryString, UrlModel};

    const CONF: &str = "true%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3Btrue%3B";

    #[test]
    fn test_extended_search_rewrite() -> Result<()> {
        let url = UrlModel::parse("http://zakupki.gov.ru/epz/order/extendedsearch/search.html")?;
        assert!(is_valid_search_url(&url));

        let rewritten = rewrite(url)?;
        assert_eq!(
            rewritten.to_string(),
            format!(
                "http://zakupki.gov.ru/epz/order/orderCsvSettings/extendedSearch/download.html?quickSearch=false&sortBy=PUBLISH_DATE&sortDirection=false&userId=null&conf={}",
                CONF
            )
        );
        assert_eq!(classify(rewritten.path())?, SearchPathKind::ExtendedSearch);
        Ok(())
    }

    #[test]
    fn test_quick_search_keeps_user_filters() -> Result<()> {
        let url = UrlModel::parse(
            "http://www.zakupki.gov.ru/epz/order/quicksearch/search.html?searchString=%D0%B1%D1%83%D0%BC%D0%B0%D0%B3%D0%B0&fz44=on&priceFrom=1000",
        )?;
        let rewritten = rewrite(url)?;
        let query = rewritten.query();

        assert_eq!(query.get("searchString"), "бумага");
        assert_eq!(query.get("fz44"), "on");
        assert_eq!(query.get("priceFrom"), "1000");
        assert_eq!(query.get("quickSearch"), "true");
        Ok(())
    }

    #[tokio::test]
    async fn test_popup_flow_with_saved_preferences() -> Result<()> {
        let storage = MemoryStorage::new();
        let mut store = PreferenceStore::load(storage).await?;
        store.set(Preferences::new("rss.example.org", 8081)).await?;

        let link = export_link(
            "http://zakupki.gov.ru/epz/order/quicksearch/update.html?searchString=x",
            store.last(),
        )?
        .expect("search page should produce a link");

        assert!(link.starts_with("http://rss.example.org:8081/rss?url="));
        let outer = QueryString::parse(link.split_once('?').map(|(_, q)| q).unwrap_or(""));
        let inner = UrlModel::parse(outer.get("url"))?;
        assert_eq!(inner.path(), "/epz/order/orderCsvSettings/quickSearch/download.html");
        assert_eq!(inner.query().get("searchString"), "x");
        Ok(())
    }

    #[test]
    fn test_non_search_pages() -> Result<()> {
        let prefs = Preferences::default();
        assert!(export_link("http://zakupki.gov.ru/epz/main/public/home.html", &prefs)?.is_none());
        assert!(export_link("http://evil.com/epz/order/quicksearch/search.html", &prefs)?.is_none());
        assert!(export_link("not a url", &prefs).is_err());
        Ok(())
    }
}
