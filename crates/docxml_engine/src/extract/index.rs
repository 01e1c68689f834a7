use std::collections::BTreeSet;

use scraper::Selector;
use url::Url;

use crate::html::{child_elements, has_class, resolve_href};
use crate::page::FetchedPage;

const RUNTIME_CLASS: &str = "classRuntime";

/// Absolute URLs of every runtime class listed on the index page.
///
/// Entries without a link child or `href` are routine gaps in the listing
/// and are skipped without a diagnostic.
pub fn discover_class_links(index: &FetchedPage) -> BTreeSet<String> {
    let Ok(selector) = Selector::parse("li") else {
        return BTreeSet::new();
    };
    let base = Url::parse(&index.url).ok();
    let doc = index.parse();

    doc.select(&selector)
        .filter(|entry| has_class(*entry, RUNTIME_CLASS))
        .filter_map(|entry| child_elements(entry).next())
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| resolve_href(href, base.as_ref()))
        .map(String::from)
        .collect()
}
