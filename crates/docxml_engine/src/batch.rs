use std::time::Duration;

use docxml_logging::scrape_debug;
use futures_util::stream::{self, StreamExt};

use crate::page::{fetch_page, FetchedPage};
use crate::{FetchError, Fetcher};

pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;
pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(45);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    pub max_concurrent_fetches: usize,
    pub page_timeout: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
        }
    }
}

pub type BatchResult = (String, Result<FetchedPage, FetchError>);

/// Fetch every URL with a bounded number in flight and wait for all of them.
///
/// Results come back in input order regardless of completion order. A failed
/// or timed-out fetch only affects its own entry.
pub async fn fetch_all(
    fetcher: &dyn Fetcher,
    urls: Vec<String>,
    settings: BatchSettings,
) -> Vec<BatchResult> {
    let limit = settings.max_concurrent_fetches.max(1);
    scrape_debug!("Fetching batch of {} pages (limit {})", urls.len(), limit);

    stream::iter(urls)
        .map(|url| async move {
            let result = fetch_page(fetcher, &url, settings.page_timeout).await;
            (url, result)
        })
        .buffered(limit)
        .collect()
        .await
}
