use std::time::Duration;

use scraper::Html;

use crate::decode::decode_html;
use crate::{FailureKind, FetchError, Fetcher};

/// A fetched page decoded to text; parsing is deferred to [`FetchedPage::parse`]
/// so the DOM never has to cross an await point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    pub fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// Fetch and decode one page, giving up after `timeout`.
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &str,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    let output = tokio::time::timeout(timeout, fetcher.fetch(url))
        .await
        .map_err(|_| {
            FetchError::new(
                FailureKind::Timeout,
                format!("no response within {}s", timeout.as_secs_f32()),
            )
        })??;

    let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    Ok(FetchedPage::new(url, decoded.html))
}
