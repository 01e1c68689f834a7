//! Reference-page fixtures and an in-memory fetcher shared by the engine tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use docxml_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher};

pub const ROOT: &str = "http://docs.test/ScriptReference/";

pub fn url(page: &str) -> String {
    format!("{ROOT}{page}")
}

/// A page wrapped in the `#mainContainer` layout with a `heading` element.
pub fn reference_page(heading_html: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>Unity - Scripting API</title></head><body>
<div id="sidebar"><div class="heading">Not the container</div></div>
<div id="mainContainer">
<h1 class="heading">{heading_html}</h1>
{body}
</div>
</body></html>"#
    )
}

/// A subsection heading followed by its member table.
pub fn subsection(title: &str, rows: &str) -> String {
    format!(r#"<div class="subsection">{title}</div><table class="list">{rows}</table>"#)
}

pub fn link_row(href: &str, text: &str, desc: &str) -> String {
    format!(r#"<tr><td class="lbl"><a href="{href}">{text}</a></td><td class="desc">{desc}</td></tr>"#)
}

pub fn ctor_row(href: &str, text: &str) -> String {
    format!(r#"<tr><th class="lbl"><a href="{href}">{text}</a></th><td class="desc">Creates one.</td></tr>"#)
}

pub fn inherited_marker() -> &'static str {
    r#"<div class="script-section-hardheading">Inherited members</div>"#
}

/// One overload block: signature at `div[1]/div[1]/div[2]`, then `extra` blocks.
pub fn member_section(signature: &str, extra: &str) -> String {
    format!(
        r#"<div class="section"><div class="mb20 clear"><div class="signature"><div class="signature-CS sig-block">Declaration</div><div class="signature-CS">{signature}</div></div></div>{extra}</div>"#
    )
}

pub fn description_block(text: &str) -> String {
    format!(r#"<div class="subsection"><div>Description</div><p>{text}</p></div>"#)
}

pub fn parameters_block(params: &[(&str, &str)]) -> String {
    let rows: String = params
        .iter()
        .map(|(name, desc)| {
            format!(r#"<tr><td class="name lbl">{name}</td><td class="desc">{desc}</td></tr>"#)
        })
        .collect();
    format!(r#"<div class="subsection"><div>Parameters</div><table class="list">{rows}</table></div>"#)
}

/// Serves canned pages by URL; anything else is a 404.
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    hanging: Vec<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Requests for `url` never complete on their own.
    pub fn with_hanging(mut self, url: impl Into<String>) -> Self {
        self.hanging.push(url.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        // Also released when a timeout drops this future mid-sleep.
        let _in_flight = InFlight(&self.in_flight);

        if self.hanging.iter().any(|h| h == url) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.pages.get(url) {
            Some(html) => Ok(FetchOutput {
                bytes: html.as_bytes().to_vec(),
                metadata: FetchMetadata {
                    original_url: url.to_string(),
                    final_url: url.to_string(),
                    content_type: Some("text/html; charset=utf-8".to_string()),
                    byte_len: html.len() as u64,
                },
            }),
            None => Err(FetchError::new(FailureKind::HttpStatus(404), "404 Not Found")),
        }
    }
}
