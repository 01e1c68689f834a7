use std::collections::BTreeSet;
use std::sync::Arc;

use docxml_core::{DocRecord, DocTree};
use docxml_logging::{scrape_debug, scrape_info, scrape_warn};

use crate::batch::{fetch_all, BatchSettings};
use crate::extract::{
    discover_class_links, ClassExtractor, ConstructorExtractor, FunctionExtractor,
    MemberExtractor, MemberPage,
};
use crate::page::{fetch_page, FetchedPage};
use crate::{FetchError, Fetcher};

pub const DEFAULT_INDEX_URL: &str = "http://docs.unity3d.com/Documentation/ScriptReference/";
pub const DEFAULT_NAMESPACE: &str = "UnityEngine.";
pub const DEFAULT_ASSEMBLY: &str = "UnityEngine";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSettings {
    pub index_url: String,
    /// Prepended verbatim to every member path, trailing `.` included.
    pub namespace: String,
    pub assembly_name: String,
    pub batch: BatchSettings,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            assembly_name: DEFAULT_ASSEMBLY.to_string(),
            batch: BatchSettings::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("index page {url} unavailable: {source}")]
    Index {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Drives index discovery, class extraction and the member fan-out.
///
/// Only a failure to load the index page is fatal; every other failure is
/// logged and drops the affected page.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    settings: ScrapeSettings,
    classes: ClassExtractor,
    constructors: ConstructorExtractor,
    functions: FunctionExtractor,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: ScrapeSettings) -> Self {
        let namespace = settings.namespace.clone();
        Self {
            fetcher,
            settings,
            classes: ClassExtractor::new(namespace.clone()),
            constructors: ConstructorExtractor::new(namespace.clone()),
            functions: FunctionExtractor::new(namespace),
        }
    }

    /// Run the whole scrape on a fresh tokio runtime.
    pub fn run_blocking(&self) -> Result<DocTree, PipelineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.run())
    }

    pub async fn run(&self) -> Result<DocTree, PipelineError> {
        let class_urls = self.discover_classes().await?;
        scrape_info!("Found {} class pages", class_urls.len());

        let mut tree = DocTree::new(self.settings.assembly_name.clone());
        let pages = fetch_all(
            self.fetcher.as_ref(),
            class_urls.into_iter().collect(),
            self.settings.batch,
        )
        .await;

        for (url, result) in pages {
            match result {
                Ok(page) => tree.extend(self.process_class_page(&page).await),
                Err(err) => scrape_warn!("Skipping class page {}: {}", url, err),
            }
        }
        Ok(tree)
    }

    /// Sorted absolute URLs of every runtime class on the index page.
    pub async fn discover_classes(&self) -> Result<BTreeSet<String>, PipelineError> {
        let url = &self.settings.index_url;
        scrape_info!("Reading class index @ {}", url);
        let index = fetch_page(self.fetcher.as_ref(), url, self.settings.batch.page_timeout)
            .await
            .map_err(|source| PipelineError::Index {
                url: url.clone(),
                source,
            })?;
        Ok(discover_class_links(&index))
    }

    /// Fetch and process a single class page.
    pub async fn process_class(&self, url: &str) -> Vec<DocRecord> {
        match fetch_page(self.fetcher.as_ref(), url, self.settings.batch.page_timeout).await {
            Ok(page) => self.process_class_page(&page).await,
            Err(err) => {
                scrape_warn!("Skipping class page {}: {}", url, err);
                Vec::new()
            }
        }
    }

    /// Records for one class: the type, its constructors, variables, then
    /// functions, each group in page order.
    pub async fn process_class_page(&self, page: &FetchedPage) -> Vec<DocRecord> {
        let outline = match self.classes.extract(page) {
            Ok(outline) => outline,
            Err(err) => {
                scrape_warn!("Skipping class page: {}", err);
                return Vec::new();
            }
        };
        scrape_debug!(
            "Class {} has {} variables and {} member pages",
            outline.name,
            outline.variables.len(),
            outline.member_links.len()
        );

        let (kinds, urls): (Vec<MemberPage>, Vec<String>) = outline
            .member_links
            .into_iter()
            .map(|link| (link.page, link.url))
            .unzip();
        let fetched = fetch_all(self.fetcher.as_ref(), urls, self.settings.batch).await;

        let mut constructors = Vec::new();
        let mut functions = Vec::new();
        for (kind, (url, result)) in kinds.into_iter().zip(fetched) {
            let page = match result {
                Ok(page) => page,
                Err(err) => {
                    scrape_warn!("Skipping member page {}: {}", url, err);
                    continue;
                }
            };
            let extractor: &dyn MemberExtractor = match kind {
                MemberPage::Constructor => &self.constructors,
                MemberPage::Function => &self.functions,
            };
            let records = extractor.extract(&page);
            scrape_debug!("{} page {} gave {} records", extractor.kind(), url, records.len());
            match kind {
                MemberPage::Constructor => constructors.extend(records),
                MemberPage::Function => functions.extend(records),
            }
        }

        let mut records = Vec::with_capacity(
            1 + constructors.len() + outline.variables.len() + functions.len(),
        );
        records.push(outline.type_record);
        records.extend(constructors);
        records.extend(outline.variables);
        records.extend(functions);
        records
    }
}
