use docxml_core::{constructor_params, strip_semicolons, DocRecord, MemberKind};
use docxml_logging::{scrape_info, scrape_warn};
use scraper::{ElementRef, Selector};

use super::{sections, MemberExtractor, StructureError, SIGNATURE_PATH};
use crate::html::{child_path, main_container, next_element_sibling, trimmed_text};
use crate::page::FetchedPage;

const DESCRIPTION: &str = "Description";

/// Reads constructor pages: one `C:` record per overload section.
#[derive(Debug, Clone)]
pub struct ConstructorExtractor {
    namespace: String,
}

impl ConstructorExtractor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    fn section_record(
        &self,
        section: ElementRef<'_>,
        index: usize,
        url: &str,
    ) -> Option<DocRecord> {
        let Some(signature_el) = child_path(section, &SIGNATURE_PATH) else {
            let err = StructureError::MissingSignature {
                url: url.to_string(),
                section: index,
            };
            scrape_warn!("Skipping constructor section: {}", err);
            return None;
        };
        let signature = strip_semicolons(&trimmed_text(signature_el));

        let summary = description(section).unwrap_or_else(|| {
            scrape_warn!("Failed to parse constructor description at {}", url);
            String::new()
        });

        Some(
            DocRecord::new(MemberKind::Constructor.qualify(&self.namespace, &signature))
                .with_summary(summary)
                .with_params(constructor_params(&signature)),
        )
    }
}

impl MemberExtractor for ConstructorExtractor {
    fn kind(&self) -> MemberKind {
        MemberKind::Constructor
    }

    fn extract(&self, page: &FetchedPage) -> Vec<DocRecord> {
        scrape_info!("parsing CONSTRUCTOR @ {}", page.url);

        let doc = page.parse();
        let Some(container) = main_container(&doc) else {
            let err = StructureError::MissingContainer {
                url: page.url.clone(),
            };
            scrape_warn!("Skipping constructor page: {}", err);
            return Vec::new();
        };

        sections(container)
            .enumerate()
            .filter_map(|(index, section)| self.section_record(section, index, &page.url))
            .collect()
    }
}

/// Text of the block following a `Description` label anywhere in the section.
fn description(section: ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("div").ok()?;
    let label = section
        .select(&selector)
        .find(|el| trimmed_text(*el) == DESCRIPTION)?;
    next_element_sibling(label).map(trimmed_text)
}
