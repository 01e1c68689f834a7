use docxml_core::{extract_call_signature, DocRecord, MemberKind, ParamEntry};
use docxml_logging::{scrape_info, scrape_warn};
use scraper::{ElementRef, Selector};

use super::{heading, labeled_block, sections, MemberExtractor, StructureError, SIGNATURE_PATH};
use crate::html::{
    child_elements, child_path, main_container, nth_child, text_content, trimmed_text,
};
use crate::page::FetchedPage;

/// Reads function pages: one `M:` record per overload section.
#[derive(Debug, Clone)]
pub struct FunctionExtractor {
    namespace: String,
}

impl FunctionExtractor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Pushes one record per section into `out`, stopping at the first
    /// section whose signature cannot be recognized.
    fn collect_records(
        &self,
        page: &FetchedPage,
        out: &mut Vec<DocRecord>,
    ) -> Result<(), StructureError> {
        let doc = page.parse();
        let container = main_container(&doc).ok_or_else(|| StructureError::MissingContainer {
            url: page.url.clone(),
        })?;
        let function_name = heading(container)
            .and_then(|h| nth_child(h, "a", 1))
            .map(trimmed_text)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| StructureError::MissingFunctionName {
                url: page.url.clone(),
            })?;

        for (index, section) in sections(container).enumerate() {
            let signature = child_path(section, &SIGNATURE_PATH)
                .map(text_content)
                .and_then(|raw| extract_call_signature(&raw))
                .ok_or_else(|| StructureError::MissingSignature {
                    url: page.url.clone(),
                    section: index,
                })?;

            let summary = description(section).unwrap_or_else(|| {
                scrape_warn!("Failed to parse description for function {}", signature);
                String::new()
            });
            let params = parameters(section).unwrap_or_else(|| {
                scrape_warn!("Failed to parse params for function {}", signature);
                Vec::new()
            });

            let path = format!("{function_name}.{signature}");
            out.push(
                DocRecord::new(MemberKind::Method.qualify(&self.namespace, &path))
                    .with_summary(summary)
                    .with_params(params),
            );
        }
        Ok(())
    }
}

impl MemberExtractor for FunctionExtractor {
    fn kind(&self) -> MemberKind {
        MemberKind::Method
    }

    /// A section without a recognizable signature abandons the rest of the
    /// page; records from earlier sections are kept.
    fn extract(&self, page: &FetchedPage) -> Vec<DocRecord> {
        scrape_info!("parsing FUNCTION @ {}", page.url);

        let mut records = Vec::new();
        if let Err(err) = self.collect_records(page, &mut records) {
            scrape_warn!("Failed to parse function from {}: {}", page.url, err);
        }
        records
    }
}

fn description(section: ElementRef<'_>) -> Option<String> {
    let block = labeled_block(section, "Description")?;
    nth_child(block, "p", 1).map(trimmed_text)
}

/// `(name, description)` pairs from every row of the `Parameters` block.
fn parameters(section: ElementRef<'_>) -> Option<Vec<ParamEntry>> {
    let block = labeled_block(section, "Parameters")?;
    let selector = Selector::parse("tr").ok()?;

    let params = block
        .select(&selector)
        .filter_map(|row| {
            let mut cells = child_elements(row).map(trimmed_text);
            let name = cells.next()?;
            let description = cells.next().unwrap_or_default();
            Some(ParamEntry::described(name, description))
        })
        .collect();
    Some(params)
}
