//! Page extractors turning reference HTML into doc records.
mod class;
mod constructor;
mod function;
mod index;

pub use class::{ClassExtractor, ClassOutline, MemberLink, MemberPage};
pub use constructor::ConstructorExtractor;
pub use function::FunctionExtractor;
pub use index::discover_class_links;

use docxml_core::{DocRecord, MemberKind};
use scraper::ElementRef;

use crate::html::{child_elements, has_class, is_tag, nth_child, trimmed_text};
use crate::page::FetchedPage;

/// Position of the signature text inside a member `section` block.
const SIGNATURE_PATH: [(&str, usize); 3] = [("div", 1), ("div", 1), ("div", 2)];

/// A page that does not match the reference page template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("no #mainContainer on {url}")]
    MissingContainer { url: String },
    #[error("no class heading on {url}")]
    MissingHeading { url: String },
    #[error("no function name in heading on {url}")]
    MissingFunctionName { url: String },
    #[error("section {section} has no recognizable signature on {url}")]
    MissingSignature { url: String, section: usize },
}

/// Extractor for a member page reached from a class page.
///
/// Implementations are stateless; a failure inside a page is logged and
/// degrades to fewer records, never to an error.
pub trait MemberExtractor: Send + Sync {
    fn kind(&self) -> MemberKind;
    fn extract(&self, page: &FetchedPage) -> Vec<DocRecord>;
}

/// The `div.section` children of the container, one per documented overload.
fn sections<'a>(container: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    child_elements(container).filter(|el| is_tag(*el, "div") && has_class(*el, "section"))
}

/// A child `div` of `section` whose first `div` child reads `label`.
fn labeled_block<'a>(section: ElementRef<'a>, label: &str) -> Option<ElementRef<'a>> {
    child_elements(section)
        .filter(|el| is_tag(*el, "div"))
        .find(|block| nth_child(*block, "div", 1).map(trimmed_text).as_deref() == Some(label))
}

/// The page heading element (`class="heading"`) directly under the container.
fn heading<'a>(container: ElementRef<'a>) -> Option<ElementRef<'a>> {
    child_elements(container).find(|el| has_class(*el, "heading"))
}
