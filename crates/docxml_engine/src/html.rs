//! Small DOM helpers shared by the extractors.
//!
//! The reference pages are matched on exact `class` attribute values and on
//! child position (XPath style), not on CSS class semantics.
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub const CONTAINER_ID: &str = "mainContainer";
const INHERITED_MARKER_CLASS: &str = "script-section-hardheading";

/// The `div#mainContainer` element every reference page wraps its content in.
pub fn main_container(doc: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse(&format!("div#{CONTAINER_ID}")).ok()?;
    doc.select(&selector).next()
}

/// Detaches every `div` that follows an inherited-members marker inside the
/// container, so only members declared on the page's own class remain.
///
/// Returns the number of detached subtrees.
pub fn strip_inherited(doc: &mut Html) -> usize {
    let marker = main_container(doc).and_then(|container| {
        child_elements(container)
            .find(|el| is_tag(*el, "div") && has_class(*el, INHERITED_MARKER_CLASS))
    });
    // Later markers are divs themselves, so the first one covers them all.
    let doomed: Vec<NodeId> = match marker {
        Some(marker) => marker
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|el| is_tag(*el, "div"))
            .map(|el| el.id())
            .collect(),
        None => return 0,
    };

    let mut detached = 0;
    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
            detached += 1;
        }
    }
    detached
}

pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// The `n`th (1-based) child element with the given tag, like XPath `tag[n]`.
pub fn nth_child<'a>(el: ElementRef<'a>, tag: &'a str, n: usize) -> Option<ElementRef<'a>> {
    child_elements(el)
        .filter(|child| is_tag(*child, tag))
        .nth(n.checked_sub(1)?)
}

/// Follows a chain of 1-based positional steps, e.g. `div[1]/div[1]/div[2]`.
pub fn child_path<'a>(el: ElementRef<'a>, steps: &[(&'a str, usize)]) -> Option<ElementRef<'a>> {
    steps
        .iter()
        .try_fold(el, |current, &(tag, n)| nth_child(current, tag, n))
}

pub fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub fn is_tag(el: ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

/// Exact match on the whole `class` attribute, as the reference markup uses
/// single-class attributes.
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().attr("class").map(str::trim) == Some(class)
}

/// Concatenated descendant text, untouched.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text with surrounding whitespace trimmed.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    text_content(el).trim().to_string()
}

/// Descendant text with whitespace runs collapsed to single spaces.
pub fn normalized_text(el: ElementRef<'_>) -> String {
    text_content(el).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves an `href` against the page it appeared on.
///
/// Fragment-only, query-only and `javascript:` references are not pages and
/// yield `None`.
pub fn resolve_href(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with('?') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}
