use docxml_core::{DocRecord, MemberKind};
use docxml_logging::{scrape_debug, scrape_info, scrape_warn};
use scraper::{ElementRef, Selector};
use url::Url;

use super::{heading, StructureError};
use crate::html::{
    child_elements, is_tag, main_container, next_element_sibling, normalized_text,
    resolve_href, strip_inherited, trimmed_text,
};
use crate::page::FetchedPage;

const CONSTRUCTORS: &str = "Constructors";
const VARIABLES: &str = "Variables";
const FUNCTION_SECTIONS: [&str; 2] = ["Functions", "Static Functions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPage {
    Constructor,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLink {
    pub page: MemberPage,
    pub url: String,
}

/// Everything a class page yields before its member pages are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOutline {
    pub name: String,
    pub type_record: DocRecord,
    pub variables: Vec<DocRecord>,
    pub member_links: Vec<MemberLink>,
}

#[derive(Debug, Clone)]
pub struct ClassExtractor {
    namespace: String,
}

impl ClassExtractor {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Reads one class page. Inherited members are dropped before any lookup.
    ///
    /// Missing subsections are not errors; only a page without the container
    /// or the class heading is rejected.
    pub fn extract(&self, page: &FetchedPage) -> Result<ClassOutline, StructureError> {
        scrape_info!("parsing CLASS @ {}", page.url);

        let mut doc = page.parse();
        let stripped = strip_inherited(&mut doc);
        if stripped > 0 {
            scrape_debug!("Dropped {} inherited blocks from {}", stripped, page.url);
        }

        let container = main_container(&doc).ok_or_else(|| StructureError::MissingContainer {
            url: page.url.clone(),
        })?;
        let name = heading(container)
            .map(trimmed_text)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| StructureError::MissingHeading {
                url: page.url.clone(),
            })?;

        let base = Url::parse(&page.url).ok();
        let type_record = DocRecord::new(MemberKind::Type.qualify(&self.namespace, &name));

        let mut member_links: Vec<MemberLink> = subsection_table(container, CONSTRUCTORS)
            .map(|table| constructor_links(table, base.as_ref()))
            .unwrap_or_default();

        let variables = subsection_table(container, VARIABLES)
            .map(|table| self.variables(table, &name, &page.url))
            .unwrap_or_default();

        for section in FUNCTION_SECTIONS {
            if let Some(table) = subsection_table(container, section) {
                member_links.extend(function_links(table, base.as_ref(), &page.url));
            }
        }

        Ok(ClassOutline {
            name,
            type_record,
            variables,
            member_links,
        })
    }

    fn variables(&self, table: ElementRef<'_>, class_name: &str, url: &str) -> Vec<DocRecord> {
        let Ok(link_sel) = Selector::parse("a") else {
            return Vec::new();
        };

        rows(table)
            .into_iter()
            .filter_map(|row| {
                let Some(link) = row.select(&link_sel).next() else {
                    scrape_warn!("Variable row without a name link on {}", url);
                    return None;
                };
                let var_name = trimmed_text(link);
                let summary = child_elements(row).last().map(trimmed_text).unwrap_or_default();
                let path = format!("{class_name}.{var_name}");
                Some(
                    DocRecord::new(MemberKind::Property.qualify(&self.namespace, &path))
                        .with_summary(summary),
                )
            })
            .collect()
    }
}

/// The table right after the subsection heading `title`, if the page has
/// that heading and the next element really is a table.
fn subsection_table<'a>(container: ElementRef<'a>, title: &str) -> Option<ElementRef<'a>> {
    let title_el = child_elements(container)
        .find(|el| is_tag(*el, "div") && normalized_text(*el) == title)?;
    next_element_sibling(title_el).filter(|el| is_tag(*el, "table"))
}

fn rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    match Selector::parse("tr") {
        Ok(selector) => table.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn constructor_links(table: ElementRef<'_>, base: Option<&Url>) -> Vec<MemberLink> {
    let Ok(selector) = Selector::parse("th > a[href]") else {
        return Vec::new();
    };
    rows(table)
        .into_iter()
        .flat_map(|row| row.select(&selector).collect::<Vec<_>>())
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| resolve_href(href, base))
        .map(|url| MemberLink {
            page: MemberPage::Constructor,
            url: url.into(),
        })
        .collect()
}

fn function_links(table: ElementRef<'_>, base: Option<&Url>, url: &str) -> Vec<MemberLink> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    rows(table)
        .into_iter()
        .filter_map(|row| {
            let href = row
                .select(&selector)
                .next()
                .and_then(|link| link.value().attr("href"));
            if href.is_none() {
                scrape_warn!("Function row without a link on {}", url);
            }
            href
        })
        .filter_map(|href| resolve_href(href, base))
        .map(|url| MemberLink {
            page: MemberPage::Function,
            url: url.into(),
        })
        .collect()
}
