//! Doc-comment XML output:
//!
//! ```xml
//! <doc>
//!   <assembly><name>UnityEngine</name></assembly>
//!   <members>
//!     <member name="M:UnityEngine.Mathf.Abs(float f)">
//!       <summary>Returns the absolute value of f.</summary>
//!       <remarks/>
//!       <param name="f"/>
//!     </member>
//!   </members>
//! </doc>
//! ```
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use docxml_core::{DocRecord, DocTree};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use docxml_logging::scrape_warn;

use crate::persist::{write_atomic, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("xml write error: {0}")]
    Xml(String),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("serialized document is not utf-8")]
    Encoding,
}

type XmlWriter = Writer<Vec<u8>>;

/// Render the tree as an indented XML document.
pub fn render_doc_tree(tree: &DocTree) -> Result<String, SerializeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    emit(&mut writer, Event::Start(BytesStart::new("doc")))?;

    emit(&mut writer, Event::Start(BytesStart::new("assembly")))?;
    text_element(&mut writer, BytesStart::new("name"), tree.assembly_name())?;
    emit(&mut writer, Event::End(BytesEnd::new("assembly")))?;

    emit(&mut writer, Event::Start(BytesStart::new("members")))?;
    for record in tree.members() {
        write_member(&mut writer, record)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("members")))?;

    emit(&mut writer, Event::End(BytesEnd::new("doc")))?;

    String::from_utf8(writer.into_inner()).map_err(|_| SerializeError::Encoding)
}

/// Render and atomically write the tree to `path`.
pub fn write_doc_tree(tree: &DocTree, path: &Path) -> Result<PathBuf, SerializeError> {
    let xml = render_doc_tree(tree)?;
    Ok(write_atomic(path, xml.as_bytes())?)
}

fn write_member(writer: &mut XmlWriter, record: &DocRecord) -> Result<(), SerializeError> {
    let mut member = BytesStart::new("member");
    let name = xml_safe(&record.name);
    member.push_attribute(("name", &*name));
    emit(writer, Event::Start(member))?;

    text_element(writer, BytesStart::new("summary"), &record.summary)?;
    text_element(writer, BytesStart::new("remarks"), &record.remarks)?;
    for param in &record.params {
        let mut start = BytesStart::new("param");
        let name = xml_safe(&param.name);
        start.push_attribute(("name", &*name));
        text_element(writer, start, param.description.as_deref().unwrap_or_default())?;
    }

    emit(writer, Event::End(BytesEnd::new("member")))
}

/// `<tag>text</tag>`, or `<tag/>` for empty text.
fn text_element(
    writer: &mut XmlWriter,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), SerializeError> {
    let text = xml_safe(text);
    if text.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    let end = start.to_end().into_owned();
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Text(BytesText::new(&text)))?;
    emit(writer, Event::End(end))
}

/// Drops characters outside the XML 1.0 `Char` production, which escaping
/// cannot represent.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    scrape_warn!("Dropping characters not allowed in XML from {:?}", text);
    Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), SerializeError> {
    writer
        .write_event(event)
        .map_err(|err| SerializeError::Xml(err.to_string()))
}
