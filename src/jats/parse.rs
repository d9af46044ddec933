//! JATS text-extraction internals.
//!
//! A single streaming pass over the article XML. Extraction is total by
//! contract: any parse or unescape fault maps to an empty result, never an
//! error, so callers can treat "no text" as one uniform outcome.

use crate::utils::collapse_whitespace;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Extracts the readable text of a JATS article document.
///
/// Collects text from the content-bearing elements (paragraphs, non-table
/// titles, abstracts, captions). When the document contains none of those
/// at all, falls back to every non-empty text node. Fragments are joined by
/// single spaces and whitespace runs collapsed.
pub(crate) fn extract_text(xml: &str) -> String {
    try_extract(xml).unwrap_or_default()
}

/// Fallible body of [`extract_text`]; any fault short-circuits to `None`.
fn try_extract(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    // (entered a table context, entered a content element)
    let mut stack: Vec<(bool, bool)> = Vec::new();
    let mut content_depth = 0usize;
    let mut table_depth = 0usize;
    let mut saw_content_element = false;

    let mut content = Vec::new();
    let mut fallback = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).ok()? {
            Event::Start(ref e) => {
                let is_table = is_table_context(e.name().as_ref());
                if is_table {
                    table_depth += 1;
                }
                let is_content = is_content_element(e.name().as_ref(), table_depth > 0);
                if is_content {
                    saw_content_element = true;
                    content_depth += 1;
                }
                stack.push((is_table, is_content));
            }
            Event::End(_) => {
                if let Some((was_table, was_content)) = stack.pop() {
                    if was_table {
                        table_depth -= 1;
                    }
                    if was_content {
                        content_depth -= 1;
                    }
                }
            }
            Event::Empty(ref e) => {
                // an empty <p/> still counts as a selected element
                if is_content_element(e.name().as_ref(), table_depth > 0) {
                    saw_content_element = true;
                }
            }
            Event::Text(e) => {
                let text = e.unescape().ok()?;
                push_fragment(&text, content_depth > 0, &mut content, &mut fallback);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_fragment(&text, content_depth > 0, &mut content, &mut fallback);
            }
            Event::Eof => break,
            _ => (),
        }
        buf.clear();
    }

    let fragments = if saw_content_element { content } else { fallback };
    Some(collapse_whitespace(&fragments.join(" ")))
}

fn push_fragment(text: &str, in_content: bool, content: &mut Vec<String>, fallback: &mut Vec<String>) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    if in_content {
        content.push(trimmed.to_string());
    }
    fallback.push(trimmed.to_string());
}

/// Titles inside tables are structural labels, not article prose.
fn is_table_context(name: &[u8]) -> bool {
    matches!(name, b"table-wrap" | b"table" | b"table-wrap-foot")
}

fn is_content_element(name: &[u8], in_table: bool) -> bool {
    match name {
        b"p" | b"abstract" | b"caption" => true,
        b"title" => !in_table,
        _ => false,
    }
}
