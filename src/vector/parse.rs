//! SVG text -> [`Document`] parsing via quick-xml events.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use super::{Document, Element, Node};

/// Errors produced while parsing a vector document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document has no root element")]
    MissingRoot,
    #[error("unexpected closing tag")]
    UnbalancedTag,
}

fn xml_err<E: Into<quick_xml::Error>>(e: E) -> ParseError {
    ParseError::Xml(e.into())
}

/// Parse an SVG string into a document tree.
///
/// Lenient by design: declarations, comments and processing instructions are
/// dropped, anything after the first root element is ignored. Tracer output
/// routinely carries a doctype and metadata comments.
pub fn parse_document(svg: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(element_from(&e)?),
            Event::Empty(e) => {
                let el = element_from(&e)?;
                attach(&mut stack, &mut root, el);
            }
            Event::End(_) => {
                let el = stack.pop().ok_or(ParseError::UnbalancedTag)?;
                attach(&mut stack, &mut root, el);
            }
            Event::Text(t) => {
                let text = t.decode().map_err(xml_err)?.into_owned();
                if !text.is_empty()
                    && let Some(parent) = stack.last_mut()
                {
                    push_text(parent, text);
                }
            }
            // Entity references in text arrive as their own events.
            Event::GeneralRef(e) => {
                let resolved = match e.resolve_char_ref().map_err(xml_err)? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = e.decode().map_err(xml_err)?;
                        match name.as_ref() {
                            "amp" => "&".to_owned(),
                            "lt" => "<".to_owned(),
                            "gt" => ">".to_owned(),
                            "apos" => "'".to_owned(),
                            "quot" => "\"".to_owned(),
                            other => format!("&{other};"),
                        }
                    }
                };
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, resolved);
                }
            }
            Event::CData(t) => {
                let text = String::from_utf8_lossy(&t).into_owned();
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, text);
                }
            }
            Event::Eof => break,
            _ => {} // Decl, Comment, PI, DocType
        }
    }

    root.map(Document::new).ok_or(ParseError::MissingRoot)
}

/// Build an element from a start tag, decoding its attributes.
fn element_from(e: &BytesStart<'_>) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut el = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        el.set_attr(key, value);
    }
    Ok(el)
}

/// Append text, merging into a preceding text node so entity references
/// do not split the surrounding content.
fn push_text(parent: &mut Element, text: String) {
    match parent.children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(&text),
        _ => parent.push(Node::Text(text)),
    }
}

/// Attach a completed element to its parent, or promote it to root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push(Node::Element(el)),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_primitives() {
        let doc = parse_document(
            r#"<svg width="100" height="50"><g id="layer"><circle cx="10" cy="10" r="5"/></g></svg>"#,
        )
        .unwrap();

        assert_eq!(doc.root.name(), "svg");
        assert_eq!(doc.root.attr("width"), Some("100"));
        let g = doc.root.child_elements().next().unwrap();
        assert_eq!(g.name(), "g");
        let circle = g.child_elements().next().unwrap();
        assert_eq!(circle.attr("r"), Some("5"));
    }

    #[test]
    fn skips_decl_and_doctype() {
        let doc = parse_document(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE svg>\n<!-- traced -->\n<svg width=\"1\" height=\"1\"/>",
        )
        .unwrap();
        assert_eq!(doc.root.name(), "svg");
    }

    #[test]
    fn unescapes_attribute_values() {
        let doc = parse_document(r#"<svg data-note="a &amp; b"/>"#).unwrap();
        assert_eq!(doc.root.attr("data-note"), Some("a & b"));
    }

    #[test]
    fn resolves_entity_references_in_text() {
        let doc = parse_document("<svg><desc>a&amp;b&#65;</desc></svg>").unwrap();
        let desc = doc.root.child_elements().next().unwrap();
        assert_eq!(
            desc.children,
            vec![crate::vector::Node::Text("a&bA".to_owned())]
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(matches!(
            parse_document("<!-- nothing here -->"),
            Err(ParseError::MissingRoot)
        ));
    }

    #[test]
    fn counts_primitives_across_groups() {
        let doc = parse_document(
            r#"<svg><g><path d="M0 0"/><rect x="0" y="0" width="1" height="1"/></g><line x1="0" y1="0" x2="1" y2="1"/></svg>"#,
        )
        .unwrap();
        assert_eq!(doc.primitive_count(), 3);
    }
}
