//! [`Document`] -> SVG text serialization via quick-xml events.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::{Document, Element, Node};

impl Document {
    /// Serialize the document back to SVG text.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, &self.root)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<()> {
    let mut start = BytesStart::new(el.name());
    for (key, value) in el.attrs() {
        start.push_attribute((key, value));
    }

    if el.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &el.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(el.name())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::vector::parse_document;

    #[test]
    fn round_trip_preserves_order() {
        let input = r#"<svg width="10" height="20"><g id="a"><circle cx="1" cy="2" r="3"/><rect x="0" y="0" width="4" height="5"/></g></svg>"#;
        let doc = parse_document(input).unwrap();
        assert_eq!(doc.to_svg_string().unwrap(), input);
    }

    #[test]
    fn escapes_attribute_values() {
        let doc = parse_document(r#"<svg data-note="a &amp; b"/>"#).unwrap();
        let out = doc.to_svg_string().unwrap();
        assert!(out.contains("a &amp; b"));
    }
}
