//! Event-based XML reading built on quick-xml.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::XmlElement;
use crate::error::XmlError;

/// Parses an XML document from a string slice into an element tree.
pub fn read_str(xml: &str) -> Result<XmlElement, XmlError> {
    read_document(xml.as_bytes())
}

/// Parses an XML document from a buffered reader into an element tree.
///
/// Prologue events (declaration, comments, processing instructions) before
/// the root element are skipped.
pub fn read_document<R: BufRead>(input: R) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);
    // Nesting is validated per element below, with the element name in
    // the error.
    reader.check_end_names(false);

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                let start = start.into_owned();
                return read_element(&mut reader, start, false);
            }
            Event::Empty(start) => {
                let start = start.into_owned();
                return read_element(&mut reader, start, true);
            }
            Event::Eof => return Err(XmlError::Empty),
            _ => {}
        }
    }
}

fn read_element<R: BufRead>(
    reader: &mut Reader<R>,
    start: BytesStart<'static>,
    self_closing: bool,
) -> Result<XmlElement, XmlError> {
    let name_bytes = start.name().as_ref().to_vec();
    let mut element = XmlElement::new(String::from_utf8_lossy(&name_bytes).into_owned());
    for attr in start.attributes() {
        let attr = attr?;
        element.attributes.insert(
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            attr.unescape_value()?.into_owned(),
        );
    }

    if self_closing {
        return Ok(element);
    }

    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(child) => {
                let child = child.into_owned();
                element.children.push(read_element(reader, child, false)?);
            }
            Event::Empty(child) => {
                let child = child.into_owned();
                element.children.push(read_element(reader, child, true)?);
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                if !value.trim().is_empty() {
                    element.text.push_str(&value);
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(data.as_ref()).into_owned();
                if !value.trim().is_empty() {
                    element.text.push_str(&value);
                }
            }
            Event::End(end) => {
                if end.name().as_ref() != name_bytes.as_slice() {
                    return Err(XmlError::MismatchedTag {
                        expected: element.name.clone(),
                        found: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    });
                }
                return Ok(element);
            }
            Event::Eof => return Err(XmlError::Truncated(element.name.clone())),
            _ => {}
        }
    }
}
