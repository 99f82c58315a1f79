//! XML serialization: writes an element tree back to text.
//!
//! Provides a pretty-printed form for human inspection and a compact form
//! without layout whitespace. Both escape attribute values and text
//! content; empty elements collapse to self-closing form.

use std::io::{self, Write};

use rayon::prelude::*;

use super::XmlElement;

/// Child count above which subtrees are serialized on the rayon pool.
/// Project files routinely carry thousands of points under one element.
const PARALLEL_CHILD_THRESHOLD: usize = 64;

/// Serializes an element tree to a pretty-printed XML string.
pub fn write_pretty(element: &XmlElement) -> String {
    let mut buffer = Vec::with_capacity(1024);
    buffer.extend_from_slice(b"<?xml version=\"1.0\"?>\n");
    // Writing into a Vec cannot fail.
    let _ = write_node_pretty(element, &mut buffer, 0);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Serializes an element tree to a compact XML string.
pub fn write_compact(element: &XmlElement) -> String {
    let mut buffer = Vec::with_capacity(1024);
    let _ = write_node_compact(element, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn write_node_pretty<W: Write>(
    element: &XmlElement,
    writer: &mut W,
    indent_level: usize,
) -> io::Result<()> {
    write_indent(writer, indent_level)?;
    writer.write_all(b"<")?;
    writer.write_all(element.name.as_bytes())?;

    for (key, value) in &element.attributes {
        writer.write_all(b" ")?;
        writer.write_all(key.as_bytes())?;
        writer.write_all(b"=\"")?;
        write_escaped_attr(writer, value)?;
        writer.write_all(b"\"")?;
    }

    let text = element.text.trim();
    if element.children.is_empty() && text.is_empty() {
        writer.write_all(b" />\n")?;
        return Ok(());
    }

    writer.write_all(b">\n")?;

    if !text.is_empty() {
        write_indent(writer, indent_level + 1)?;
        write_escaped_text(writer, text)?;
        writer.write_all(b"\n")?;
    }

    if element.children.len() > PARALLEL_CHILD_THRESHOLD {
        let child_buffers: Result<Vec<Vec<u8>>, io::Error> = element
            .children
            .par_iter()
            .map(|child| {
                let mut buf = Vec::with_capacity(4096);
                write_node_pretty(child, &mut buf, indent_level + 1)?;
                Ok(buf)
            })
            .collect();

        for buf in child_buffers? {
            writer.write_all(&buf)?;
        }
    } else {
        for child in &element.children {
            write_node_pretty(child, writer, indent_level + 1)?;
        }
    }

    write_indent(writer, indent_level)?;
    writer.write_all(b"</")?;
    writer.write_all(element.name.as_bytes())?;
    writer.write_all(b">\n")?;
    Ok(())
}

fn write_node_compact<W: Write>(element: &XmlElement, writer: &mut W) -> io::Result<()> {
    writer.write_all(b"<")?;
    writer.write_all(element.name.as_bytes())?;

    for (key, value) in &element.attributes {
        writer.write_all(b" ")?;
        writer.write_all(key.as_bytes())?;
        writer.write_all(b"=\"")?;
        write_escaped_attr(writer, value)?;
        writer.write_all(b"\"")?;
    }

    let text = element.text.trim();
    if element.children.is_empty() && text.is_empty() {
        writer.write_all(b" />")?;
        return Ok(());
    }

    writer.write_all(b">")?;

    if !text.is_empty() {
        write_escaped_text(writer, text)?;
    }

    for child in &element.children {
        write_node_compact(child, writer)?;
    }

    writer.write_all(b"</")?;
    writer.write_all(element.name.as_bytes())?;
    writer.write_all(b">")?;
    Ok(())
}

fn write_indent<W: Write>(writer: &mut W, indent_level: usize) -> io::Result<()> {
    for _ in 0..indent_level {
        writer.write_all(b"  ")?;
    }
    Ok(())
}

fn write_escaped_attr<W: Write>(writer: &mut W, input: &str) -> io::Result<()> {
    let mut last = 0;
    for (idx, ch) in input.char_indices() {
        let entity = match ch {
            '&' => Some(b"&amp;" as &[u8]),
            '<' => Some(b"&lt;" as &[u8]),
            '>' => Some(b"&gt;" as &[u8]),
            '"' => Some(b"&quot;" as &[u8]),
            '\'' => Some(b"&apos;" as &[u8]),
            _ => None,
        };

        if let Some(bytes) = entity {
            if last < idx {
                writer.write_all(input[last..idx].as_bytes())?;
            }
            writer.write_all(bytes)?;
            last = idx + ch.len_utf8();
        }
    }

    if last < input.len() {
        writer.write_all(input[last..].as_bytes())?;
    }
    Ok(())
}

fn write_escaped_text<W: Write>(writer: &mut W, input: &str) -> io::Result<()> {
    let mut last = 0;
    for (idx, ch) in input.char_indices() {
        let entity = match ch {
            '&' => Some(b"&amp;" as &[u8]),
            '<' => Some(b"&lt;" as &[u8]),
            '>' => Some(b"&gt;" as &[u8]),
            _ => None,
        };

        if let Some(bytes) = entity {
            if last < idx {
                writer.write_all(input[last..idx].as_bytes())?;
            }
            writer.write_all(bytes)?;
            last = idx + ch.len_utf8();
        }
    }

    if last < input.len() {
        writer.write_all(input[last..].as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::read_str;

    fn sample_element() -> XmlElement {
        let mut child = XmlElement::new("child").with_text("Hello World");
        child.set_attr("name", "test");

        let mut root = XmlElement::new("root");
        root.set_attr("id", "123");
        root.push(child);
        root
    }

    #[test]
    fn pretty_output_contains_structure() {
        let xml = write_pretty(&sample_element());
        assert!(xml.contains("root"));
        assert!(xml.contains("id=\"123\""));
        assert!(xml.contains("child"));
        assert!(xml.contains("Hello World"));
        assert!(xml.contains("</root>"));
    }

    #[test]
    fn compact_output_has_no_layout_whitespace() {
        let xml = write_compact(&sample_element());
        assert_eq!(
            xml,
            r#"<root id="123"><child name="test">Hello World</child></root>"#
        );
    }

    #[test]
    fn escapes_special_characters() {
        let mut element = XmlElement::new("test").with_text("text<with>special&chars");
        element.set_attr("attr", "value&quote\"lt<gt>");

        let xml = write_pretty(&element);
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&quot;"));
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&gt;"));
    }

    #[test]
    fn empty_element_is_self_closing() {
        let xml = write_pretty(&XmlElement::new("empty"));
        assert!(xml.contains("<empty />"));
    }

    #[test]
    fn read_back_preserves_structure() {
        let original = sample_element();
        let reparsed = read_str(&write_pretty(&original)).unwrap();
        assert_eq!(reparsed, original);

        let reparsed = read_str(&write_compact(&original)).unwrap();
        assert_eq!(reparsed, original);
    }
}
