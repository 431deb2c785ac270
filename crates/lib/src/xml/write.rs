use std::path::Path;

use super::XmlError;
use super::node::{Document, Element, Node};
use crate::consts::LINE_SEPARATOR;
use crate::util::fs::write_atomic;

/// Declaration line written at the top of every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Serialize a document into its canonical text form.
///
/// - attributes and children are written in tree order
/// - elements without children are self-closing
/// - elements whose children are all text are written on one line
/// - every other child goes on its own line, indented by [`INDENT`]
pub fn to_xml_string(doc: &Document) -> String {
  let mut out = String::new();
  out.push_str(XML_DECLARATION);
  out.push_str(LINE_SEPARATOR);

  for comment in &doc.prolog {
    write_comment(&mut out, comment, 0);
  }
  write_element(&mut out, &doc.root, 0);
  for comment in &doc.epilog {
    write_comment(&mut out, comment, 0);
  }

  out
}

/// Serialize a document and write it atomically to `path`.
pub fn write_document(doc: &Document, path: &Path) -> Result<(), XmlError> {
  let content = to_xml_string(doc);
  write_atomic(path, &content).map_err(|source| XmlError::Write {
    path: path.to_path_buf(),
    source,
  })
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
  push_indent(out, depth);
  out.push('<');
  out.push_str(&element.name);
  for (name, value) in element.attributes() {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
  }

  if element.children.is_empty() {
    out.push_str("/>");
    out.push_str(LINE_SEPARATOR);
    return;
  }

  if element.children.iter().all(|c| matches!(c, Node::Text(_))) {
    out.push('>');
    out.push_str(&escape_text(&element.text()));
    push_close(out, &element.name);
    return;
  }

  out.push('>');
  out.push_str(LINE_SEPARATOR);
  for child in &element.children {
    match child {
      Node::Element(e) => write_element(out, e, depth + 1),
      Node::Comment(c) => write_comment(out, c, depth + 1),
      Node::Text(t) => {
        let trimmed = t.trim();
        if !trimmed.is_empty() {
          push_indent(out, depth + 1);
          out.push_str(&escape_text(trimmed));
          out.push_str(LINE_SEPARATOR);
        }
      }
    }
  }
  push_indent(out, depth);
  push_close(out, &element.name);
}

fn write_comment(out: &mut String, comment: &str, depth: usize) {
  push_indent(out, depth);
  out.push_str("<!--");
  out.push_str(comment);
  out.push_str("-->");
  out.push_str(LINE_SEPARATOR);
}

fn push_indent(out: &mut String, depth: usize) {
  for _ in 0..depth {
    out.push_str(INDENT);
  }
}

fn push_close(out: &mut String, name: &str) {
  out.push_str("</");
  out.push_str(name);
  out.push('>');
  out.push_str(LINE_SEPARATOR);
}

fn escape_text(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

fn escape_attr(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\n' => escaped.push_str("&#10;"),
      '\r' => escaped.push_str("&#13;"),
      '\t' => escaped.push_str("&#9;"),
      _ => escaped.push(c),
    }
  }
  escaped
}
