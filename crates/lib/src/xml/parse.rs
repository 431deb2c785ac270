use std::path::Path;

use tracing::debug;

use super::XmlError;
use super::node::{Document, Element, Node};
use crate::util::fs::{TextReadError, read_text};

/// Load a manifest document, or fabricate one with an empty `root_name` root
/// when no path is given or the file does not exist.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read, is not UTF-8, or is
/// not well-formed XML. The file itself is never modified.
pub fn load_document(path: Option<&Path>, root_name: &str) -> Result<Document, XmlError> {
  let Some(path) = path.filter(|p| p.exists()) else {
    debug!("No existing feature manifest, starting from an empty <{}>", root_name);
    return Ok(Document::with_root(root_name));
  };

  debug!("Loading feature manifest: {}", path.display());
  let content = read_text(path).map_err(|e| match e {
    TextReadError::Io(source) => XmlError::Read {
      path: path.to_path_buf(),
      source,
    },
    TextReadError::Encoding => XmlError::Encoding {
      path: path.to_path_buf(),
    },
  })?;

  parse_document(&content).map_err(|source| XmlError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse XML text into an owned document.
///
/// Whitespace-only text between elements is dropped, since the writer
/// regenerates indentation. Other text, comments and attributes are kept in
/// document order. Names keep their namespace prefix, and each element keeps
/// the namespace declarations it introduces. Processing instructions and the
/// document type declaration are not kept.
pub fn parse_document(content: &str) -> Result<Document, roxmltree::Error> {
  let options = roxmltree::ParsingOptions {
    allow_dtd: true,
    ..roxmltree::ParsingOptions::default()
  };
  let doc = roxmltree::Document::parse_with_options(content, options)?;
  let root_node = doc.root_element();

  let mut prolog = Vec::new();
  let mut epilog = Vec::new();
  let mut seen_root = false;

  for child in doc.root().children() {
    if child == root_node {
      seen_root = true;
    } else if child.is_comment() {
      let text = child.text().unwrap_or_default().to_string();
      if seen_root {
        epilog.push(text);
      } else {
        prolog.push(text);
      }
    }
  }

  Ok(Document {
    prolog,
    root: convert_element(root_node),
    epilog,
  })
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
  let tag = node.tag_name();
  let mut element = Element::new(qualified_name(node, tag.namespace(), tag.name()));

  for ns in declared_namespaces(node) {
    match ns.name() {
      Some(prefix) => element.set_attr(format!("xmlns:{prefix}"), ns.uri()),
      None => element.set_attr("xmlns", ns.uri()),
    }
  }

  for attr in node.attributes() {
    element.set_attr(qualified_name(node, attr.namespace(), attr.name()), attr.value());
  }

  for child in node.children() {
    if child.is_element() {
      element.children.push(Node::Element(convert_element(child)));
    } else if child.is_text() {
      if let Some(text) = child.text().filter(|t| !t.trim().is_empty()) {
        element.children.push(Node::Text(text.to_string()));
      }
    } else if child.is_comment() {
      element
        .children
        .push(Node::Comment(child.text().unwrap_or_default().to_string()));
    }
  }

  element
}

/// `prefix:local` when `namespace` is bound to a prefix in scope of `node`.
fn qualified_name(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
  match namespace.and_then(|uri| node.lookup_prefix(uri)) {
    Some(prefix) => format!("{prefix}:{local}"),
    None => local.to_string(),
  }
}

/// Namespaces in scope of `node` that its parent element does not already
/// bind the same way.
fn declared_namespaces<'a, 'input>(
  node: roxmltree::Node<'a, 'input>,
) -> impl Iterator<Item = &'a roxmltree::Namespace<'input>> {
  let parent = node.parent_element();
  node.namespaces().filter(move |ns| {
    parent.is_none_or(|p| !p.namespaces().any(|inherited| inherited == *ns))
  })
}
