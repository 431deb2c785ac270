//! Minimal owned XML tree for feature manifests.
//!
//! Existing manifests are parsed with `roxmltree` and converted into an owned
//! [`Document`] that can be queried and mutated. The writer produces the
//! canonical 2-space indented form.

mod node;
mod parse;
mod write;

use std::path::PathBuf;

use thiserror::Error;

pub use node::{Document, Element, Node};
pub use parse::{load_document, parse_document};
pub use write::{INDENT, XML_DECLARATION, to_xml_string, write_document};

/// Errors that can occur when loading or writing a manifest document.
#[derive(Debug, Error)]
pub enum XmlError {
  #[error("unable to load feature manifest {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("feature manifest {} is not valid UTF-8", path.display())]
  Encoding { path: PathBuf },

  #[error("unable to parse feature manifest {}: {source}", path.display())]
  Parse { path: PathBuf, source: roxmltree::Error },

  #[error("unable to write feature manifest {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}
