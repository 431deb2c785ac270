//! Placeholder parsing and substitution for advice lines.
//!
//! Advice documents may reference values that change between runs, most
//! notably the feature version. This module parses `${key}` tokens and
//! substitutes the values known to a [`Resolver`].
//!
//! # Placeholder Format
//!
//! - `${feature.version}` - replaced by the resolver's value for `feature.version`
//!
//! # Unknown Keys
//!
//! Tokens whose key the resolver does not know are emitted unchanged,
//! delimiters included. An unclosed `${` is plain text. Substitution is a
//! single pass: substituted values are never scanned for further tokens.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use p2feature_lib::placeholder::{parse, substitute, Segment};
//!
//! let segments = parse("version=${feature.version}");
//! assert_eq!(segments, vec![
//!     Segment::Literal("version=".to_string()),
//!     Segment::Placeholder("feature.version".to_string()),
//! ]);
//!
//! let vars = HashMap::from([("feature.version".to_string(), "1.0.0".to_string())]);
//! assert_eq!(substitute("version=${feature.version}", &vars), "version=1.0.0");
//! ```

use std::collections::{BTreeMap, HashMap};

/// One piece of an advice line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Text copied through as is
  Literal(String),

  /// A `${key}` token, holding the key
  Placeholder(String),
}

/// Source of placeholder values.
pub trait Resolver {
  /// Resolve a key, or `None` to leave the token in place.
  fn resolve(&self, key: &str) -> Option<&str>;
}

impl Resolver for HashMap<String, String> {
  fn resolve(&self, key: &str) -> Option<&str> {
    self.get(key).map(String::as_str)
  }
}

impl Resolver for BTreeMap<String, String> {
  fn resolve(&self, key: &str) -> Option<&str> {
    self.get(key).map(String::as_str)
  }
}

/// Split a line into literal text and `${key}` tokens.
///
/// Parsing never fails. Adjacent literal text is merged into one segment.
pub fn parse(input: &str) -> Vec<Segment> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut rest = input;

  while let Some(start) = rest.find("${") {
    literal.push_str(&rest[..start]);
    let after_open = &rest[start + 2..];

    match after_open.find('}') {
      Some(end) => {
        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Placeholder(after_open[..end].to_string()));
        rest = &after_open[end + 1..];
      }
      None => {
        // Unclosed: everything from here on is literal
        literal.push_str(&rest[start..]);
        rest = "";
      }
    }
  }

  literal.push_str(rest);
  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  segments
}

/// Substitute all known placeholders in a string.
pub fn substitute(input: &str, resolver: &impl Resolver) -> String {
  substitute_segments(&parse(input), resolver)
}

/// Substitute placeholders in pre-parsed segments.
///
/// Unknown keys are written back as `${key}`.
pub fn substitute_segments(segments: &[Segment], resolver: &impl Resolver) -> String {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Placeholder(key) => match resolver.resolve(key) {
        Some(value) => result.push_str(value),
        None => {
          result.push_str("${");
          result.push_str(key);
          result.push('}');
        }
      },
    }
  }

  result
}
