//! OSGi version normalization and import compatibility rules.
//!
//! Feature manifests carry OSGi versions (`major.minor.micro[.qualifier]`),
//! while project files usually carry build-tool versions such as
//! `1.0.0-SNAPSHOT`. [`osgi_version`] maps the latter onto the former.

use serde::{Deserialize, Serialize};

/// Normalize a version string into OSGi form.
///
/// - a `-` starts the qualifier
/// - up to three leading all-digit segments become major/minor/micro,
///   padded with `0` and stripped of leading zeros
/// - remaining dot segments join the qualifier with `_`
/// - qualifier characters outside `[A-Za-z0-9_-]` become `_`
///
/// ```
/// use p2feature_lib::version::osgi_version;
///
/// assert_eq!(osgi_version("1.0.0-SNAPSHOT"), "1.0.0.SNAPSHOT");
/// assert_eq!(osgi_version("4.2"), "4.2.0");
/// ```
pub fn osgi_version(raw: &str) -> String {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return "0.0.0".to_string();
  }

  let (dotted, dashed) = match trimmed.split_once('-') {
    Some((head, tail)) => (head, Some(tail)),
    None => (trimmed, None),
  };

  let mut numbers: Vec<String> = Vec::with_capacity(3);
  let mut qualifier_parts: Vec<&str> = Vec::new();

  for segment in dotted.split('.') {
    let numeric = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
    if numeric && numbers.len() < 3 && qualifier_parts.is_empty() {
      numbers.push(strip_leading_zeros(segment));
    } else if !segment.is_empty() {
      qualifier_parts.push(segment);
    }
  }

  while numbers.len() < 3 {
    numbers.push("0".to_string());
  }

  let mut qualifier = qualifier_parts.join("_");
  if let Some(tail) = dashed.filter(|t| !t.is_empty()) {
    if !qualifier.is_empty() {
      qualifier.push('-');
    }
    qualifier.push_str(tail);
  }

  let mut version = numbers.join(".");
  if !qualifier.is_empty() {
    version.push('.');
    version.push_str(&sanitize_qualifier(&qualifier));
  }
  version
}

fn strip_leading_zeros(segment: &str) -> String {
  let stripped = segment.trim_start_matches('0');
  if stripped.is_empty() {
    "0".to_string()
  } else {
    stripped.to_string()
  }
}

fn sanitize_qualifier(qualifier: &str) -> String {
  qualifier
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
    .collect()
}

/// Compatibility rule declared for an imported feature.
///
/// Every rule except [`Compatibility::Patch`] maps onto a `match` attribute
/// of the `import` element; a patch import is written as `patch="true"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Compatibility {
  Perfect,
  #[default]
  Equivalent,
  Compatible,
  GreaterOrEqual,
  Patch,
}

impl Compatibility {
  /// Returns true if the import is a patch import.
  pub fn is_patch(self) -> bool {
    matches!(self, Compatibility::Patch)
  }

  /// The `match` attribute value, or `None` for patch imports.
  pub fn match_rule(self) -> Option<&'static str> {
    match self {
      Compatibility::Perfect => Some("perfect"),
      Compatibility::Equivalent => Some("equivalent"),
      Compatibility::Compatible => Some("compatible"),
      Compatibility::GreaterOrEqual => Some("greaterOrEqual"),
      Compatibility::Patch => None,
    }
  }
}
