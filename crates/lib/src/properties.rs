//! Feature property files.
//!
//! The generated `feature.properties` is the union of, in increasing
//! precedence:
//!
//! 1. `feature.properties` in the project resource directory
//! 2. the configured property file
//! 3. the inline `[properties]` table of the project file
//!
//! The merged set must define every key in [`MANDATORY_PROPERTIES`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::consts::{FEATURE_PROPERTIES, LINE_SEPARATOR, MANDATORY_PROPERTIES};
use crate::util::fs::{TextReadError, read_text, write_atomic};

/// Property key/value pairs, ordered by key.
pub type Properties = BTreeMap<String, String>;

/// Errors that can occur when merging or writing feature properties.
#[derive(Debug, Error)]
pub enum PropertiesError {
  #[error("failed to read property file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("property file {} is not valid UTF-8", path.display())]
  Encoding { path: PathBuf },

  #[error("{}", missing_message(.0))]
  MissingMandatory(Vec<String>),

  #[error("unable to create the feature.properties file {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

fn missing_message(keys: &[String]) -> String {
  match keys {
    [key] => format!("Mandatory property \"{key}\" is missing in provided property file(s)"),
    _ => format!(
      "Mandatory properties [{}] are missing in provided property file(s)",
      keys.join(", ")
    ),
  }
}

/// Merge every property source of a project and check mandatory keys.
pub fn merge_properties(config: &ProjectConfig) -> Result<Properties, PropertiesError> {
  let mut merged = Properties::new();

  let resource_file = config.paths.resource_dir.join(FEATURE_PROPERTIES);
  let sources = [Some(resource_file.as_path()), config.paths.property_file.as_deref()];
  for path in sources.into_iter().flatten() {
    if path.exists() {
      debug!("Loading properties from {}", path.display());
      merged.extend(load_properties_file(path)?);
    }
  }

  merged.extend(config.properties.iter().map(|(k, v)| (k.clone(), v.clone())));

  let missing = missing_mandatory(&merged);
  if !missing.is_empty() {
    return Err(PropertiesError::MissingMandatory(missing));
  }

  Ok(merged)
}

/// Mandatory keys absent from `props`, in declaration order.
pub fn missing_mandatory(props: &Properties) -> Vec<String> {
  MANDATORY_PROPERTIES
    .iter()
    .filter(|key| !props.contains_key(**key))
    .map(|key| key.to_string())
    .collect()
}

/// Read and parse a property file.
pub fn load_properties_file(path: &Path) -> Result<Properties, PropertiesError> {
  let content = read_text(path).map_err(|e| match e {
    TextReadError::Io(source) => PropertiesError::Read {
      path: path.to_path_buf(),
      source,
    },
    TextReadError::Encoding => PropertiesError::Encoding {
      path: path.to_path_buf(),
    },
  })?;
  Ok(parse_properties(&content))
}

/// Parse `.properties` text.
///
/// # Format
///
/// - lines whose first non-blank character is `#` or `!` are comments
/// - the key ends at the first unescaped `=`, `:` or whitespace
/// - a line ending in an odd number of backslashes continues on the next
///   line, whose leading whitespace is skipped
/// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other
///   escaped character stands for itself
///
/// Later definitions of a key override earlier ones.
pub fn parse_properties(content: &str) -> Properties {
  let mut props = Properties::new();
  let mut lines = content.lines();

  while let Some(first) = lines.next() {
    let first = first.trim_start();
    if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
      continue;
    }

    let mut logical = String::from(first);
    while ends_with_continuation(&logical) {
      logical.pop();
      match lines.next() {
        Some(next) => logical.push_str(next.trim_start()),
        None => break,
      }
    }

    let (key, value) = split_key_value(&logical);
    props.insert(unescape(key), unescape(value));
  }

  props
}

fn ends_with_continuation(line: &str) -> bool {
  line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
  let mut escaped = false;
  let mut key_end = line.len();
  for (i, c) in line.char_indices() {
    if escaped {
      escaped = false;
    } else if c == '\\' {
      escaped = true;
    } else if c == '=' || c == ':' || c.is_whitespace() {
      key_end = i;
      break;
    }
  }

  let key = &line[..key_end];
  let rest = line[key_end..].trim_start();
  let rest = match rest.strip_prefix(['=', ':']) {
    Some(value) => value.trim_start(),
    None => rest,
  };
  (key, rest)
}

fn unescape(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars();

  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('t') => out.push('\t'),
      Some('n') => out.push('\n'),
      Some('r') => out.push('\r'),
      Some('f') => out.push('\u{c}'),
      Some('u') => {
        let hex: String = chars.by_ref().take(4).collect();
        match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
          Some(decoded) if hex.len() == 4 => out.push(decoded),
          _ => {
            out.push_str("\\u");
            out.push_str(&hex);
          }
        }
      }
      Some(other) => out.push(other),
      None => {}
    }
  }

  out
}

/// Render properties with a `#Properties of <id>` header, sorted by key.
pub fn to_properties_string(feature_id: &str, props: &Properties) -> String {
  let mut out = format!("#Properties of {feature_id}{LINE_SEPARATOR}");
  for (key, value) in props {
    out.push_str(&escape(key, true));
    out.push('=');
    out.push_str(&escape(value, false));
    out.push_str(LINE_SEPARATOR);
  }
  out
}

fn escape(text: &str, is_key: bool) -> String {
  let mut out = String::with_capacity(text.len());
  for (i, c) in text.chars().enumerate() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\t' => out.push_str("\\t"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\u{c}' => out.push_str("\\f"),
      '=' | ':' | '#' | '!' if is_key => {
        out.push('\\');
        out.push(c);
      }
      ' ' if is_key || i == 0 => out.push_str("\\ "),
      _ => out.push(c),
    }
  }
  out
}

/// Write the merged properties of a feature. Nothing is written for an
/// empty set; returns whether the file was written.
pub fn write_properties_file(path: &Path, feature_id: &str, props: &Properties) -> Result<bool, PropertiesError> {
  if props.is_empty() {
    return Ok(false);
  }

  write_atomic(path, &to_properties_string(feature_id, props)).map_err(|source| PropertiesError::Write {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(true)
}
