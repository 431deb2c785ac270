//! Advice document (`p2.inf`) merging.
//!
//! The advice document is line oriented. Existing lines are kept in order,
//! with `${key}` placeholders refreshed, and each new [`Advice`] entry is
//! appended as a `properties.<N>.name` / `properties.<N>.value` pair whose
//! index continues from the highest index already in use.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::LINE_SEPARATOR;
use crate::feature::Advice;
use crate::placeholder::{Resolver, substitute};
use crate::util::fs::{TextReadError, read_text, write_atomic};

const PROPERTY_PREFIX: &str = "properties.";

/// Errors that can occur when reading or writing an advice file.
#[derive(Debug, Error)]
pub enum AdviceError {
  #[error("error while reading advice file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("unable to read advice file {}: unsupported encoding in existing file", path.display())]
  Encoding { path: PathBuf },

  #[error("unable to write advice file {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("cannot append {count} advice entries after properties.{last}: index out of range")]
  IndexOverflow { last: usize, count: usize },
}

/// Merge new advice entries after the existing advice lines.
///
/// Every existing line passes through placeholder substitution with `vars`.
/// New entries are numbered from one past the highest existing property
/// index, or from 0 when there is none.
///
/// # Errors
///
/// Returns [`AdviceError::IndexOverflow`] if the new indices do not fit
/// after the highest existing one.
pub fn merge(existing: &[String], new: &[Advice], vars: &impl Resolver) -> Result<Vec<String>, AdviceError> {
  let mut lines: Vec<String> = existing.iter().map(|line| substitute(line, vars)).collect();
  if new.is_empty() {
    return Ok(lines);
  }

  let start = match last_property_index(existing) {
    Some(last) if last.checked_add(new.len()).is_some() => last + 1,
    Some(last) => return Err(AdviceError::IndexOverflow { last, count: new.len() }),
    None => 0,
  };
  for (offset, advice) in new.iter().enumerate() {
    let index = start + offset;
    debug!("Appending advice properties.{}.name={}", index, advice.name);
    lines.push(format!("{PROPERTY_PREFIX}{index}.name={}", advice.name));
    lines.push(format!("{PROPERTY_PREFIX}{index}.value={}", advice.value));
  }

  Ok(lines)
}

/// Highest `N` among `properties.N.name` and `properties.N.value` lines.
pub fn last_property_index<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
  lines.iter().filter_map(|line| property_index(line.as_ref())).max()
}

fn property_index(line: &str) -> Option<usize> {
  let rest = line.trim_start().strip_prefix(PROPERTY_PREFIX)?;
  let (index, rest) = rest.split_once('.')?;
  if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }

  let key_end = rest.find(['=', ':']).unwrap_or(rest.len());
  match rest[..key_end].trim_end() {
    "name" | "value" => index.parse().ok(),
    _ => None,
  }
}

/// Read an advice file into lines. Returns `None` if the file does not exist.
pub fn read_advice_file(path: &Path) -> Result<Option<Vec<String>>, AdviceError> {
  if !path.exists() {
    return Ok(None);
  }

  let content = read_text(path).map_err(|e| match e {
    TextReadError::Io(source) => AdviceError::Read {
      path: path.to_path_buf(),
      source,
    },
    TextReadError::Encoding => AdviceError::Encoding {
      path: path.to_path_buf(),
    },
  })?;

  Ok(Some(content.lines().map(str::to_string).collect()))
}

/// Write advice lines atomically, each followed by the line separator.
pub fn write_advice_file(path: &Path, lines: &[String]) -> Result<(), AdviceError> {
  let mut content = String::new();
  for line in lines {
    content.push_str(line);
    content.push_str(LINE_SEPARATOR);
  }

  write_atomic(path, &content).map_err(|source| AdviceError::Write {
    path: path.to_path_buf(),
    source,
  })
}
