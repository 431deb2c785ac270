//! Filesystem helpers shared by the artifact writers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

/// Error reading a text file.
#[derive(Debug)]
pub enum TextReadError {
  /// The file could not be read.
  Io(io::Error),
  /// The file is not valid UTF-8.
  Encoding,
}

/// Read a UTF-8 text file, dropping a leading byte order mark.
pub fn read_text(path: &Path) -> Result<String, TextReadError> {
  let bytes = fs::read(path).map_err(TextReadError::Io)?;
  let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
  String::from_utf8(bytes.to_vec()).map_err(|_| TextReadError::Encoding)
}

/// Write `content` to `path` atomically.
///
/// The content goes to a temporary file in the target directory, which is
/// then renamed over the target. Parent directories are created as needed.
/// A failed write leaves any previous file at `path` untouched.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
  let parent = match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };
  fs::create_dir_all(parent)?;

  let mut temp = NamedTempFile::new_in(parent)?;
  temp.write_all(content.as_bytes())?;
  temp.flush()?;
  temp.persist(path).map_err(|e| e.error)?;

  trace!("Wrote {} byte(s) to {}", content.len(), path.display());
  Ok(())
}
