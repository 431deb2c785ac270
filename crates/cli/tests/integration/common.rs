//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// Each test gets its own temporary project directory. Fixture project files
/// declare `output-dir = "out"`, so artifacts land in `<temp>/out`.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file.
  ///
  /// Copies the fixture content to a temporary `p2feature.toml` file.
  pub fn from_fixture(name: &str) -> Self {
    let env = Self::empty();
    std::fs::write(&env.config_path, fixture_content(name)).unwrap();
    env
  }

  /// Create an empty test environment.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("p2feature.toml");
    Self { temp, config_path }
  }

  /// Copy a fixture into the project directory under another name.
  pub fn copy_fixture(&self, name: &str, relative_path: &str) {
    self.write_file(relative_path, &fixture_content(name));
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Output directory of fixture projects.
  pub fn output_path(&self) -> PathBuf {
    self.temp.path().join("out")
  }

  /// Read a generated artifact relative to the output directory.
  pub fn read_output(&self, relative_path: &str) -> String {
    let path = self.output_path().join(relative_path);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  /// Get a pre-configured Command for the p2feature binary.
  ///
  /// Runs inside the project directory with `RUST_LOG` cleared so the
  /// verbosity flag alone controls log output.
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("p2feature");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
