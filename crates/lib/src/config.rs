//! Project file loading.
//!
//! The project file (`p2feature.toml`) declares the feature definition, the
//! inline feature properties and the path layout of one feature project.
//!
//! # Project File Format
//!
//! ```toml
//! [feature]
//! id = "org.example.feature"
//! version = "1.0.0-SNAPSHOT"
//!
//! [[bundles]]
//! symbolic-name = "org.example.core"
//! version = "1.0.0"
//!
//! [[import-features]]
//! id = "org.eclipse.rcp"
//! version = "4.2.0"
//! compatibility = "greaterOrEqual"
//!
//! [[include-features]]
//! id = "org.example.docs"
//! version = "1.0.0"
//! optional = true
//!
//! [[advice]]
//! name = "org.eclipse.equinox.p2.type.group"
//! value = "true"
//!
//! [properties]
//! license = "Apache License 2.0"
//!
//! [paths]
//! manifest = "feature.xml"
//! output-dir = "target/feature"
//! ```
//!
//! Relative paths resolve against the directory containing the project file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::feature::{Advice, Bundle, FeatureDefinition, ImportFeature, IncludeFeature};
use crate::util::fs::{TextReadError, read_text};

/// Default resource directory, relative to the project directory.
pub const DEFAULT_RESOURCE_DIR: &str = "src/main/resources";

/// Errors that can occur when loading a project file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read project file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("project file {} is not valid UTF-8", path.display())]
  Encoding { path: PathBuf },

  #[error("failed to parse project file {}: {source}", path.display())]
  Parse { path: PathBuf, source: toml::de::Error },
}

/// A fully resolved feature project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
  /// The desired state of the feature.
  pub feature: FeatureDefinition,
  /// Inline properties; they override every property file.
  pub properties: BTreeMap<String, String>,
  /// Resolved path layout.
  pub paths: ProjectPaths,
}

/// Absolute (or project-relative resolved) paths of one feature project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
  /// Existing feature manifest to reconcile against, if any.
  pub manifest: Option<PathBuf>,
  /// Additional property file, if any.
  pub property_file: Option<PathBuf>,
  /// Resource directory searched for `feature.properties`.
  pub resource_dir: PathBuf,
  /// Directory receiving the generated artifacts.
  pub output_dir: PathBuf,
}

impl ProjectConfig {
  /// Build a project rooted at `base_dir` with the default layout.
  pub fn new(feature: FeatureDefinition, base_dir: &Path) -> Self {
    let output_dir = base_dir.join(default_output_dir(&feature));
    Self {
      feature,
      properties: BTreeMap::new(),
      paths: ProjectPaths {
        manifest: None,
        property_file: None,
        resource_dir: base_dir.join(DEFAULT_RESOURCE_DIR),
        output_dir,
      },
    }
  }
}

/// Default output directory: `target/raw/features/<id>_<osgi version>`.
pub fn default_output_dir(feature: &FeatureDefinition) -> PathBuf {
  PathBuf::from("target")
    .join("raw")
    .join("features")
    .join(format!("{}_{}", feature.id, feature.osgi_version()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ProjectFile {
  feature: FeatureDefinition,
  #[serde(default)]
  bundles: Vec<Bundle>,
  #[serde(default)]
  import_features: Vec<ImportFeature>,
  #[serde(default)]
  include_features: Vec<IncludeFeature>,
  #[serde(default)]
  advice: Vec<Advice>,
  #[serde(default)]
  properties: BTreeMap<String, String>,
  #[serde(default)]
  paths: PathsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PathsSection {
  manifest: Option<PathBuf>,
  property_file: Option<PathBuf>,
  resource_dir: Option<PathBuf>,
  output_dir: Option<PathBuf>,
}

/// Load and resolve a project file.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
  debug!("Loading project file: {}", path.display());

  let content = read_text(path).map_err(|e| match e {
    TextReadError::Io(source) => ConfigError::Read {
      path: path.to_path_buf(),
      source,
    },
    TextReadError::Encoding => ConfigError::Encoding {
      path: path.to_path_buf(),
    },
  })?;

  let base_dir = path.parent().unwrap_or(Path::new("."));
  parse_config(&content, base_dir).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse project file content, resolving relative paths against `base_dir`.
pub fn parse_config(content: &str, base_dir: &Path) -> Result<ProjectConfig, toml::de::Error> {
  let file: ProjectFile = toml::from_str(content)?;

  let mut feature = file.feature;
  feature.bundles.extend(file.bundles);
  feature.import_features.extend(file.import_features);
  feature.include_features.extend(file.include_features);
  feature.advice.extend(file.advice);

  let resolve = |p: PathBuf| if p.is_absolute() { p } else { base_dir.join(p) };

  let paths = ProjectPaths {
    manifest: file.paths.manifest.map(resolve),
    property_file: file.paths.property_file.map(resolve),
    resource_dir: resolve(file.paths.resource_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR))),
    output_dir: resolve(file.paths.output_dir.unwrap_or_else(|| default_output_dir(&feature))),
  };

  debug!(
    "Project {}: {} bundle(s), {} import(s), {} include(s), {} advice entr(ies)",
    feature.id,
    feature.bundles.len(),
    feature.import_features.len(),
    feature.include_features.len(),
    feature.advice.len()
  );

  Ok(ProjectConfig {
    feature,
    properties: file.properties,
    paths,
  })
}
