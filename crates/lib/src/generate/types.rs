//! Report types for generation runs.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::advice::AdviceError;
use crate::assemble::ReconcileSummary;
use crate::consts::{FEATURE_PROPERTIES, FEATURE_XML, MANIFEST_MF, P2_INF};
use crate::properties::PropertiesError;
use crate::xml::XmlError;

/// The artifacts produced for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
  Properties,
  Manifest,
  Advice,
  ManifestStub,
}

impl Artifact {
  /// Path of the artifact relative to the output directory.
  pub fn file_name(self) -> &'static str {
    match self {
      Artifact::Properties => FEATURE_PROPERTIES,
      Artifact::Manifest => FEATURE_XML,
      Artifact::Advice => P2_INF,
      Artifact::ManifestStub => MANIFEST_MF,
    }
  }
}

/// Outcome of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ArtifactStatus {
  /// Written from scratch.
  Written,
  /// An existing file was read and rewritten.
  Updated,
  /// Nothing to write.
  Skipped,
  /// Generation failed; the other artifacts were still attempted.
  Failed { error: String },
}

/// Outcome of one artifact, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
  pub artifact: Artifact,
  pub path: PathBuf,
  #[serde(flatten)]
  pub status: ArtifactStatus,
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateReport {
  pub feature_id: String,

  /// Feature version in OSGi form.
  pub version: String,

  pub output_dir: PathBuf,

  /// One entry per artifact, in generation order.
  pub artifacts: Vec<ArtifactReport>,

  /// What manifest reconciliation added, if the manifest was produced.
  pub manifest: Option<ReconcileSummary>,

  /// Number of advice entries appended.
  pub advice_added: usize,
}

impl GenerateReport {
  /// Artifacts that failed.
  pub fn failures(&self) -> impl Iterator<Item = &ArtifactReport> {
    self
      .artifacts
      .iter()
      .filter(|a| matches!(a.status, ArtifactStatus::Failed { .. }))
  }

  /// Returns true if every artifact succeeded or was skipped.
  pub fn is_success(&self) -> bool {
    self.failures().next().is_none()
  }

  /// Status of a given artifact, if it was attempted.
  pub fn status(&self, artifact: Artifact) -> Option<&ArtifactStatus> {
    self.artifacts.iter().find(|a| a.artifact == artifact).map(|a| &a.status)
  }
}

/// What a generation run would do, computed without writing anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratePlan {
  pub feature_id: String,

  /// Feature version in OSGi form.
  pub version: String,

  pub output_dir: PathBuf,

  /// Merged feature properties.
  pub properties: usize,

  /// What manifest reconciliation would add.
  pub manifest: ReconcileSummary,

  /// Whether an advice file from a previous run exists.
  pub advice_exists: bool,

  /// Advice lines that would be written, in order.
  pub advice_lines: Vec<String>,

  /// Number of advice entries that would be appended.
  pub advice_added: usize,
}

/// Errors that abort a generation run or a plan.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error(transparent)]
  Properties(#[from] PropertiesError),

  #[error(transparent)]
  Manifest(#[from] XmlError),

  #[error(transparent)]
  Advice(#[from] AdviceError),

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}
