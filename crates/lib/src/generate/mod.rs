//! Artifact generation for one feature project.
//!
//! This module runs the full generation flow:
//!
//! 1. Merge feature properties and check mandatory keys (failure aborts)
//! 2. Write `feature.properties`
//! 3. Reconcile and write `feature.xml`
//! 4. Refresh and append `p2.inf`
//! 5. Write the `META-INF/MANIFEST.MF` stub
//!
//! Steps 2 to 5 are independent: a failing artifact is logged and recorded
//! in the report, and the remaining artifacts are still produced.

mod types;

pub use types::*;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, error, info};

use crate::advice::{merge, read_advice_file, write_advice_file};
use crate::assemble::{ReconcileSummary, reconcile};
use crate::config::ProjectConfig;
use crate::consts::{FEATURE_ROOT, FEATURE_VERSION_VAR, LINE_SEPARATOR};
use crate::properties::{merge_properties, write_properties_file};
use crate::util::fs::write_atomic;
use crate::xml::{load_document, write_document};

/// Fixed content of the manifest stub.
pub fn manifest_stub() -> String {
  format!("Manifest-Version: 1.0{LINE_SEPARATOR}{LINE_SEPARATOR}")
}

/// Variables available to advice lines.
pub fn advice_vars(config: &ProjectConfig) -> BTreeMap<String, String> {
  BTreeMap::from([(FEATURE_VERSION_VAR.to_string(), config.feature.osgi_version())])
}

/// Generate every artifact of a feature project.
///
/// # Errors
///
/// Returns an error only if the feature properties cannot be merged or a
/// mandatory property is missing. Failures writing any artifact are reported
/// in [`GenerateReport::artifacts`].
pub fn generate(config: &ProjectConfig) -> Result<GenerateReport, GenerateError> {
  let output_dir = &config.paths.output_dir;
  info!(feature = %config.feature.id, output = %output_dir.display(), "starting generation");

  let mut report = GenerateReport {
    feature_id: config.feature.id.clone(),
    version: config.feature.osgi_version(),
    output_dir: output_dir.clone(),
    artifacts: Vec::new(),
    manifest: None,
    advice_added: 0,
  };

  let properties = merge_properties(config)?;

  run_artifact(&mut report, Artifact::Properties, |path, _| {
    info!("Generating feature properties");
    let written = write_properties_file(path, &config.feature.id, &properties)?;
    Ok(if written {
      ArtifactStatus::Written
    } else {
      ArtifactStatus::Skipped
    })
  });

  run_artifact(&mut report, Artifact::Manifest, |path, report| {
    let summary = generate_manifest(config, path)?;
    report.manifest = Some(summary);
    Ok(ArtifactStatus::Written)
  });

  run_artifact(&mut report, Artifact::Advice, |path, report| {
    let (status, added) = generate_advice(config, path)?;
    report.advice_added = added;
    Ok(status)
  });

  run_artifact(&mut report, Artifact::ManifestStub, |path, _| {
    info!("Generating MANIFEST.MF");
    write_atomic(path, &manifest_stub()).map_err(|source| GenerateError::Write {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(ArtifactStatus::Written)
  });

  let failed = report.failures().count();
  if failed == 0 {
    info!(artifacts = report.artifacts.len(), "generation complete");
  } else {
    error!(failed, "generation finished with failures");
  }

  Ok(report)
}

fn run_artifact<F>(report: &mut GenerateReport, artifact: Artifact, f: F)
where
  F: FnOnce(&Path, &mut GenerateReport) -> Result<ArtifactStatus, GenerateError>,
{
  let path = report.output_dir.join(artifact.file_name());
  let status = match f(&path, report) {
    Ok(status) => status,
    Err(e) => {
      error!(artifact = artifact.file_name(), error = %e, "artifact failed");
      ArtifactStatus::Failed { error: e.to_string() }
    }
  };
  report.artifacts.push(ArtifactReport { artifact, path, status });
}

fn generate_manifest(config: &ProjectConfig, path: &Path) -> Result<ReconcileSummary, GenerateError> {
  info!("Generating feature manifest");
  let mut document = load_document(config.paths.manifest.as_deref(), FEATURE_ROOT)?;
  let summary = reconcile(&config.feature, &mut document.root);
  debug!(
    attributes = summary.attributes_set.len(),
    sections = summary.sections_created.len(),
    entries = summary.total_added(),
    "manifest reconciled"
  );
  write_document(&document, path)?;
  Ok(summary)
}

fn generate_advice(config: &ProjectConfig, path: &Path) -> Result<(ArtifactStatus, usize), GenerateError> {
  let existing = read_advice_file(path)?;
  if existing.is_some() {
    info!("Updating advice file (p2.inf)");
  } else {
    info!("Generating advice file (p2.inf)");
  }

  let lines = merge(
    existing.as_deref().unwrap_or_default(),
    &config.feature.advice,
    &advice_vars(config),
  )?;
  if lines.is_empty() {
    debug!("No advice to write");
    return Ok((ArtifactStatus::Skipped, 0));
  }

  write_advice_file(path, &lines)?;
  let status = if existing.is_some() {
    ArtifactStatus::Updated
  } else {
    ArtifactStatus::Written
  };
  Ok((status, config.feature.advice.len()))
}

/// Compute what [`generate`] would do, without writing anything.
///
/// Unlike [`generate`], any unreadable input aborts the plan.
pub fn plan(config: &ProjectConfig) -> Result<GeneratePlan, GenerateError> {
  let properties = merge_properties(config)?;

  let mut document = load_document(config.paths.manifest.as_deref(), FEATURE_ROOT)?;
  let manifest = reconcile(&config.feature, &mut document.root);

  let advice_path = config.paths.output_dir.join(Artifact::Advice.file_name());
  let existing = read_advice_file(&advice_path)?;
  let advice_lines = merge(
    existing.as_deref().unwrap_or_default(),
    &config.feature.advice,
    &advice_vars(config),
  )?;

  Ok(GeneratePlan {
    feature_id: config.feature.id.clone(),
    version: config.feature.osgi_version(),
    output_dir: config.paths.output_dir.clone(),
    properties: properties.len(),
    manifest,
    advice_exists: existing.is_some(),
    advice_lines,
    advice_added: config.feature.advice.len(),
  })
}
