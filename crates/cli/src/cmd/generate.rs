//! Implementation of the `p2feature generate` command.
//!
//! This command loads a project file and writes the feature artifacts into
//! the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use p2feature_lib::config::load_config;
use p2feature_lib::generate::generate;

use crate::output::{print_artifact, print_error, print_json, print_stat, print_success, print_summary, print_warning};

/// Execute the generate command.
///
/// Prints one line per artifact and the manifest reconciliation summary.
/// Fails if the properties cannot be produced or if any artifact failed.
pub fn cmd_generate(config: &Path, output: Option<PathBuf>, verbose: bool, json: bool) -> Result<()> {
  let mut project =
    load_config(config).with_context(|| format!("Failed to load project file: {}", config.display()))?;

  if let Some(dir) = output {
    info!(output = %dir.display(), "overriding output directory");
    project.paths.output_dir = dir;
  }

  let report = match generate(&project) {
    Ok(report) => report,
    Err(e) => {
      if !json {
        print_error(&e.to_string());
      }
      return Err(e).context("Feature generation aborted");
    }
  };

  if json {
    print_json(&report)?;
  } else {
    print_success(&format!("Feature {} {}", report.feature_id, report.version));
    print_stat("Output", &report.output_dir.display().to_string());
    println!();
    for artifact in &report.artifacts {
      print_artifact(artifact);
    }
    if let Some(summary) = &report.manifest {
      println!();
      print_summary(summary, verbose);
    }
    if report.advice_added > 0 {
      print_stat("Advice entries added", &report.advice_added.to_string());
    }
  }

  let failed = report.failures().count();
  if failed > 0 {
    if !json {
      print_warning(&format!("{} artifact(s) failed", failed));
    }
    bail!("{} artifact(s) failed", failed);
  }

  Ok(())
}
