//! Implementation of the `p2feature plan` command.
//!
//! This command computes what `generate` would add to the feature manifest
//! and the advice file, without writing anything.

use std::path::Path;

use anyhow::{Context, Result};

use p2feature_lib::config::load_config;
use p2feature_lib::generate::plan;

use crate::output::{print_info, print_json, print_stat, print_success, print_summary};

pub fn cmd_plan(config: &Path, verbose: bool, json: bool) -> Result<()> {
  let project =
    load_config(config).with_context(|| format!("Failed to load project file: {}", config.display()))?;

  let plan = plan(&project).context("Failed to compute plan")?;

  if json {
    return print_json(&plan);
  }

  print_success(&format!("Plan for {} {}", plan.feature_id, plan.version));
  print_stat("Output", &plan.output_dir.display().to_string());
  print_stat("Properties", &plan.properties.to_string());
  println!();

  if plan.manifest.is_empty() {
    print_info("feature.xml is up to date");
  } else {
    println!("feature.xml:");
    print_summary(&plan.manifest, verbose);
  }

  println!();
  if plan.advice_lines.is_empty() {
    print_info("No advice to write");
  } else {
    let action = if plan.advice_exists { "update" } else { "create" };
    println!("p2.inf ({}):", action);
    print_stat("Lines", &plan.advice_lines.len().to_string());
    print_stat("Entries added", &plan.advice_added.to_string());
    if verbose {
      for line in &plan.advice_lines {
        println!("    {}", line);
      }
    }
  }

  Ok(())
}
