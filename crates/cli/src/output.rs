//! Terminal output for the p2feature commands.
//!
//! Status lines go to stdout and errors to stderr. Colors are only used when
//! the stream supports them.

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

use p2feature_lib::assemble::ReconcileSummary;
use p2feature_lib::generate::{ArtifactReport, ArtifactStatus};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const SKIP: &str = "-";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// One line per artifact: symbol, file name, and the status.
pub fn print_artifact(report: &ArtifactReport) {
  let name = report.artifact.file_name();
  match &report.status {
    ArtifactStatus::Written => println!(
      "  {} {}",
      symbols::ADD.if_supports_color(Stream::Stdout, |s| s.green()),
      name
    ),
    ArtifactStatus::Updated => println!(
      "  {} {} {}",
      symbols::MODIFY.if_supports_color(Stream::Stdout, |s| s.yellow()),
      name,
      "(updated)".if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
    ArtifactStatus::Skipped => println!(
      "  {} {} {}",
      symbols::SKIP.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      name,
      "(nothing to write)".if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
    ArtifactStatus::Failed { error } => println!(
      "  {} {}: {}",
      symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()),
      name,
      error.if_supports_color(Stream::Stdout, |s| s.red())
    ),
  }
}

/// Counts of what reconciliation added, with identities when verbose.
pub fn print_summary(summary: &ReconcileSummary, verbose: bool) {
  print_stat("Attributes set", &summary.attributes_set.len().to_string());
  print_stat("Sections created", &summary.sections_created.len().to_string());
  print_stat("Plugins added", &summary.plugins_added.len().to_string());
  print_stat("Imports added", &summary.imports_added.len().to_string());
  print_stat("Includes added", &summary.includes_added.len().to_string());

  if !verbose {
    return;
  }

  let groups = [
    ("attribute", &summary.attributes_set),
    ("section", &summary.sections_created),
    ("plugin", &summary.plugins_added),
    ("import", &summary.imports_added),
    ("includes", &summary.includes_added),
  ];
  for (kind, items) in groups {
    for item in items {
      println!(
        "    {} {} {}",
        symbols::ADD.if_supports_color(Stream::Stdout, |s| s.green()),
        kind.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        item
      );
    }
  }
}
