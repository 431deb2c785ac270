//! Plan command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plan_reports_without_writing() {
  let env = TestEnv::from_fixture("basic.toml");

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("Plan for org.example.feature 1.0.0.SNAPSHOT"))
    .stdout(predicate::str::contains("Plugins added: 2"))
    .stdout(predicate::str::contains("Includes added: 2"))
    .stdout(predicate::str::contains("p2.inf (create)"));

  assert!(!env.output_path().exists());
}

#[test]
fn plan_after_generate_reports_up_to_date_manifest() {
  let env = TestEnv::from_fixture("basic.toml");
  env.cmd().arg("generate").assert().success();

  let rerun = format!(
    "{}\nmanifest = \"out/feature.xml\"\n",
    super::common::fixture_content("basic.toml").trim_end()
  );
  env.write_file("p2feature.toml", &rerun);
  let before = env.read_output("p2.inf");

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("feature.xml is up to date"))
    .stdout(predicate::str::contains("p2.inf (update)"));

  assert_eq!(env.read_output("p2.inf"), before);
}

#[test]
fn plan_verbose_lists_advice_lines() {
  let env = TestEnv::from_fixture("basic.toml");

  env
    .cmd()
    .arg("plan")
    .arg("-v")
    .assert()
    .success()
    .stdout(predicate::str::contains("properties.0.name=org.eclipse.equinox.p2.type.group"));
}

#[test]
fn plan_json_output_is_valid() {
  let env = TestEnv::from_fixture("basic.toml");

  let output = env.cmd().arg("plan").arg("--json").output().unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["version"], "1.0.0.SNAPSHOT");
  assert_eq!(plan["properties"], 2);
  assert_eq!(plan["manifest"]["require_created"], true);
  assert_eq!(plan["advice_exists"], false);
}

#[test]
fn plan_malformed_manifest_fails() {
  let env = TestEnv::from_fixture("malformed_manifest.toml");
  env.write_file("broken.xml", "<feature>");

  env
    .cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to compute plan"));
}
