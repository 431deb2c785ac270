//! Generate command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const BASIC_FEATURE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<feature id="org.example.feature" label="%featureName" version="1.0.0.SNAPSHOT" provider-name="%providerName">
  <description>%description</description>
  <copyright>%copyright</copyright>
  <license url="%licenseURL">%license</license>
  <plugin id="org.example.core" version="1.0.0.SNAPSHOT" unpack="false"/>
  <plugin id="org.example.ui" version="1.0.0" unpack="false"/>
  <require>
    <import feature="org.eclipse.rcp" version="4.2.0" match="greaterOrEqual"/>
  </require>
  <includes id="org.example.docs" version="1.0.0" optional="false"/>
  <includes id="org.example.extras" version="1.0.0" optional="true"/>
</feature>
"#;

#[test]
fn generate_basic_project() {
  let env = TestEnv::from_fixture("basic.toml");

  env
    .cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("Feature org.example.feature 1.0.0.SNAPSHOT"))
    .stdout(predicate::str::contains("Plugins added: 2"));

  assert_eq!(env.read_output("feature.xml"), BASIC_FEATURE_XML);
  assert_eq!(
    env.read_output("p2.inf"),
    "properties.0.name=org.eclipse.equinox.p2.type.group\nproperties.0.value=true\n"
  );
  assert_eq!(
    env.read_output("feature.properties"),
    "#Properties of org.example.feature\nfeatureName=Example Feature\nlicense=Eclipse Public License 2.0\n"
  );
  assert_eq!(env.read_output("META-INF/MANIFEST.MF"), "Manifest-Version: 1.0\n\n");
}

#[test]
fn generate_with_explicit_config_path() {
  let env = TestEnv::empty();
  env.copy_fixture("basic.toml", "project/feature.toml");

  env
    .cmd()
    .arg("generate")
    .arg(env.temp.path().join("project/feature.toml"))
    .assert()
    .success();

  assert!(env.temp.path().join("project/out/feature.xml").exists());
}

#[test]
fn generate_output_flag_overrides_project() {
  let env = TestEnv::from_fixture("basic.toml");
  let custom = env.temp.path().join("custom");

  env
    .cmd()
    .arg("generate")
    .arg("--output")
    .arg(&custom)
    .assert()
    .success();

  assert!(custom.join("feature.xml").exists());
  assert!(!env.output_path().exists());
}

#[test]
fn generate_merges_into_existing_manifest() {
  let env = TestEnv::from_fixture("with_manifest.toml");
  env.copy_fixture("feature.xml", "feature.xml");

  env.cmd().arg("generate").assert().success();

  let expected = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- hand-maintained template -->
<feature id="org.example.custom" label="Custom Label" version="2.0.0" provider-name="%providerName">
  <description>Custom description</description>
  <plugin id="org.example.core" version="1.5.0" unpack="false"/>
  <copyright>%copyright</copyright>
  <license url="%licenseURL">%license</license>
  <plugin id="org.example.new" version="2.0.0" unpack="false"/>
  <require/>
</feature>
"#;
  assert_eq!(env.read_output("feature.xml"), expected);

  // The source manifest is never modified
  assert_eq!(
    std::fs::read_to_string(env.temp.path().join("feature.xml")).unwrap(),
    super::common::fixture_content("feature.xml")
  );
}

#[test]
fn generate_is_idempotent_over_its_own_output() {
  let env = TestEnv::from_fixture("basic.toml");
  env.cmd().arg("generate").assert().success();
  let first = env.read_output("feature.xml");

  let rerun = format!(
    "{}\nmanifest = \"out/feature.xml\"\n",
    super::common::fixture_content("basic.toml").trim_end()
  );
  env.write_file("p2feature.toml", &rerun);

  env.cmd().arg("generate").assert().success();
  assert_eq!(env.read_output("feature.xml"), first);
}

#[test]
fn generate_continues_advice_indices() {
  let env = TestEnv::from_fixture("basic.toml");
  env.write_file(
    "out/p2.inf",
    "properties.5.name=existing\nproperties.5.value=${feature.version}\n",
  );

  env
    .cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("p2.inf (updated)"));

  assert_eq!(
    env.read_output("p2.inf"),
    "properties.5.name=existing\nproperties.5.value=1.0.0.SNAPSHOT\nproperties.6.name=org.eclipse.equinox.p2.type.group\nproperties.6.value=true\n"
  );
}

#[test]
fn generate_missing_license_fails() {
  let env = TestEnv::from_fixture("no_license.toml");

  env
    .cmd()
    .arg("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "Mandatory property \"license\" is missing in provided property file(s)",
    ));

  assert!(!env.output_path().join("feature.xml").exists());
}

#[test]
fn generate_malformed_manifest_still_writes_other_artifacts() {
  let env = TestEnv::from_fixture("malformed_manifest.toml");
  env.write_file("broken.xml", "<feature id=\"x\"><plugin></feature>");

  env
    .cmd()
    .arg("generate")
    .assert()
    .failure()
    .stdout(predicate::str::contains("feature.xml: unable to parse feature manifest"))
    .stderr(predicate::str::contains("1 artifact(s) failed"));

  assert!(!env.output_path().join("feature.xml").exists());
  assert!(env.output_path().join("p2.inf").exists());
  assert!(env.output_path().join("META-INF/MANIFEST.MF").exists());
}

#[test]
fn generate_json_output_is_valid() {
  let env = TestEnv::from_fixture("basic.toml");

  let output = env.cmd().arg("generate").arg("--json").output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["feature_id"], "org.example.feature");
  assert_eq!(report["advice_added"], 1);
  assert_eq!(report["artifacts"].as_array().map(Vec::len), Some(4));
  assert_eq!(report["artifacts"][1]["artifact"], "manifest");
  assert_eq!(report["artifacts"][1]["status"], "written");
  assert_eq!(report["manifest"]["includes_added"][1], "org.example.extras");
}

#[test]
fn generate_verbose_logs_progress() {
  let env = TestEnv::from_fixture("basic.toml");

  env
    .cmd()
    .arg("generate")
    .arg("--verbose")
    .assert()
    .success()
    .stderr(predicate::str::contains("Generating feature manifest"))
    .stderr(predicate::str::contains("Generating advice file (p2.inf)"))
    .stdout(predicate::str::contains("org.example.ui"));
}

#[test]
fn generate_missing_project_file_fails() {
  let env = TestEnv::empty();

  env
    .cmd()
    .arg("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load project file"));
}
