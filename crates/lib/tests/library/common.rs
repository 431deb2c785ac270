//! Shared helpers for library integration tests.

use std::path::Path;

use p2feature_lib::config::{ProjectConfig, parse_config};

/// Project file declaring one entry of every kind.
pub const FULL_PROJECT: &str = r#"
[feature]
id = "org.example.feature"
version = "3.1-beta"
provider-name = "Example Org"

[[bundles]]
symbolic-name = "org.example.core"
version = "3.1.0"

[[bundles]]
symbolic-name = "org.example.ui"
version = "3.1.0"

[[import-features]]
id = "org.eclipse.platform"
version = "4.20.0"
compatibility = "compatible"

[[import-features]]
id = "org.eclipse.patched"
version = "4.20.0"
compatibility = "patch"

[[import-features]]
id = "org.example.optional"
version = "1.0.0"
optional = true

[[include-features]]
id = "org.example.docs"
version = "3.1.0"
optional = true

[[advice]]
name = "org.eclipse.equinox.p2.type.group"
value = "true"

[[advice]]
name = "org.eclipse.equinox.p2.name"
value = "Example Feature"

[properties]
license = "Apache License 2.0"

[paths]
output-dir = "out"
"#;

/// Parse a project file rooted at `base_dir`.
pub fn project(content: &str, base_dir: &Path) -> ProjectConfig {
  parse_config(content, base_dir).unwrap_or_else(|e| panic!("invalid test project: {}", e))
}
