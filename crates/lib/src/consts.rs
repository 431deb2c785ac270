//! Process-wide constants.

/// Line separator used for every generated text artifact.
pub const LINE_SEPARATOR: &str = "\n";

/// Default project file name.
pub const CONFIG_FILENAME: &str = "p2feature.toml";

/// Feature manifest file name.
pub const FEATURE_XML: &str = "feature.xml";

/// Advice file name.
pub const P2_INF: &str = "p2.inf";

/// Feature property file name.
pub const FEATURE_PROPERTIES: &str = "feature.properties";

/// Manifest stub location, relative to the output directory.
pub const MANIFEST_MF: &str = "META-INF/MANIFEST.MF";

/// Root element of a fabricated feature manifest.
pub const FEATURE_ROOT: &str = "feature";

/// Variable resolved in advice lines.
pub const FEATURE_VERSION_VAR: &str = "feature.version";

/// Keys that must be present in the merged feature properties.
pub const MANDATORY_PROPERTIES: &[&str] = &["license"];
