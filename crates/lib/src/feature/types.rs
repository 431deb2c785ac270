use serde::{Deserialize, Serialize};

use crate::version::{Compatibility, osgi_version};

/// Default label, resolved through `feature.properties`.
pub const DEFAULT_LABEL: &str = "%featureName";
/// Default provider name, resolved through `feature.properties`.
pub const DEFAULT_PROVIDER_NAME: &str = "%providerName";
/// Default description text, resolved through `feature.properties`.
pub const DEFAULT_DESCRIPTION: &str = "%description";
/// Default copyright text, resolved through `feature.properties`.
pub const DEFAULT_COPYRIGHT: &str = "%copyright";
/// Default licence text, resolved through `feature.properties`.
pub const DEFAULT_LICENSE: &str = "%license";
/// Default licence URL, resolved through `feature.properties`.
pub const DEFAULT_LICENSE_URL: &str = "%licenseURL";

/// The declared desired state of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FeatureDefinition {
  pub id: String,
  pub version: String,
  #[serde(default = "default_label")]
  pub label: String,
  #[serde(default = "default_provider_name")]
  pub provider_name: String,
  #[serde(default = "default_description")]
  pub description: String,
  #[serde(default = "default_copyright")]
  pub copyright: String,
  /// Licence text.
  #[serde(default = "default_license")]
  pub license: String,
  #[serde(default = "default_license_url")]
  pub license_url: String,

  #[serde(default)]
  pub bundles: Vec<Bundle>,
  #[serde(default)]
  pub import_features: Vec<ImportFeature>,
  #[serde(default)]
  pub include_features: Vec<IncludeFeature>,
  #[serde(default)]
  pub advice: Vec<Advice>,
}

impl FeatureDefinition {
  /// Create a definition with default metadata and no entries.
  pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      version: version.into(),
      label: default_label(),
      provider_name: default_provider_name(),
      description: default_description(),
      copyright: default_copyright(),
      license: default_license(),
      license_url: default_license_url(),
      bundles: Vec::new(),
      import_features: Vec::new(),
      include_features: Vec::new(),
      advice: Vec::new(),
    }
  }

  /// The feature version in OSGi form.
  pub fn osgi_version(&self) -> String {
    osgi_version(&self.version)
  }
}

fn default_label() -> String {
  DEFAULT_LABEL.to_string()
}

fn default_provider_name() -> String {
  DEFAULT_PROVIDER_NAME.to_string()
}

fn default_description() -> String {
  DEFAULT_DESCRIPTION.to_string()
}

fn default_copyright() -> String {
  DEFAULT_COPYRIGHT.to_string()
}

fn default_license() -> String {
  DEFAULT_LICENSE.to_string()
}

fn default_license_url() -> String {
  DEFAULT_LICENSE_URL.to_string()
}

/// A bundle packaged by the feature, written as a `plugin` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Bundle {
  pub symbolic_name: String,
  pub version: String,
}

/// A feature required by this feature.
///
/// Mandatory imports become `require/import` elements; optional imports are
/// materialized as `includes` elements instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImportFeature {
  pub id: String,
  pub version: String,
  #[serde(default)]
  pub optional: bool,
  #[serde(default)]
  pub compatibility: Compatibility,
}

/// A feature included by this feature, written as an `includes` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IncludeFeature {
  pub id: String,
  pub version: String,
  #[serde(default)]
  pub optional: bool,
}

/// One property assertion appended to the advice document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
  pub name: String,
  pub value: String,
}

/// Element kinds that reconciliation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
  Plugin,
  Import,
  Include,
}

impl EntryKind {
  /// Element name in the manifest.
  pub fn element(self) -> &'static str {
    match self {
      EntryKind::Plugin => "plugin",
      EntryKind::Import => "import",
      EntryKind::Include => "includes",
    }
  }

  /// Attribute holding the identity key.
  pub fn identity_attribute(self) -> &'static str {
    match self {
      EntryKind::Plugin | EntryKind::Include => "id",
      EntryKind::Import => "feature",
    }
  }

  /// Container element the entries live in, `None` for the root.
  pub fn container(self) -> Option<&'static str> {
    match self {
      EntryKind::Import => Some("require"),
      EntryKind::Plugin | EntryKind::Include => None,
    }
  }
}

/// An entry that reconciliation can match against existing elements.
pub trait Entry {
  /// Identity key, unique within one desired list.
  fn identity(&self) -> &str;

  /// Declared version, as written in the project file.
  fn version(&self) -> &str;
}

impl Entry for Bundle {
  fn identity(&self) -> &str {
    &self.symbolic_name
  }

  fn version(&self) -> &str {
    &self.version
  }
}

impl Entry for ImportFeature {
  fn identity(&self) -> &str {
    &self.id
  }

  fn version(&self) -> &str {
    &self.version
  }
}

impl Entry for IncludeFeature {
  fn identity(&self) -> &str {
    &self.id
  }

  fn version(&self) -> &str {
    &self.version
  }
}

impl<T: Entry + ?Sized> Entry for &T {
  fn identity(&self) -> &str {
    (**self).identity()
  }

  fn version(&self) -> &str {
    (**self).version()
  }
}
