//! Manifest assembly.
//!
//! This module merges a [`FeatureDefinition`] into a manifest tree, adding
//! only what is missing. Nothing already present in the tree is modified: root
//! attributes, sections and entries that exist are kept as they are.

use serde::Serialize;
use tracing::debug;

use crate::feature::{Bundle, EntryKind, FeatureDefinition, ImportFeature, IncludeFeature};
use crate::reconcile::missing;
use crate::version::osgi_version;
use crate::xml::Element;

/// Name of the container for `import` elements.
const REQUIRE: &str = "require";

/// What a reconciliation pass added to the tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
  /// Root attributes that were set (absent before).
  pub attributes_set: Vec<String>,

  /// Sections (`description`, `copyright`, `license`) that were created.
  pub sections_created: Vec<String>,

  /// Identities of appended `plugin` elements.
  pub plugins_added: Vec<String>,

  /// Whether the `require` container was created.
  pub require_created: bool,

  /// Identities of appended `import` elements.
  pub imports_added: Vec<String>,

  /// Identities of appended `includes` elements, both declared includes and
  /// optional imports.
  pub includes_added: Vec<String>,
}

impl ReconcileSummary {
  /// Returns true if the pass did not change the tree.
  pub fn is_empty(&self) -> bool {
    self.attributes_set.is_empty()
      && self.sections_created.is_empty()
      && !self.require_created
      && self.total_added() == 0
  }

  /// Returns the number of entries appended.
  pub fn total_added(&self) -> usize {
    self.plugins_added.len() + self.imports_added.len() + self.includes_added.len()
  }
}

/// Merge the desired feature state into `tree`.
///
/// # Steps
///
/// 1. Root attributes `id`, `label`, `version`, `provider-name`, when absent
/// 2. `description` and `copyright` sections, when absent
/// 3. `license` section with its `url`, when absent
/// 4. Missing bundles as `plugin` elements
/// 5. The `require` container, when absent
/// 6. Missing mandatory imports as `import` elements under `require`
/// 7. Missing declared includes as `includes` elements
/// 8. Missing optional imports as `includes` elements
///
/// Steps 7 and 8 skip ids already present as `includes`, and step 8 also
/// skips optional imports already listed under `require`, so running the
/// same definition over its own output adds nothing.
pub fn reconcile(desired: &FeatureDefinition, tree: &mut Element) -> ReconcileSummary {
  let mut summary = ReconcileSummary::default();

  set_root_attributes(desired, tree, &mut summary);
  create_sections(desired, tree, &mut summary);
  add_plugins(&desired.bundles, tree, &mut summary);

  if !tree.has_child(REQUIRE) {
    debug!("Creating <{}> container", REQUIRE);
    tree.append(Element::new(REQUIRE));
    summary.require_created = true;
  }

  let (optional, mandatory): (Vec<&ImportFeature>, Vec<&ImportFeature>) =
    desired.import_features.iter().partition(|i| i.optional);

  add_imports(&mandatory, tree, &mut summary);
  add_includes(&desired.include_features, tree, &mut summary);
  add_optional_imports(&optional, tree, &mut summary);

  summary
}

fn set_root_attributes(desired: &FeatureDefinition, tree: &mut Element, summary: &mut ReconcileSummary) {
  let attributes = [
    ("id", desired.id.clone()),
    ("label", desired.label.clone()),
    ("version", desired.osgi_version()),
    ("provider-name", desired.provider_name.clone()),
  ];

  for (name, value) in attributes {
    if tree.set_attr_if_absent(name, value) {
      summary.attributes_set.push(name.to_string());
    }
  }
}

fn create_sections(desired: &FeatureDefinition, tree: &mut Element, summary: &mut ReconcileSummary) {
  for (name, text) in [("description", &desired.description), ("copyright", &desired.copyright)] {
    if !tree.has_child(name) {
      tree.append(Element::new(name).with_text(text.as_str()));
      summary.sections_created.push(name.to_string());
    }
  }

  if !tree.has_child("license") {
    tree.append(
      Element::new("license")
        .with_attr("url", desired.license_url.as_str())
        .with_text(desired.license.as_str()),
    );
    summary.sections_created.push("license".to_string());
  }
}

fn add_plugins(bundles: &[Bundle], tree: &mut Element, summary: &mut ReconcileSummary) {
  let to_add: Vec<Element> = missing(bundles, tree, EntryKind::Plugin)
    .into_iter()
    .map(|bundle| {
      debug!("Adding plugin '{}'", bundle.symbolic_name);
      summary.plugins_added.push(bundle.symbolic_name.clone());
      Element::new(EntryKind::Plugin.element())
        .with_attr("id", bundle.symbolic_name.as_str())
        .with_attr("version", osgi_version(&bundle.version))
        .with_attr("unpack", "false")
    })
    .collect();

  for element in to_add {
    tree.append(element);
  }
}

fn add_imports(imports: &[&ImportFeature], tree: &mut Element, summary: &mut ReconcileSummary) {
  let to_add: Vec<Element> = missing(imports, tree, EntryKind::Import)
    .into_iter()
    .map(|import| {
      debug!("Adding import '{}'", import.id);
      summary.imports_added.push(import.id.clone());
      import_element(import)
    })
    .collect();

  if to_add.is_empty() {
    return;
  }
  if let Some(require) = tree.find_child_mut(REQUIRE) {
    for element in to_add {
      require.append(element);
    }
  }
}

fn add_includes(includes: &[IncludeFeature], tree: &mut Element, summary: &mut ReconcileSummary) {
  let to_add: Vec<Element> = missing(includes, tree, EntryKind::Include)
    .into_iter()
    .map(|include| {
      debug!("Adding included feature '{}'", include.id);
      summary.includes_added.push(include.id.clone());
      includes_element(&include.id, &include.version, include.optional)
    })
    .collect();

  for element in to_add {
    tree.append(element);
  }
}

fn add_optional_imports(imports: &[&ImportFeature], tree: &mut Element, summary: &mut ReconcileSummary) {
  // Present as either `require/import` or `includes` counts as declared
  let not_imported: Vec<&ImportFeature> = missing(imports, tree, EntryKind::Import)
    .into_iter()
    .copied()
    .collect();
  let to_add: Vec<Element> = missing(&not_imported, tree, EntryKind::Include)
    .into_iter()
    .map(|import| {
      debug!("Adding optional import '{}' as included feature", import.id);
      summary.includes_added.push(import.id.clone());
      includes_element(&import.id, &import.version, true)
    })
    .collect();

  for element in to_add {
    tree.append(element);
  }
}

fn import_element(import: &ImportFeature) -> Element {
  let element = Element::new(EntryKind::Import.element())
    .with_attr("feature", import.id.as_str())
    .with_attr("version", osgi_version(&import.version));

  if import.compatibility.is_patch() {
    return element.with_attr("patch", "true");
  }
  match import.compatibility.match_rule() {
    Some(rule) => element.with_attr("match", rule),
    None => element,
  }
}

fn includes_element(id: &str, version: &str, optional: bool) -> Element {
  Element::new(EntryKind::Include.element())
    .with_attr("id", id)
    .with_attr("version", osgi_version(version))
    .with_attr("optional", if optional { "true" } else { "false" })
}
