//! Tests for manifest reconciliation through the public API.

use p2feature_lib::assemble::reconcile;
use p2feature_lib::feature::{Bundle, EntryKind, FeatureDefinition};
use p2feature_lib::reconcile::missing;
use p2feature_lib::xml::{Document, Element, parse_document, to_xml_string};

use super::common::{FULL_PROJECT, project};

fn full_definition() -> FeatureDefinition {
  project(FULL_PROJECT, std::path::Path::new(".")).feature
}

fn ids<'a>(parent: &'a Element, name: &'a str, attr: &'a str) -> Vec<&'a str> {
  parent.children_named(name).filter_map(|e| e.attr(attr)).collect()
}

mod idempotence {
  use super::*;

  #[test]
  fn from_fabricated_root() {
    let def = full_definition();
    let mut doc = Document::with_root("feature");
    reconcile(&def, &mut doc.root);
    let first = to_xml_string(&doc);

    let mut again = parse_document(&first).unwrap();
    reconcile(&def, &mut again.root);
    assert_eq!(to_xml_string(&again), first);
  }

  #[test]
  fn from_hand_written_manifest() {
    let existing = r#"<?xml version="1.0" encoding="UTF-8"?>
<feature id="org.example.feature" version="3.0.0">
    <!-- maintained by hand -->
    <description url="http://example.org">Hand written</description>
    <plugin id="org.example.core" version="3.0.0"/>
    <unknown-element keep="me"/>
    <require>
        <import plugin="org.example.bundle"/>
        <import feature="org.eclipse.platform" version="4.0.0"/>
    </require>
</feature>
"#;
    let def = full_definition();

    let mut doc = parse_document(existing).unwrap();
    reconcile(&def, &mut doc.root);
    let first = to_xml_string(&doc);

    let mut again = parse_document(&first).unwrap();
    let summary = reconcile(&def, &mut again.root);
    assert!(summary.is_empty());
    assert_eq!(to_xml_string(&again), first);

    assert!(first.contains("<!-- maintained by hand -->"));
    assert!(first.contains(r#"<unknown-element keep="me"/>"#));
    assert!(first.contains(r#"<import plugin="org.example.bundle"/>"#));
  }
}

mod exactly_once {
  use super::*;

  #[test]
  fn absent_identities_added_once_present_untouched() {
    let mut doc = parse_document(
      r#"<feature>
        <plugin id="org.example.core" version="0.0.1" unpack="true"/>
        <require><import feature="org.eclipse.platform" version="1.0.0" match="perfect"/></require>
      </feature>"#,
    )
    .unwrap();
    reconcile(&full_definition(), &mut doc.root);

    assert_eq!(ids(&doc.root, "plugin", "id"), vec!["org.example.core", "org.example.ui"]);
    let core = doc.root.find_child("plugin").unwrap();
    assert_eq!(core.attr("version"), Some("0.0.1"));
    assert_eq!(core.attr("unpack"), Some("true"));

    let require = doc.root.find_child("require").unwrap();
    assert_eq!(
      ids(require, "import", "feature"),
      vec!["org.eclipse.platform", "org.eclipse.patched"]
    );
    let platform = require.find_child("import").unwrap();
    assert_eq!(platform.attr("version"), Some("1.0.0"));
    assert_eq!(platform.attr("match"), Some("perfect"));
  }

  #[test]
  fn optional_imports_become_includes_only() {
    let mut doc = Document::with_root("feature");
    reconcile(&full_definition(), &mut doc.root);

    let require = doc.root.find_child("require").unwrap();
    assert!(!ids(require, "import", "feature").contains(&"org.example.optional"));
    assert_eq!(
      ids(&doc.root, "includes", "id"),
      vec!["org.example.docs", "org.example.optional"]
    );

    let optional = doc
      .root
      .children_named("includes")
      .find(|e| e.attr("id") == Some("org.example.optional"))
      .unwrap();
    assert_eq!(optional.attr("optional"), Some("true"));

    let patched = require
      .children_named("import")
      .find(|e| e.attr("feature") == Some("org.eclipse.patched"))
      .unwrap();
    assert_eq!(patched.attr("patch"), Some("true"));
    assert!(!patched.has_attr("match"));
  }

  #[test]
  fn mandatory_imports_never_become_includes() {
    let mut doc = Document::with_root("feature");
    reconcile(&full_definition(), &mut doc.root);

    let includes = ids(&doc.root, "includes", "id");
    assert!(!includes.contains(&"org.eclipse.platform"));
    assert!(!includes.contains(&"org.eclipse.patched"));
  }
}

mod root_attributes {
  use super::*;

  #[test]
  fn existing_id_preserved_missing_label_set() {
    let mut doc = parse_document(r#"<feature id="foo"/>"#).unwrap();
    reconcile(&full_definition(), &mut doc.root);

    assert_eq!(doc.root.attr("id"), Some("foo"));
    assert_eq!(doc.root.attr("label"), Some("%featureName"));
    assert_eq!(doc.root.attr("version"), Some("3.1.0.beta"));
    assert_eq!(doc.root.attr("provider-name"), Some("Example Org"));
  }
}

mod empty_lists {
  use super::*;

  #[test]
  fn no_entries_no_new_nodes() {
    let def = FeatureDefinition::new("org.example.empty", "1.0.0");
    let mut doc = parse_document(r#"<feature id="x"><require/></feature>"#).unwrap();
    let summary = reconcile(&def, &mut doc.root);

    assert_eq!(summary.total_added(), 0);
    assert!(!summary.require_created);
    assert_eq!(doc.root.children_named("plugin").count(), 0);
    assert_eq!(doc.root.children_named("includes").count(), 0);
  }

  #[test]
  fn missing_over_empty_list() {
    let doc = parse_document(r#"<feature><plugin id="a"/></feature>"#).unwrap();
    let none: Vec<Bundle> = Vec::new();
    assert!(missing(&none, &doc.root, EntryKind::Plugin).is_empty());
  }
}
