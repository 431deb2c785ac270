//! Missing-entry computation between a desired entry list and a manifest tree.
//!
//! Reconciliation is keyed on identity only. An entry whose identity already
//! appears in the tree is left alone even if its version differs: the
//! existing document wins.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::feature::{Entry, EntryKind};
use crate::xml::Element;

/// Compute the desired entries of `kind` that are absent from `tree`.
///
/// The result keeps the relative order of `desired`. Identity matching is
/// exact string equality against the kind's identity attribute.
///
/// # Scan Scope
///
/// - `plugin` and `includes`: direct children of the root
/// - `import`: direct children of the first `require` child of the root; a
///   tree without `require` has no existing imports
///
/// When `desired` repeats an identity, the first declaration is kept.
pub fn missing<'a, E: Entry>(desired: &'a [E], tree: &Element, kind: EntryKind) -> Vec<&'a E> {
  if desired.is_empty() {
    return Vec::new();
  }

  // Position-ordered pending entries plus an identity index into them
  let mut pending: BTreeMap<usize, &'a E> = BTreeMap::new();
  let mut by_identity: HashMap<&'a str, usize> = HashMap::new();

  for (position, entry) in desired.iter().enumerate() {
    match by_identity.entry(entry.identity()) {
      MapEntry::Vacant(slot) => {
        slot.insert(position);
        pending.insert(position, entry);
      }
      MapEntry::Occupied(_) => {
        warn!(
          "Duplicate {} entry '{}' ignored; the first declaration is used",
          kind.element(),
          entry.identity()
        );
      }
    }
  }

  for existing in existing_nodes(tree, kind) {
    let Some(identity) = existing.attr(kind.identity_attribute()) else {
      continue;
    };
    if let Some(position) = by_identity.remove(identity) {
      debug!("{} '{}' already present in manifest", kind.element(), identity);
      pending.remove(&position);
    }
  }

  pending.into_values().collect()
}

fn existing_nodes(tree: &Element, kind: EntryKind) -> Box<dyn Iterator<Item = &Element> + '_> {
  match kind.container() {
    Some(container) => match tree.find_child(container) {
      Some(parent) => Box::new(parent.children_named(kind.element())),
      None => Box::new(std::iter::empty()),
    },
    None => Box::new(tree.children_named(kind.element())),
  }
}
