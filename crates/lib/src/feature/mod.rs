//! Feature definition types.
//!
//! A feature definition is the declared desired state of a feature: its root
//! metadata, the bundles it packages, the features it imports and includes,
//! and the advice entries appended to `p2.inf`.

mod types;

pub use types::*;
