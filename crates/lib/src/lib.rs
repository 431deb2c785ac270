//! p2feature-lib: Core types and logic for p2feature
//!
//! This crate reconciles the artifacts of an Eclipse p2 feature against a
//! declared feature definition:
//! - `feature.xml`: the feature manifest, reconciled entry by entry
//! - `p2.inf`: the advice document, refreshed and appended to
//! - `feature.properties`: merged property sources
//! - `META-INF/MANIFEST.MF`: a fixed stub

pub mod advice;
pub mod assemble;
pub mod config;
pub mod consts;
pub mod feature;
pub mod generate;
pub mod placeholder;
pub mod properties;
pub mod reconcile;
pub mod util;
pub mod version;
pub mod xml;
