//! Library integration tests for p2feature-lib.

mod common;
mod reconcile_tests;
