//! CLI integration tests for p2feature.

mod common;
mod generate_tests;
mod plan_tests;
