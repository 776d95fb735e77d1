//! Shared test utilities for the a11ylens workspace.
//!
//! This crate provides:
//! - **arb**: Proptest strategies for engine results, unified data and UI selection
//! - **scan_builder**: Fluent builder for engine scan results
//! - **schema**: JSON schema validators for DTOs
//! - **fixtures**: Sample configs and engine results for common scenarios
//!
//! # Example
//!
//! ```rust,ignore
//! use a11ylens_testkit::arb;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     fn rule_ids_are_never_empty(rule in arb::arb_rule_result()) {
//!         assert!(!rule.id.is_empty());
//!     }
//! }
//! ```

pub mod arb;
pub mod fixtures;
pub mod scan_builder;
pub mod schema;

pub use arb::{
    arb_config_file, arb_engine_scan_result, arb_rule_result, arb_scan_results,
    arb_selection, arb_unified_results, arb_unified_rules,
};
pub use fixtures::{sample_configs, sample_scans};
pub use scan_builder::{EngineScanBuilder, NodeBuilder, RuleBuilder};
pub use schema::{
    validate_cards_view_model, validate_config_file, validate_scan_results,
    validate_unified_scan_result,
};
