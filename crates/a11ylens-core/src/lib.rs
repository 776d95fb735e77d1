//! Core pipeline: decorates raw engine output, converts it to the unified
//! model and builds the status-grouped card view model.

mod cards;
mod decorate;
mod report;
mod unified_results;
mod unified_rules;

pub use cards::{card_counts, get_card_view_data};
pub use decorate::{DocumentTitleProvider, ResultDecorator, StaticTitle, normalize_timestamp};
pub use report::{ReportPlan, ReportRun, build_unified_scan_result, run_report};
pub use unified_results::{
    UidGenerator, UnifiedResultConverter, UuidGenerator, identifiers_for_target,
};
pub use unified_rules::convert_scan_results_to_unified_rules;
