use anyhow::Context;
use tracing::{debug, info};

use a11ylens_domain::compile_registries;
use a11ylens_types::{
    CardCounts, CardSelectionViewData, CardsViewModel, ConfigFile, ConversionMode,
    EngineScanResult, ScanResults, TOOL_NAME, TargetAppInfo, ToolInfo, UNIFIED_SCHEMA_V1,
    UnifiedResult, UnifiedRule, UnifiedScanResult,
};

use crate::cards::{card_counts, get_card_view_data};
use crate::decorate::{ResultDecorator, StaticTitle};
use crate::unified_results::{UidGenerator, UnifiedResultConverter};
use crate::unified_rules::convert_scan_results_to_unified_rules;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportPlan {
    /// Title of the scanned page.
    pub title: String,
    pub mode: ConversionMode,
    /// UI state for the card view. `None` renders with nothing selected or expanded.
    pub selection: Option<CardSelectionViewData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRun {
    pub scan_results: ScanResults,
    pub unified: UnifiedScanResult,
    pub cards: CardsViewModel,
    pub counts: CardCounts,
}

/// Decorate, unify and build cards for one engine result.
pub fn run_report<G>(
    plan: &ReportPlan,
    config: &ConfigFile,
    engine_json: &str,
    uids: G,
) -> Result<ReportRun, anyhow::Error>
where
    G: UidGenerator,
{
    let engine: EngineScanResult =
        serde_json::from_str(engine_json).context("parse engine scan result")?;
    let registries = compile_registries(config).context("compile configuration")?;
    debug!(
        "compiled {} rules, {} guidance entries, {} suppressed messages",
        registries.rules.len(),
        registries.guidance.len(),
        registries.suppression.len()
    );

    let decorator = ResultDecorator::new(&registries, StaticTitle(plan.title.clone()));
    let scan_results = decorator
        .decorate_results(Some(&engine))
        .context("decoration produced no results")?;

    let rules = convert_scan_results_to_unified_rules(Some(&scan_results));
    let results = UnifiedResultConverter::new(&registries.rules, uids)
        .convert(Some(&scan_results), plan.mode);
    debug!(
        "{} conversion: {} rules, {} results",
        plan.mode.as_str(),
        rules.len(),
        results.len()
    );

    let selection = plan.selection.clone().unwrap_or_default();
    let cards = get_card_view_data(Some(&rules[..]), Some(&results[..]), Some(&selection))
        .context("card view requires rules, results and selection")?;
    let counts = card_counts(&cards);
    info!(
        "cards: {} fail ({} instances), {} unknown ({} instances), {} pass, {} inapplicable",
        counts.fail_rules,
        counts.fail_instances,
        counts.unknown_rules,
        counts.unknown_instances,
        counts.pass_rules,
        counts.inapplicable_rules
    );

    let unified = build_unified_scan_result(&scan_results, rules, results);

    Ok(ReportRun {
        scan_results,
        unified,
        cards,
        counts,
    })
}

/// Wrap unified rules and results in the export envelope.
pub fn build_unified_scan_result(
    scan: &ScanResults,
    rules: Vec<UnifiedRule>,
    results: Vec<UnifiedResult>,
) -> UnifiedScanResult {
    UnifiedScanResult {
        schema: UNIFIED_SCHEMA_V1.to_string(),
        tool_info: ToolInfo {
            name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        target_app_info: TargetAppInfo {
            name: scan.target_page_title.clone(),
            url: scan.target_page_url.clone(),
        },
        timestamp: scan.timestamp.clone(),
        rules,
        results,
    }
}
