//! Proptest strategies for generating valid test inputs.
//!
//! Rule ids are drawn from a small pool so that generated scans repeat ids
//! across buckets, and check messages from a pool that includes messages the
//! sample configs suppress.
//!
//! # Bounds
//!
//! To keep tests fast, the following bounds are enforced:
//! - Max rules per bucket: 5
//! - Max nodes per rule: 4
//! - Max checks per check group: 3
//! - Max selector segments per node: 3
//! - Max unified results: 12

use a11ylens_types::{
    CardSelectionViewData, CheckConfig, CheckResult, ConfigFile, Descriptors, EngineScanResult,
    EngineTimestamp, GuidanceLink, HighlightStatus, Identifiers, NodeDecorator, NodeResult,
    Resolution, ResultStatus, RuleConfig, RuleResult, ScanResults, UnifiedResult, UnifiedRule,
};
use proptest::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Constants for bounding generated data
// =============================================================================

/// Maximum number of rule results per bucket
pub const MAX_RULES_PER_BUCKET: usize = 5;

/// Maximum number of nodes per rule result
pub const MAX_NODES_PER_RULE: usize = 4;

/// Maximum number of checks in each of `any`, `all`, `none`
pub const MAX_CHECKS_PER_GROUP: usize = 3;

/// Maximum number of selector path segments per node
pub const MAX_TARGET_SEGMENTS: usize = 3;

/// Maximum number of unified results
pub const MAX_RESULTS: usize = 12;

/// Rule ids used by generated data; a mix of configured and unconfigured ids.
pub const RULE_ID_POOL: &[&str] = &[
    "image-alt",
    "image-function",
    "link-name",
    "link-purpose",
    "color-contrast",
    "region",
    "heading-order",
    "label",
    "custom-rule",
    "engine-only-rule",
];

/// Check messages used by generated data.
pub const MESSAGE_POOL: &[&str] = &[
    "Element has an alt attribute",
    "Element does not have an alt attribute",
    "Fix this",
    "  ELEMENT IS HIDDEN  ",
    "element is hidden",
    "",
];

const IMAGE_TYPES: &[&str] = &["decorative", "informative", "functional"];

/// A rule id that never appears in [`RULE_ID_POOL`].
pub const DANGLING_RULE_ID: &str = "dangling-rule";

// =============================================================================
// Enum Strategies
// =============================================================================

pub fn arb_result_status() -> impl Strategy<Value = ResultStatus> {
    prop_oneof![
        Just(ResultStatus::Pass),
        Just(ResultStatus::Fail),
        Just(ResultStatus::Unknown),
    ]
}

pub fn arb_highlight_status() -> impl Strategy<Value = HighlightStatus> {
    prop_oneof![
        Just(HighlightStatus::Visible),
        Just(HighlightStatus::Hidden),
        Just(HighlightStatus::Unavailable),
    ]
}

pub fn arb_node_decorator() -> impl Strategy<Value = NodeDecorator> {
    prop_oneof![
        Just(NodeDecorator::LinkSummary),
        Just(NodeDecorator::ImageSummary),
    ]
}

// =============================================================================
// Engine-shaped Strategies
// =============================================================================

pub fn arb_rule_id() -> impl Strategy<Value = String> {
    prop::sample::select(RULE_ID_POOL).prop_map(str::to_string)
}

pub fn arb_message() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(MESSAGE_POOL).prop_map(str::to_string),
        1 => "[A-Za-z ]{0,40}",
    ]
}

/// Check data resembling what the engine attaches: null, a contrast
/// measurement, or collected link/image facts.
pub fn arb_check_data() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (1.0f64..21.0).prop_map(|ratio| json!({
            "contrastRatio": ratio,
            "fgColor": "#777777",
            "bgColor": "#ffffff",
        })),
        ("[A-Za-z ]{0,12}", "https://[a-z]{1,8}\\.com/").prop_map(|(name, url)| json!({
            "accessibleName": name,
            "url": url,
        })),
        prop::sample::select(IMAGE_TYPES)
            .prop_map(|kind| json!({ "imageType": kind })),
    ]
}

pub fn arb_check_result() -> impl Strategy<Value = CheckResult> {
    (
        "[a-z]{2,8}(-[a-z]{2,8})?",
        arb_message(),
        arb_check_data(),
        any::<bool>(),
    )
        .prop_map(|(id, message, data, result)| CheckResult {
            id,
            message,
            data,
            result,
        })
}

pub fn arb_checks() -> impl Strategy<Value = Vec<CheckResult>> {
    prop::collection::vec(arb_check_result(), 0..=MAX_CHECKS_PER_GROUP)
}

/// A selector path: one segment per frame boundary, each possibly using
/// child combinators.
pub fn arb_target() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        "[a-z]{1,6}( > [a-z]{1,6}(\\.[a-z]{1,4})?){0,2}",
        1..=MAX_TARGET_SEGMENTS,
    )
}

pub fn arb_node_result() -> impl Strategy<Value = NodeResult> {
    (
        arb_target(),
        "<[a-z]{1,6}>",
        prop::option::of("[A-Za-z ]{1,20}"),
        prop::option::of("Fix (any|all) of the following"),
        arb_checks(),
        arb_checks(),
        arb_checks(),
    )
        .prop_map(
            |(target, html, snippet, failure_summary, any, all, none)| NodeResult {
                target,
                html,
                snippet,
                failure_summary,
                any,
                all,
                none,
            },
        )
}

pub fn arb_rule_result() -> impl Strategy<Value = RuleResult> {
    (
        arb_rule_id(),
        "[A-Za-z ]{0,30}",
        "[A-Za-z ]{0,30}",
        "https://engine\\.test/[a-z]{1,10}",
        prop::collection::vec(arb_node_result(), 0..=MAX_NODES_PER_RULE),
    )
        .prop_map(|(id, description, help, help_url, nodes)| RuleResult {
            id,
            description,
            help,
            help_url,
            nodes,
            guidance_links: None,
        })
}

pub fn arb_rule_results() -> impl Strategy<Value = Vec<RuleResult>> {
    prop::collection::vec(arb_rule_result(), 0..=MAX_RULES_PER_BUCKET)
}

pub fn arb_engine_timestamp() -> impl Strategy<Value = EngineTimestamp> {
    prop_oneof![
        (0i64..4_102_444_800_000).prop_map(EngineTimestamp::EpochMillis),
        Just(EngineTimestamp::Text("2024-05-01T12:00:00.000Z".to_string())),
    ]
}

pub fn arb_engine_scan_result() -> impl Strategy<Value = EngineScanResult> {
    (
        arb_rule_results(),
        arb_rule_results(),
        arb_rule_results(),
        arb_rule_results(),
        arb_engine_timestamp(),
        "https://[a-z]{1,8}\\.example/",
    )
        .prop_map(
            |(passes, violations, incomplete, inapplicable, timestamp, url)| EngineScanResult {
                passes,
                violations,
                incomplete,
                inapplicable,
                timestamp,
                url,
            },
        )
}

/// Already-decorated scan results; some rules carry guidance links.
pub fn arb_scan_results() -> impl Strategy<Value = ScanResults> {
    let rules = || {
        prop::collection::vec(
            (arb_rule_result(), any::<bool>()).prop_map(|(rule, with_links)| RuleResult {
                guidance_links: with_links.then(|| vec![GuidanceLink::best_practice()]),
                ..rule
            }),
            0..=MAX_RULES_PER_BUCKET,
        )
    };
    (rules(), rules(), rules(), rules(), "[A-Za-z ]{0,20}").prop_map(
        |(passes, violations, incomplete, inapplicable, title)| ScanResults {
            passes,
            violations,
            incomplete,
            inapplicable,
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            target_page_url: "https://page.example/".to_string(),
            target_page_title: title,
        },
    )
}

// =============================================================================
// Unified / Card Strategies
// =============================================================================

/// Unified rules with distinct ids, as the rule converter emits them.
pub fn arb_unified_rules() -> impl Strategy<Value = Vec<UnifiedRule>> {
    prop::collection::btree_set(arb_rule_id(), 0..=RULE_ID_POOL.len()).prop_map(|ids| {
        ids.into_iter()
            .map(|id| UnifiedRule {
                description: format!("{id} description"),
                url: format!("https://help.test/{id}"),
                guidance: vec![],
                id,
            })
            .collect()
    })
}

/// Unified results referencing `rule_ids`, with uids `uid-0`, `uid-1`, ...
///
/// `rule_ids` must not be empty.
pub fn arb_unified_results(rule_ids: Vec<String>) -> impl Strategy<Value = Vec<UnifiedResult>> {
    prop::collection::vec(
        (prop::sample::select(rule_ids), arb_result_status(), arb_target()),
        0..=MAX_RESULTS,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (rule_id, status, target))| {
                let selector = target.join(";");
                UnifiedResult {
                    uid: format!("uid-{i}"),
                    status,
                    rule_id,
                    identifiers: Identifiers {
                        identifier: selector.clone(),
                        concise_name: target.last().cloned().unwrap_or_default(),
                        css_selector: selector,
                    },
                    descriptors: Descriptors {
                        snippet: "<div>".to_string(),
                    },
                    resolution: Resolution::default(),
                }
            })
            .collect()
    })
}

/// Rules plus results drawn from those rules' ids and [`DANGLING_RULE_ID`].
pub fn arb_unified_rules_and_results()
-> impl Strategy<Value = (Vec<UnifiedRule>, Vec<UnifiedResult>)> {
    arb_unified_rules().prop_flat_map(|rules| {
        let ids: Vec<String> = rules
            .iter()
            .map(|r| r.id.clone())
            .chain(std::iter::once(DANGLING_RULE_ID.to_string()))
            .collect();
        (Just(rules), arb_unified_results(ids))
    })
}

/// Selection state over the uid and rule-id space the other strategies use.
pub fn arb_selection() -> impl Strategy<Value = CardSelectionViewData> {
    let uid = || (0..MAX_RESULTS).prop_map(|i| format!("uid-{i}"));
    (
        prop::collection::vec(uid(), 0..=4),
        prop::collection::vec(arb_rule_id(), 0..=3),
        any::<bool>(),
        prop::collection::btree_map(uid(), arb_highlight_status(), 0..=4),
    )
        .prop_map(|(selected, expanded, helper, highlights)| CardSelectionViewData {
            selected_result_uids: selected,
            expanded_rule_ids: expanded,
            visual_helper_enabled: helper,
            results_highlight_status: highlights,
        })
}

// =============================================================================
// Configuration Strategies
// =============================================================================

/// Message templates built from literal text and `{data...}` placeholders.
pub fn arb_template() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z ]{1,12}",
            Just("{data}".to_string()),
            Just("{data.accessibleName}".to_string()),
            Just("{data.contrastRatio}".to_string()),
            Just("{data.missing.path}".to_string()),
        ],
        0..=4,
    )
    .prop_map(|parts| parts.concat())
}

pub fn arb_check_config() -> impl Strategy<Value = CheckConfig> {
    (
        "[a-z]{2,8}",
        prop::option::of(arb_template()),
        prop::option::of(arb_template()),
    )
        .prop_map(|(id, pass_message, fail_message)| CheckConfig {
            id,
            pass_message,
            fail_message,
        })
}

/// A rule config for `id` whose guidance keys all exist in the built-in
/// link catalog.
pub fn arb_rule_config(id: String) -> impl Strategy<Value = RuleConfig> {
    let link_ids: Vec<String> = ConfigFile::built_in()
        .link
        .into_iter()
        .map(|l| l.id)
        .collect();
    let text = (
        prop::option::of("[A-Za-z ]{1,30}"),
        prop::option::of("[A-Za-z ]{1,30}"),
        prop::option::of("https://custom\\.test/[a-z]{1,8}"),
    );
    let flags = (
        prop::option::of(arb_node_decorator()),
        any::<bool>(),
        any::<bool>(),
    );
    (
        text,
        flags,
        prop::sample::subsequence(link_ids, 0..=3),
        prop::collection::btree_map("[a-z]{2,8}", arb_check_config(), 0..=3),
    )
        .prop_map(move |(text, flags, guidance, checks)| {
            let (description, help, help_url) = text;
            let (decorate_node, how_to_check, best_practice) = flags;
            RuleConfig {
                id: id.clone(),
                description,
                help,
                help_url,
                decorate_node,
                how_to_check,
                guidance,
                best_practice,
                checks: checks
                    .into_iter()
                    .map(|(key, cfg)| CheckConfig { id: key, ..cfg })
                    .collect(),
            }
        })
}

/// The built-in link catalog plus rules with distinct ids.
pub fn arb_config_file() -> impl Strategy<Value = ConfigFile> {
    prop::collection::btree_set(arb_rule_id(), 0..=RULE_ID_POOL.len())
        .prop_flat_map(|ids| ids.into_iter().map(arb_rule_config).collect::<Vec<_>>())
        .prop_map(|rule| ConfigFile {
            rule,
            link: ConfigFile::built_in().link,
            ..Default::default()
        })
}
