//! Data types (engine input, scan results, unified results, card view models,
//! config) for a11ylens.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod built_in;

// ── Schema Identifiers ─────────────────────────────────────────
pub const UNIFIED_SCHEMA_V1: &str = "a11ylens.unified.v1";

// ── Frozen Vocabulary ──────────────────────────────────────────
pub const TOOL_NAME: &str = "a11ylens";
pub const BEST_PRACTICE_TEXT: &str = "Best Practice";

// ============================================================================
// Engine-shaped results (input + decorated)
// ============================================================================

/// One atomic check instance belonging to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CheckResult {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub result: bool,
}

/// One DOM element a rule was evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeResult {
    /// CSS-selector path segments (one per frame / shadow boundary).
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default)]
    pub html: String,
    /// Display snippet; set by node decorators, falls back to `html`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,
    #[serde(default)]
    pub any: Vec<CheckResult>,
    #[serde(default)]
    pub all: Vec<CheckResult>,
    #[serde(default)]
    pub none: Vec<CheckResult>,
}

impl NodeResult {
    /// Total number of checks across `any`, `all` and `none`.
    pub fn check_count(&self) -> usize {
        self.any.len() + self.all.len() + self.none.len()
    }

    pub fn is_empty(&self) -> bool {
        self.check_count() == 0
    }

    /// The snippet shown to users: the decorated snippet if present, else the
    /// engine-supplied html.
    pub fn display_snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or(&self.html)
    }
}

/// One rule's outcome within a single bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub help_url: String,
    #[serde(default)]
    pub nodes: Vec<NodeResult>,
    /// Attached during decoration. `None` means "no guidance", not an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_links: Option<Vec<GuidanceLink>>,
}

/// Engine timestamps arrive either as epoch milliseconds or pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EngineTimestamp {
    EpochMillis(i64),
    Text(String),
}

impl Default for EngineTimestamp {
    fn default() -> Self {
        EngineTimestamp::Text(String::new())
    }
}

/// Raw output of the rule-scanning engine. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct EngineScanResult {
    #[serde(default)]
    pub passes: Vec<RuleResult>,
    #[serde(default)]
    pub violations: Vec<RuleResult>,
    #[serde(default)]
    pub incomplete: Vec<RuleResult>,
    #[serde(default)]
    pub inapplicable: Vec<RuleResult>,
    #[serde(default)]
    pub timestamp: EngineTimestamp,
    #[serde(default)]
    pub url: String,
}

/// The four outcome buckets, in canonical iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Passes,
    Violations,
    Incomplete,
    Inapplicable,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Passes,
        Bucket::Violations,
        Bucket::Incomplete,
        Bucket::Inapplicable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Passes => "passes",
            Bucket::Violations => "violations",
            Bucket::Incomplete => "incomplete",
            Bucket::Inapplicable => "inapplicable",
        }
    }
}

impl EngineScanResult {
    pub fn bucket(&self, bucket: Bucket) -> &[RuleResult] {
        match bucket {
            Bucket::Passes => &self.passes,
            Bucket::Violations => &self.violations,
            Bucket::Incomplete => &self.incomplete,
            Bucket::Inapplicable => &self.inapplicable,
        }
    }
}

/// Canonical, decorated snapshot of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScanResults {
    pub passes: Vec<RuleResult>,
    pub violations: Vec<RuleResult>,
    pub incomplete: Vec<RuleResult>,
    pub inapplicable: Vec<RuleResult>,
    pub timestamp: String,
    pub target_page_url: String,
    pub target_page_title: String,
}

impl ScanResults {
    pub fn bucket(&self, bucket: Bucket) -> &[RuleResult] {
        match bucket {
            Bucket::Passes => &self.passes,
            Bucket::Violations => &self.violations,
            Bucket::Incomplete => &self.incomplete,
            Bucket::Inapplicable => &self.inapplicable,
        }
    }

    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<RuleResult> {
        match bucket {
            Bucket::Passes => &mut self.passes,
            Bucket::Violations => &mut self.violations,
            Bucket::Incomplete => &mut self.incomplete,
            Bucket::Inapplicable => &mut self.inapplicable,
        }
    }
}

// ============================================================================
// Guidance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceTag {
    pub id: String,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GuidanceLink {
    pub text: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<GuidanceTag>>,
}

impl GuidanceLink {
    /// Placeholder for rules without a formal standard citation.
    pub fn best_practice() -> Self {
        Self {
            text: BEST_PRACTICE_TEXT.to_string(),
            href: String::new(),
            tags: None,
        }
    }

    pub fn is_best_practice(&self) -> bool {
        self.href.is_empty() && self.text == BEST_PRACTICE_TEXT
    }
}

// ============================================================================
// Unified (engine-agnostic) model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnifiedRule {
    pub id: String,
    pub description: String,
    pub url: String,
    pub guidance: Vec<GuidanceLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Pass,
    Fail,
    Unknown,
}

impl ResultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultStatus::Pass => "pass",
            ResultStatus::Fail => "fail",
            ResultStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    pub identifier: String,
    /// Display convenience only; not unique.
    pub concise_name: String,
    #[serde(rename = "css-selector")]
    pub css_selector: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Descriptors {
    pub snippet: String,
}

/// Fix instructions: the node's check messages, grouped as the engine grouped them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct HowToFix {
    pub any: Vec<String>,
    pub none: Vec<String>,
    pub all: Vec<String>,
}

/// Status-dependent resolution payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Resolution {
    #[serde(
        rename = "how-to-fix-web",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub how_to_fix_web: Option<HowToFix>,
    #[serde(
        rename = "howToFixSummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub how_to_fix_summary: Option<String>,
    #[serde(
        rename = "how-to-check-web",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub how_to_check_web: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedResult {
    pub uid: String,
    pub status: ResultStatus,
    pub rule_id: String,
    pub identifiers: Identifiers,
    pub descriptors: Descriptors,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetAppInfo {
    pub name: String,
    pub url: String,
}

/// Export artifact combining unified rules and results for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedScanResult {
    pub schema: String,
    pub tool_info: ToolInfo,
    pub target_app_info: TargetAppInfo,
    pub timestamp: String,
    pub rules: Vec<UnifiedRule>,
    pub results: Vec<UnifiedResult>,
}

/// Which unified conversion to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    #[default]
    Automated,
    NeedsReview,
}

impl ConversionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Automated => "automated",
            ConversionMode::NeedsReview => "needs_review",
        }
    }
}

// ============================================================================
// Cards view model
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CardRuleResultStatus {
    Pass,
    Fail,
    Unknown,
    Inapplicable,
}

impl CardRuleResultStatus {
    pub const ALL: [CardRuleResultStatus; 4] = [
        CardRuleResultStatus::Pass,
        CardRuleResultStatus::Fail,
        CardRuleResultStatus::Unknown,
        CardRuleResultStatus::Inapplicable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardRuleResultStatus::Pass => "pass",
            CardRuleResultStatus::Fail => "fail",
            CardRuleResultStatus::Unknown => "unknown",
            CardRuleResultStatus::Inapplicable => "inapplicable",
        }
    }

    /// Only fail/unknown cards can be expanded or have selectable nodes.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            CardRuleResultStatus::Fail | CardRuleResultStatus::Unknown
        )
    }
}

impl From<ResultStatus> for CardRuleResultStatus {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Pass => CardRuleResultStatus::Pass,
            ResultStatus::Fail => CardRuleResultStatus::Fail,
            ResultStatus::Unknown => CardRuleResultStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStatus {
    Visible,
    Hidden,
    Unavailable,
}

/// A unified result extended with per-render UI state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardResult {
    #[serde(flatten)]
    pub result: UnifiedResult,
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_status: Option<HighlightStatus>,
}

impl CardResult {
    /// Renderers treat a missing highlight status as unavailable.
    pub fn effective_highlight_status(&self) -> HighlightStatus {
        self.highlight_status
            .unwrap_or(HighlightStatus::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardRuleResult {
    pub id: String,
    pub status: CardRuleResultStatus,
    pub nodes: Vec<CardResult>,
    pub description: String,
    pub url: String,
    pub guidance: Vec<GuidanceLink>,
    pub is_expanded: bool,
}

/// Transient UI state supplied by an external store. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardSelectionViewData {
    #[serde(default)]
    pub selected_result_uids: Vec<String>,
    #[serde(default)]
    pub expanded_rule_ids: Vec<String>,
    #[serde(default)]
    pub visual_helper_enabled: bool,
    #[serde(default)]
    pub results_highlight_status: BTreeMap<String, HighlightStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CardsByStatus {
    pub pass: Vec<CardRuleResult>,
    pub fail: Vec<CardRuleResult>,
    pub inapplicable: Vec<CardRuleResult>,
    pub unknown: Vec<CardRuleResult>,
}

impl CardsByStatus {
    pub fn get(&self, status: CardRuleResultStatus) -> &[CardRuleResult] {
        match status {
            CardRuleResultStatus::Pass => &self.pass,
            CardRuleResultStatus::Fail => &self.fail,
            CardRuleResultStatus::Unknown => &self.unknown,
            CardRuleResultStatus::Inapplicable => &self.inapplicable,
        }
    }

    pub fn get_mut(&mut self, status: CardRuleResultStatus) -> &mut Vec<CardRuleResult> {
        match status {
            CardRuleResultStatus::Pass => &mut self.pass,
            CardRuleResultStatus::Fail => &mut self.fail,
            CardRuleResultStatus::Unknown => &mut self.unknown,
            CardRuleResultStatus::Inapplicable => &mut self.inapplicable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardsViewModel {
    pub cards: CardsByStatus,
    pub visual_helper_enabled: bool,
    pub all_cards_collapsed: bool,
}

/// Rule and instance totals per card status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CardCounts {
    pub pass_rules: u32,
    pub fail_rules: u32,
    pub unknown_rules: u32,
    pub inapplicable_rules: u32,
    pub fail_instances: u32,
    pub unknown_instances: u32,
}

// ============================================================================
// Configuration
// ============================================================================

/// Built-in node decoration hooks a rule can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NodeDecorator {
    /// Snippet from the link's accessible name and URL.
    LinkSummary,
    /// Snippet from the image's type and accessible name.
    ImageSummary,
}

impl NodeDecorator {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeDecorator::LinkSummary => "link-summary",
            NodeDecorator::ImageSummary => "image-summary",
        }
    }
}

/// The on-disk configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ConfigFile {
    /// Include other config files. Paths are relative to this config file's directory.
    /// Rules and links are merged: later definitions override earlier ones by ID.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub rule: Vec<RuleConfig>,

    #[serde(default)]
    pub link: Vec<LinkConfig>,

    #[serde(default)]
    pub suppression: SuppressionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Defaults {
    /// Page title used when the caller supplies none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ConversionMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Overrides the engine-provided help URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorate_node: Option<NodeDecorator>,
    /// The rule has manual "how to check" guidance.
    #[serde(default)]
    pub how_to_check: bool,
    /// Keys into the `[[link]]` catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guidance: Vec<String>,
    /// Append the synthetic "Best Practice" link.
    #[serde(default)]
    pub best_practice: bool,
    #[serde(default, rename = "check", skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckConfig>,
}

impl RuleConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            help: None,
            help_url: None,
            decorate_node: None,
            how_to_check: false,
            guidance: vec![],
            best_practice: false,
            checks: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    pub id: String,
    /// Template; `{data}` / `{data.field}` are filled from the check's data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinkConfig {
    pub id: String,
    pub text: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<LinkTagConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LinkTagConfig {
    pub id: String,
    pub display_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SuppressionConfig {
    /// Check messages to drop from `any` checks (case-insensitive, trimmed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl ConfigFile {
    pub fn built_in() -> Self {
        Self {
            includes: vec![],
            defaults: Defaults::default(),
            rule: built_in::rules(),
            link: built_in::links(),
            suppression: SuppressionConfig::default(),
        }
    }
}
