//! Fluent builder for engine scan results.
//!
//! # Example
//!
//! ```rust
//! use a11ylens_testkit::scan_builder::EngineScanBuilder;
//!
//! let scan = EngineScanBuilder::new()
//!     .url("https://example.com/")
//!     .violation("image-alt")
//!         .node("body > img")
//!             .any_check("has-alt", "Element does not have an alt attribute", false)
//!             .done()
//!         .done()
//!     .inapplicable("region")
//!         .done()
//!     .build();
//!
//! assert_eq!(scan.violations[0].nodes.len(), 1);
//! assert!(scan.inapplicable[0].nodes.is_empty());
//! ```

use a11ylens_types::{
    Bucket, CheckResult, EngineScanResult, EngineTimestamp, NodeResult, RuleResult,
};
use serde_json::Value;

use crate::arb::{MAX_CHECKS_PER_GROUP, MAX_NODES_PER_RULE};

/// A builder for [`EngineScanResult`].
#[derive(Debug, Clone, Default)]
pub struct EngineScanBuilder {
    scan: EngineScanResult,
}

impl EngineScanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: &str) -> Self {
        self.scan.url = url.to_string();
        self
    }

    pub fn timestamp_millis(mut self, millis: i64) -> Self {
        self.scan.timestamp = EngineTimestamp::EpochMillis(millis);
        self
    }

    pub fn timestamp_text(mut self, text: &str) -> Self {
        self.scan.timestamp = EngineTimestamp::Text(text.to_string());
        self
    }

    /// Start a rule result in `bucket`.
    pub fn rule(self, bucket: Bucket, id: &str) -> RuleBuilderInProgress {
        RuleBuilderInProgress {
            scan_builder: self,
            bucket,
            rule_builder: RuleBuilder::new(id),
        }
    }

    pub fn pass(self, id: &str) -> RuleBuilderInProgress {
        self.rule(Bucket::Passes, id)
    }

    pub fn violation(self, id: &str) -> RuleBuilderInProgress {
        self.rule(Bucket::Violations, id)
    }

    pub fn incomplete(self, id: &str) -> RuleBuilderInProgress {
        self.rule(Bucket::Incomplete, id)
    }

    pub fn inapplicable(self, id: &str) -> RuleBuilderInProgress {
        self.rule(Bucket::Inapplicable, id)
    }

    /// Add a pre-built rule to `bucket`.
    pub fn add_rule(mut self, bucket: Bucket, rule: RuleBuilder) -> Self {
        self.bucket_mut(bucket).push(rule.build());
        self
    }

    pub fn build(self) -> EngineScanResult {
        self.scan
    }

    /// The scan serialized the way the engine hands it over.
    pub fn build_json(self) -> String {
        serde_json::to_string_pretty(&self.scan).expect("engine scan should serialize")
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<RuleResult> {
        match bucket {
            Bucket::Passes => &mut self.scan.passes,
            Bucket::Violations => &mut self.scan.violations,
            Bucket::Incomplete => &mut self.scan.incomplete,
            Bucket::Inapplicable => &mut self.scan.inapplicable,
        }
    }
}

/// Helper struct for building a rule within a scan.
#[derive(Debug)]
pub struct RuleBuilderInProgress {
    scan_builder: EngineScanBuilder,
    bucket: Bucket,
    rule_builder: RuleBuilder,
}

impl RuleBuilderInProgress {
    pub fn description(mut self, description: &str) -> Self {
        self.rule_builder = self.rule_builder.description(description);
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.rule_builder = self.rule_builder.help(help);
        self
    }

    pub fn help_url(mut self, help_url: &str) -> Self {
        self.rule_builder = self.rule_builder.help_url(help_url);
        self
    }

    /// Start a node with a single-segment selector.
    pub fn node(self, target: &str) -> NodeBuilderInProgress {
        self.node_in_frames(&[target])
    }

    /// Start a node whose selector crosses frame boundaries.
    pub fn node_in_frames(self, target: &[&str]) -> NodeBuilderInProgress {
        NodeBuilderInProgress {
            rule_in_progress: self,
            node_builder: NodeBuilder::new(target),
        }
    }

    /// Finish this rule and return to the scan builder.
    pub fn done(self) -> EngineScanBuilder {
        let bucket = self.bucket;
        self.scan_builder.add_rule(bucket, self.rule_builder)
    }
}

/// Helper struct for building a node within a rule.
#[derive(Debug)]
pub struct NodeBuilderInProgress {
    rule_in_progress: RuleBuilderInProgress,
    node_builder: NodeBuilder,
}

impl NodeBuilderInProgress {
    pub fn html(mut self, html: &str) -> Self {
        self.node_builder = self.node_builder.html(html);
        self
    }

    pub fn snippet(mut self, snippet: &str) -> Self {
        self.node_builder = self.node_builder.snippet(snippet);
        self
    }

    pub fn failure_summary(mut self, summary: &str) -> Self {
        self.node_builder = self.node_builder.failure_summary(summary);
        self
    }

    pub fn any_check(mut self, id: &str, message: &str, result: bool) -> Self {
        self.node_builder = self.node_builder.any_check(id, message, result);
        self
    }

    pub fn all_check(mut self, id: &str, message: &str, result: bool) -> Self {
        self.node_builder = self.node_builder.all_check(id, message, result);
        self
    }

    pub fn none_check(mut self, id: &str, message: &str, result: bool) -> Self {
        self.node_builder = self.node_builder.none_check(id, message, result);
        self
    }

    /// Attach `data` to the most recently added check.
    pub fn data(mut self, data: Value) -> Self {
        self.node_builder = self.node_builder.data(data);
        self
    }

    /// Finish this node and return to the rule builder.
    pub fn done(self) -> RuleBuilderInProgress {
        let mut rule = self.rule_in_progress;
        rule.rule_builder = rule.rule_builder.add_node(self.node_builder);
        rule
    }
}

/// A builder for a single rule result.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: RuleResult,
}

impl RuleBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            rule: RuleResult {
                id: id.to_string(),
                description: format!("Engine description of {id}"),
                help: format!("Engine help for {id}"),
                help_url: format!("https://engine.test/rules/{id}"),
                ..Default::default()
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.rule.description = description.to_string();
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.rule.help = help.to_string();
        self
    }

    pub fn help_url(mut self, help_url: &str) -> Self {
        self.rule.help_url = help_url.to_string();
        self
    }

    /// # Panics
    ///
    /// Panics if MAX_NODES_PER_RULE would be exceeded.
    pub fn add_node(mut self, node: NodeBuilder) -> Self {
        assert!(
            self.rule.nodes.len() < MAX_NODES_PER_RULE,
            "Cannot add more than {} nodes to a rule",
            MAX_NODES_PER_RULE
        );
        self.rule.nodes.push(node.build());
        self
    }

    pub fn build(self) -> RuleResult {
        self.rule
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckGroup {
    Any,
    All,
    None,
}

/// A builder for a single node.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: NodeResult,
    last_group: Option<CheckGroup>,
}

impl NodeBuilder {
    pub fn new(target: &[&str]) -> Self {
        let html = format!("<{}>", target.last().copied().unwrap_or("div"));
        Self {
            node: NodeResult {
                target: target.iter().map(|s| s.to_string()).collect(),
                html,
                ..Default::default()
            },
            last_group: None,
        }
    }

    pub fn html(mut self, html: &str) -> Self {
        self.node.html = html.to_string();
        self
    }

    pub fn snippet(mut self, snippet: &str) -> Self {
        self.node.snippet = Some(snippet.to_string());
        self
    }

    pub fn failure_summary(mut self, summary: &str) -> Self {
        self.node.failure_summary = Some(summary.to_string());
        self
    }

    pub fn any_check(self, id: &str, message: &str, result: bool) -> Self {
        self.push(CheckGroup::Any, id, message, result)
    }

    pub fn all_check(self, id: &str, message: &str, result: bool) -> Self {
        self.push(CheckGroup::All, id, message, result)
    }

    pub fn none_check(self, id: &str, message: &str, result: bool) -> Self {
        self.push(CheckGroup::None, id, message, result)
    }

    /// Attach `data` to the most recently added check.
    ///
    /// # Panics
    ///
    /// Panics if no check has been added yet.
    pub fn data(mut self, data: Value) -> Self {
        let group = self.last_group.expect("data() called before any check");
        let check = self.group_mut(group).last_mut().expect("check present");
        check.data = data;
        self
    }

    pub fn build(self) -> NodeResult {
        self.node
    }

    /// # Panics
    ///
    /// Panics if MAX_CHECKS_PER_GROUP would be exceeded.
    fn push(mut self, group: CheckGroup, id: &str, message: &str, result: bool) -> Self {
        let checks = self.group_mut(group);
        assert!(
            checks.len() < MAX_CHECKS_PER_GROUP,
            "Cannot add more than {} checks to a group",
            MAX_CHECKS_PER_GROUP
        );
        checks.push(CheckResult {
            id: id.to_string(),
            message: message.to_string(),
            data: Value::Null,
            result,
        });
        self.last_group = Some(group);
        self
    }

    fn group_mut(&mut self, group: CheckGroup) -> &mut Vec<CheckResult> {
        match group {
            CheckGroup::Any => &mut self.node.any,
            CheckGroup::All => &mut self.node.all,
            CheckGroup::None => &mut self.node.none,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_rules_into_their_buckets() {
        let scan = EngineScanBuilder::new()
            .url("https://example.com/")
            .timestamp_millis(5)
            .pass("document-title")
            .node("html")
            .any_check("doc-has-title", "ok", true)
            .done()
            .done()
            .incomplete("color-contrast")
            .node_in_frames(&["iframe", "p.note"])
            .all_check("color-contrast", "unsure", false)
            .data(json!({ "contrastRatio": 4.2 }))
            .done()
            .done()
            .build();

        assert_eq!(scan.url, "https://example.com/");
        assert_eq!(scan.timestamp, EngineTimestamp::EpochMillis(5));
        assert_eq!(scan.passes[0].id, "document-title");
        let node = &scan.incomplete[0].nodes[0];
        assert_eq!(node.target, ["iframe", "p.note"]);
        assert_eq!(node.html, "<p.note>");
        assert_eq!(node.all[0].data["contrastRatio"], 4.2);
        assert!(scan.violations.is_empty());
    }

    #[test]
    fn json_uses_engine_field_names() {
        let json = EngineScanBuilder::new()
            .violation("image-alt")
            .help_url("https://h/image-alt")
            .node("img")
            .failure_summary("Fix any")
            .any_check("has-alt", "missing", false)
            .done()
            .done()
            .build_json();

        assert!(json.contains("\"helpUrl\": \"https://h/image-alt\""));
        assert!(json.contains("\"failureSummary\": \"Fix any\""));
    }

    #[test]
    #[should_panic(expected = "Cannot add more than")]
    fn check_bound_is_enforced() {
        let mut node = NodeBuilder::new(&["div"]);
        for i in 0..=MAX_CHECKS_PER_GROUP {
            node = node.any_check(&format!("c{i}"), "m", true);
        }
    }
}
