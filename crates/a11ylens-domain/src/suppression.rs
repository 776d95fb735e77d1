//! Suppression of known-noisy check messages.
//!
//! Only `any` checks are filtered. Matching is full-message equality after
//! trimming and lower-casing both sides.

use std::collections::HashSet;
use std::sync::LazyLock;

use a11ylens_types::{NodeResult, RuleResult};

/// Check messages dropped from every scan.
const SUPPRESSED_MESSAGES: &[&str] = &[];

static BUILT_IN: LazyLock<SuppressionList> =
    LazyLock::new(|| SuppressionList::new(SUPPRESSED_MESSAGES.iter().copied()));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionList {
    messages: HashSet<String>,
}

impl SuppressionList {
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|m| normalize(m.as_ref()))
                .collect(),
        }
    }

    /// The static list, normalized once.
    pub fn built_in() -> &'static SuppressionList {
        &BUILT_IN
    }

    /// The static list plus `extra` messages.
    pub fn with_additional<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::built_in().clone();
        list.messages
            .extend(extra.into_iter().map(|m| normalize(m.as_ref())));
        list
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_suppressed(&self, message: &str) -> bool {
        self.messages.contains(&normalize(message))
    }

    /// Drop suppressed `any` checks, then nodes left without checks.
    ///
    /// Returns `None` when `remove_empty_rules` is set and no nodes remain.
    pub fn suppress(&self, rule: RuleResult, remove_empty_rules: bool) -> Option<RuleResult> {
        let nodes: Vec<NodeResult> = rule
            .nodes
            .iter()
            .map(|node| self.filter_node(node))
            .filter(|node| !node.is_empty())
            .collect();

        if remove_empty_rules && nodes.is_empty() {
            return None;
        }

        Some(RuleResult { nodes, ..rule })
    }

    fn filter_node(&self, node: &NodeResult) -> NodeResult {
        if self.is_empty() {
            return node.clone();
        }
        NodeResult {
            any: node
                .any
                .iter()
                .filter(|c| !self.is_suppressed(&c.message))
                .cloned()
                .collect(),
            ..node.clone()
        }
    }
}

/// [`SuppressionList::suppress`] with the static list.
pub fn suppress_checks_by_messages(
    rule: RuleResult,
    remove_empty_rules: bool,
) -> Option<RuleResult> {
    SuppressionList::built_in().suppress(rule, remove_empty_rules)
}

fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ylens_types::CheckResult;

    fn check(message: &str) -> CheckResult {
        CheckResult {
            id: "c".to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    fn node(any: &[&str], all: &[&str], none: &[&str]) -> NodeResult {
        NodeResult {
            target: vec!["div".to_string()],
            any: any.iter().map(|m| check(m)).collect(),
            all: all.iter().map(|m| check(m)).collect(),
            none: none.iter().map(|m| check(m)).collect(),
            ..Default::default()
        }
    }

    fn rule(nodes: Vec<NodeResult>) -> RuleResult {
        RuleResult {
            id: "r".to_string(),
            description: "d".to_string(),
            help: "h".to_string(),
            nodes,
            ..Default::default()
        }
    }

    #[test]
    fn built_in_list_is_empty_and_keeps_everything() {
        assert!(SuppressionList::built_in().is_empty());
        let r = rule(vec![node(&["a"], &[], &[])]);
        assert_eq!(suppress_checks_by_messages(r.clone(), true), Some(r));
    }

    #[test]
    fn matches_case_insensitively_after_trimming() {
        let list = SuppressionList::new(["  Noisy Message "]);
        assert!(list.is_suppressed("noisy message"));
        assert!(list.is_suppressed("NOISY MESSAGE\n"));
        assert!(!list.is_suppressed("noisy message, but longer"));
    }

    #[test]
    fn only_any_checks_are_filtered() {
        let list = SuppressionList::new(["noisy"]);
        let r = rule(vec![node(&["noisy", "keep"], &["noisy"], &["noisy"])]);
        let out = list.suppress(r, true).unwrap();
        let n = &out.nodes[0];
        assert_eq!(n.any.len(), 1);
        assert_eq!(n.any[0].message, "keep");
        assert_eq!(n.all.len(), 1);
        assert_eq!(n.none.len(), 1);
    }

    #[test]
    fn drops_nodes_left_without_checks() {
        let list = SuppressionList::new(["noisy"]);
        let r = rule(vec![
            node(&["noisy"], &[], &[]),
            node(&["noisy"], &["stays"], &[]),
        ]);
        let out = list.suppress(r, true).unwrap();
        assert_eq!(out.nodes.len(), 1);
        assert_eq!(out.nodes[0].all[0].message, "stays");
    }

    #[test]
    fn empty_rules_removed_only_when_requested() {
        let list = SuppressionList::new(["noisy"]);
        let r = rule(vec![node(&["noisy"], &[], &[])]);

        assert_eq!(list.suppress(r.clone(), true), None);

        let kept = list.suppress(r, false).unwrap();
        assert!(kept.nodes.is_empty());
        assert_eq!(kept.id, "r");
        assert_eq!(kept.description, "d");
        assert_eq!(kept.help, "h");
    }

    #[test]
    fn additional_messages_extend_built_in() {
        let list = SuppressionList::with_additional(["extra"]);
        assert_eq!(list.len(), SuppressionList::built_in().len() + 1);
        assert!(list.is_suppressed("EXTRA"));
    }
}
