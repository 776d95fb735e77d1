use a11ylens_domain::RuleRegistry;
use a11ylens_types::{
    CheckResult, ConversionMode, Descriptors, HowToFix, Identifiers, NodeResult, Resolution,
    ResultStatus, RuleResult, ScanResults, UnifiedResult,
};
use uuid::Uuid;

/// Source of fresh result ids. Each call must return a value never returned before.
pub trait UidGenerator {
    fn next_uid(&mut self) -> String;
}

impl<F> UidGenerator for F
where
    F: FnMut() -> String,
{
    fn next_uid(&mut self) -> String {
        self()
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl UidGenerator for UuidGenerator {
    fn next_uid(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolutionKind {
    /// Fix instructions plus failure summary.
    Fix,
    /// Rule id for "how to check" lookup only.
    Check,
}

impl ResolutionKind {
    fn for_status(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Unknown => Self::Check,
            ResultStatus::Pass | ResultStatus::Fail => Self::Fix,
        }
    }
}

/// Flattens decorated scan results into [`UnifiedResult`]s, one per node.
pub struct UnifiedResultConverter<'a, G> {
    rules: &'a RuleRegistry,
    uids: G,
}

impl<'a, G> UnifiedResultConverter<'a, G>
where
    G: UidGenerator,
{
    /// `rules` decides which rules carry a `how-to-check-web` entry in
    /// automated results.
    pub fn new(rules: &'a RuleRegistry, uids: G) -> Self {
        Self { rules, uids }
    }

    pub fn convert(
        &mut self,
        scan: Option<&ScanResults>,
        mode: ConversionMode,
    ) -> Vec<UnifiedResult> {
        match mode {
            ConversionMode::Automated => self.automated_checks_conversion(scan),
            ConversionMode::NeedsReview => self.needs_review_conversion(scan),
        }
    }

    /// Violations as `fail`, then passes as `pass`.
    pub fn automated_checks_conversion(
        &mut self,
        scan: Option<&ScanResults>,
    ) -> Vec<UnifiedResult> {
        let Some(scan) = scan else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.convert_rules(&scan.violations, ResultStatus::Fail, &mut out);
        self.convert_rules(&scan.passes, ResultStatus::Pass, &mut out);
        out
    }

    /// Violations, then incomplete, all as `unknown`.
    pub fn needs_review_conversion(&mut self, scan: Option<&ScanResults>) -> Vec<UnifiedResult> {
        let Some(scan) = scan else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.convert_rules(&scan.violations, ResultStatus::Unknown, &mut out);
        self.convert_rules(&scan.incomplete, ResultStatus::Unknown, &mut out);
        out
    }

    fn convert_rules(
        &mut self,
        rules: &[RuleResult],
        status: ResultStatus,
        out: &mut Vec<UnifiedResult>,
    ) {
        let kind = ResolutionKind::for_status(status);
        for rule in rules {
            for node in &rule.nodes {
                let resolution = self.resolution(kind, &rule.id, node);
                out.push(UnifiedResult {
                    uid: self.uids.next_uid(),
                    status,
                    rule_id: rule.id.clone(),
                    identifiers: identifiers_for_target(&node.target),
                    descriptors: Descriptors {
                        snippet: node.display_snippet().to_string(),
                    },
                    resolution,
                });
            }
        }
    }

    fn resolution(&self, kind: ResolutionKind, rule_id: &str, node: &NodeResult) -> Resolution {
        match kind {
            ResolutionKind::Fix => Resolution {
                how_to_fix_web: Some(HowToFix {
                    any: messages(&node.any),
                    none: messages(&node.none),
                    all: messages(&node.all),
                }),
                how_to_fix_summary: node.failure_summary.clone(),
                how_to_check_web: self
                    .rules
                    .has_how_to_check(rule_id)
                    .then(|| rule_id.to_string()),
            },
            ResolutionKind::Check => Resolution {
                how_to_check_web: Some(rule_id.to_string()),
                ..Default::default()
            },
        }
    }
}

fn messages(checks: &[CheckResult]) -> Vec<String> {
    checks.iter().map(|c| c.message.clone()).collect()
}

/// Identifier fields derived from a node's selector path.
///
/// `concise_name` is the part of the last segment after its last `" > "`.
pub fn identifiers_for_target(target: &[String]) -> Identifiers {
    let selector = target.join(";");
    let last = target.last().map(String::as_str).unwrap_or_default();
    let concise_name = last.rsplit(" > ").next().unwrap_or(last).to_string();

    Identifiers {
        identifier: selector.clone(),
        concise_name,
        css_selector: selector,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ylens_domain::compile_rule_registry;
    use a11ylens_types::RuleConfig;
    use std::collections::HashSet;

    fn counter() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("uid-{n}")
        }
    }

    fn check(message: &str) -> CheckResult {
        CheckResult {
            id: "c".to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    fn node(target: &[&str]) -> NodeResult {
        NodeResult {
            target: target.iter().map(|s| s.to_string()).collect(),
            html: "<div>".to_string(),
            failure_summary: Some("Fix any of the following".to_string()),
            any: vec![check("any msg")],
            all: vec![check("all msg")],
            none: vec![check("none msg")],
            ..Default::default()
        }
    }

    fn rule(id: &str, nodes: Vec<NodeResult>) -> RuleResult {
        RuleResult {
            id: id.to_string(),
            nodes,
            ..Default::default()
        }
    }

    fn scan() -> ScanResults {
        ScanResults {
            passes: vec![rule("pass-rule", vec![node(&["p"])])],
            violations: vec![rule("color-contrast", vec![node(&["a"]), node(&["b"])])],
            incomplete: vec![rule("inc-rule", vec![node(&["i"])])],
            inapplicable: vec![rule("region", vec![])],
            ..Default::default()
        }
    }

    fn registry() -> RuleRegistry {
        compile_rule_registry(&[RuleConfig {
            how_to_check: true,
            ..RuleConfig::new("color-contrast")
        }])
        .unwrap()
    }

    #[test]
    fn automated_emits_violations_then_passes() {
        let registry = registry();
        let mut converter = UnifiedResultConverter::new(&registry, counter());
        let results = converter.automated_checks_conversion(Some(&scan()));

        let got: Vec<_> = results
            .iter()
            .map(|r| (r.uid.as_str(), r.status, r.rule_id.as_str()))
            .collect();
        assert_eq!(
            got,
            [
                ("uid-1", ResultStatus::Fail, "color-contrast"),
                ("uid-2", ResultStatus::Fail, "color-contrast"),
                ("uid-3", ResultStatus::Pass, "pass-rule"),
            ]
        );
    }

    #[test]
    fn automated_resolution_carries_fix_instructions() {
        let registry = registry();
        let mut converter = UnifiedResultConverter::new(&registry, counter());
        let results = converter.automated_checks_conversion(Some(&scan()));

        let fail = &results[0].resolution;
        let fix = fail.how_to_fix_web.as_ref().unwrap();
        assert_eq!(fix.any, ["any msg"]);
        assert_eq!(fix.all, ["all msg"]);
        assert_eq!(fix.none, ["none msg"]);
        assert_eq!(
            fail.how_to_fix_summary.as_deref(),
            Some("Fix any of the following")
        );
        assert_eq!(fail.how_to_check_web.as_deref(), Some("color-contrast"));

        // Not a how-to-check rule.
        assert_eq!(results[2].resolution.how_to_check_web, None);
    }

    #[test]
    fn needs_review_is_all_unknown_with_check_resolution() {
        let registry = registry();
        let mut converter = UnifiedResultConverter::new(&registry, counter());
        let results = converter.needs_review_conversion(Some(&scan()));

        let ids: Vec<_> = results.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, ["color-contrast", "color-contrast", "inc-rule"]);
        for r in &results {
            assert_eq!(r.status, ResultStatus::Unknown);
            assert!(r.resolution.how_to_fix_web.is_none());
            assert!(r.resolution.how_to_fix_summary.is_none());
            assert_eq!(r.resolution.how_to_check_web.as_ref(), Some(&r.rule_id));
        }
    }

    #[test]
    fn none_scan_yields_empty() {
        let registry = RuleRegistry::empty();
        let mut converter = UnifiedResultConverter::new(&registry, UuidGenerator);
        assert!(converter.automated_checks_conversion(None).is_empty());
        assert!(converter.needs_review_conversion(None).is_empty());
        let converted = converter.convert(None, ConversionMode::NeedsReview);
        assert!(converted.is_empty());
    }

    #[test]
    fn uuid_generator_produces_distinct_ids() {
        let registry = RuleRegistry::empty();
        let mut converter = UnifiedResultConverter::new(&registry, UuidGenerator);
        let first = converter.automated_checks_conversion(Some(&scan()));
        let second = converter.automated_checks_conversion(Some(&scan()));

        let uids: HashSet<_> = first.iter().chain(&second).map(|r| r.uid.clone()).collect();
        assert_eq!(uids.len(), first.len() + second.len());
    }

    #[test]
    fn identifiers_from_selector_path() {
        let ids = identifiers_for_target(&[
            "iframe#main".to_string(),
            "body > div.content > img".to_string(),
        ]);
        assert_eq!(ids.identifier, "iframe#main;body > div.content > img");
        assert_eq!(ids.css_selector, ids.identifier);
        assert_eq!(ids.concise_name, "img");

        let plain = identifiers_for_target(&["#logo".to_string()]);
        assert_eq!(plain.concise_name, "#logo");

        let empty = identifiers_for_target(&[]);
        assert_eq!(empty.identifier, "");
        assert_eq!(empty.concise_name, "");
    }

    #[test]
    fn snippet_prefers_decorated_snippet() {
        let registry = RuleRegistry::empty();
        let mut decorated = node(&["a"]);
        decorated.snippet = Some("Link name: Home".to_string());
        let scan = ScanResults {
            violations: vec![rule("link-name", vec![decorated, node(&["b"])])],
            ..Default::default()
        };

        let mut converter = UnifiedResultConverter::new(&registry, counter());
        let results = converter.automated_checks_conversion(Some(&scan));
        assert_eq!(results[0].descriptors.snippet, "Link name: Home");
        assert_eq!(results[1].descriptors.snippet, "<div>");
    }
}
