use std::collections::HashSet;

use a11ylens_types::{Bucket, ScanResults, UnifiedRule};

/// One [`UnifiedRule`] per distinct rule id, first occurrence wins.
///
/// Buckets are walked passes, violations, incomplete, inapplicable. Returns
/// an empty list when there are no scan results.
pub fn convert_scan_results_to_unified_rules(scan: Option<&ScanResults>) -> Vec<UnifiedRule> {
    let Some(scan) = scan else {
        return Vec::new();
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for bucket in Bucket::ALL {
        for rule in scan.bucket(bucket) {
            if !seen.insert(rule.id.as_str()) {
                continue;
            }
            out.push(UnifiedRule {
                id: rule.id.clone(),
                description: rule.description.clone(),
                url: rule.help_url.clone(),
                guidance: rule.guidance_links.clone().unwrap_or_default(),
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ylens_types::{GuidanceLink, RuleResult};

    fn rule(id: &str, description: &str) -> RuleResult {
        RuleResult {
            id: id.to_string(),
            description: description.to_string(),
            help_url: format!("https://help/{id}"),
            ..Default::default()
        }
    }

    #[test]
    fn none_scan_yields_empty() {
        assert!(convert_scan_results_to_unified_rules(None).is_empty());
    }

    #[test]
    fn dedups_across_buckets_keeping_first() {
        let scan = ScanResults {
            passes: vec![rule("a", "from passes")],
            violations: vec![rule("b", "b"), rule("a", "from violations")],
            incomplete: vec![rule("c", "c")],
            inapplicable: vec![rule("b", "again"), rule("d", "d")],
            ..Default::default()
        };

        let rules = convert_scan_results_to_unified_rules(Some(&scan));
        let ids: Vec<_> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(rules[0].description, "from passes");
        assert_eq!(rules[0].url, "https://help/a");
    }

    #[test]
    fn guidance_defaults_to_empty() {
        let mut with_links = rule("x", "x");
        with_links.guidance_links = Some(vec![GuidanceLink::best_practice()]);
        let scan = ScanResults {
            passes: vec![with_links, rule("y", "y")],
            ..Default::default()
        };

        let rules = convert_scan_results_to_unified_rules(Some(&scan));
        assert_eq!(rules[0].guidance, vec![GuidanceLink::best_practice()]);
        assert!(rules[1].guidance.is_empty());
    }

    #[test]
    fn seen_set_does_not_leak_between_calls() {
        let scan = ScanResults {
            passes: vec![rule("a", "a")],
            ..Default::default()
        };
        assert_eq!(convert_scan_results_to_unified_rules(Some(&scan)).len(), 1);
        assert_eq!(convert_scan_results_to_unified_rules(Some(&scan)).len(), 1);
    }
}
