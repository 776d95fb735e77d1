use std::collections::{HashMap, HashSet};

use a11ylens_types::{
    CardCounts, CardResult, CardRuleResult, CardRuleResultStatus, CardSelectionViewData,
    CardsByStatus, CardsViewModel, UnifiedResult, UnifiedRule,
};

/// Group unified results into per-status rule cards.
///
/// Returns `None` while any input is missing. Results whose rule id has no
/// matching [`UnifiedRule`] are skipped. Rules that produced no results are
/// appended to the inapplicable bucket with no nodes, in `rules` order.
pub fn get_card_view_data(
    rules: Option<&[UnifiedRule]>,
    results: Option<&[UnifiedResult]>,
    selection: Option<&CardSelectionViewData>,
) -> Option<CardsViewModel> {
    let (rules, results, selection) = (rules?, results?, selection?);

    let rules_by_id: HashMap<&str, &UnifiedRule> =
        rules.iter().map(|r| (r.id.as_str(), r)).collect();
    let selected: HashSet<&str> = selection
        .selected_result_uids
        .iter()
        .map(String::as_str)
        .collect();
    let expanded: HashSet<&str> = selection
        .expanded_rule_ids
        .iter()
        .map(String::as_str)
        .collect();
    let highlights = &selection.results_highlight_status;

    let mut cards = CardsByStatus::default();
    let mut positions: HashMap<(CardRuleResultStatus, &str), usize> = HashMap::new();
    let mut seen_rule_ids: HashSet<&str> = HashSet::new();

    for result in results {
        let status = CardRuleResultStatus::from(result.status);
        let key = (status, result.rule_id.as_str());

        let position = match positions.get(&key) {
            Some(&position) => position,
            None => {
                let Some(rule) = rules_by_id.get(result.rule_id.as_str()) else {
                    continue;
                };
                let bucket = cards.get_mut(status);
                bucket.push(card_rule(rule, status, &expanded));
                positions.insert(key, bucket.len() - 1);
                bucket.len() - 1
            }
        };
        seen_rule_ids.insert(result.rule_id.as_str());

        cards.get_mut(status)[position].nodes.push(CardResult {
            result: result.clone(),
            is_selected: status.is_interactive() && selected.contains(result.uid.as_str()),
            highlight_status: highlights.get(&result.uid).copied(),
        });
    }

    for rule in rules {
        if seen_rule_ids.insert(rule.id.as_str()) {
            let card = card_rule(rule, CardRuleResultStatus::Inapplicable, &expanded);
            cards.inapplicable.push(card);
        }
    }

    Some(CardsViewModel {
        cards,
        visual_helper_enabled: selection.visual_helper_enabled,
        all_cards_collapsed: selection.expanded_rule_ids.is_empty(),
    })
}

fn card_rule(
    rule: &UnifiedRule,
    status: CardRuleResultStatus,
    expanded: &HashSet<&str>,
) -> CardRuleResult {
    CardRuleResult {
        id: rule.id.clone(),
        status,
        nodes: Vec::new(),
        description: rule.description.clone(),
        url: rule.url.clone(),
        guidance: rule.guidance.clone(),
        is_expanded: status.is_interactive() && expanded.contains(rule.id.as_str()),
    }
}

/// Rule and instance totals per status. Totals past `u32::MAX` saturate.
pub fn card_counts(view: &CardsViewModel) -> CardCounts {
    let rules = |status: CardRuleResultStatus| saturating_u32(view.cards.get(status).len());
    let instances = |status: CardRuleResultStatus| {
        let total = view
            .cards
            .get(status)
            .iter()
            .fold(0usize, |acc, r| acc.saturating_add(r.nodes.len()));
        saturating_u32(total)
    };

    CardCounts {
        pass_rules: rules(CardRuleResultStatus::Pass),
        fail_rules: rules(CardRuleResultStatus::Fail),
        unknown_rules: rules(CardRuleResultStatus::Unknown),
        inapplicable_rules: rules(CardRuleResultStatus::Inapplicable),
        fail_instances: instances(CardRuleResultStatus::Fail),
        unknown_instances: instances(CardRuleResultStatus::Unknown),
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11ylens_types::{Descriptors, HighlightStatus, Identifiers, Resolution, ResultStatus};

    fn unified_rule(id: &str) -> UnifiedRule {
        UnifiedRule {
            id: id.to_string(),
            description: format!("{id} description"),
            url: format!("https://help/{id}"),
            guidance: vec![],
        }
    }

    fn result(uid: &str, rule_id: &str, status: ResultStatus) -> UnifiedResult {
        UnifiedResult {
            uid: uid.to_string(),
            status,
            rule_id: rule_id.to_string(),
            identifiers: Identifiers {
                identifier: "div".to_string(),
                concise_name: "div".to_string(),
                css_selector: "div".to_string(),
            },
            descriptors: Descriptors {
                snippet: "<div>".to_string(),
            },
            resolution: Resolution::default(),
        }
    }

    fn build(
        rules: &[UnifiedRule],
        results: &[UnifiedResult],
        selection: &CardSelectionViewData,
    ) -> CardsViewModel {
        get_card_view_data(Some(rules), Some(results), Some(selection)).unwrap()
    }

    #[test]
    fn missing_input_yields_none() {
        let rule_list = vec![unified_rule("a")];
        let rules = Some(rule_list.as_slice());
        let results = Some(&[][..]);
        let selection = CardSelectionViewData::default();
        let selection = Some(&selection);
        assert!(get_card_view_data(None, results, selection).is_none());
        assert!(get_card_view_data(rules, None, selection).is_none());
        assert!(get_card_view_data(rules, results, None).is_none());
        assert!(get_card_view_data(rules, results, selection).is_some());
    }

    #[test]
    fn groups_results_by_status_and_rule() {
        let rules = vec![unified_rule("a"), unified_rule("b")];
        let results = vec![
            result("1", "a", ResultStatus::Fail),
            result("2", "b", ResultStatus::Pass),
            result("3", "a", ResultStatus::Fail),
            result("4", "a", ResultStatus::Pass),
        ];

        let view = build(&rules, &results, &CardSelectionViewData::default());
        assert_eq!(view.cards.fail.len(), 1);
        assert_eq!(view.cards.fail[0].nodes.len(), 2);
        let pass_ids: Vec<_> = view.cards.pass.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(pass_ids, ["b", "a"]);
        assert!(view.cards.inapplicable.is_empty());
        assert!(view.cards.unknown.is_empty());
    }

    #[test]
    fn dangling_rule_ids_are_skipped() {
        let rules = vec![unified_rule("a")];
        let results = vec![
            result("1", "ghost", ResultStatus::Fail),
            result("2", "a", ResultStatus::Fail),
        ];

        let view = build(&rules, &results, &CardSelectionViewData::default());
        assert_eq!(view.cards.fail.len(), 1);
        assert_eq!(view.cards.fail[0].nodes[0].result.uid, "2");
    }

    #[test]
    fn synthesizes_inapplicable_for_unseen_rules() {
        let rules = vec![unified_rule("x"), unified_rule("a"), unified_rule("y")];
        let results = vec![result("1", "a", ResultStatus::Pass)];

        let view = build(&rules, &results, &CardSelectionViewData::default());
        let inapplicable = &view.cards.inapplicable;
        let ids: Vec<_> = inapplicable.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["x", "y"]);
        for rule in inapplicable {
            assert!(rule.nodes.is_empty());
            assert!(!rule.is_expanded);
            assert_eq!(rule.status, CardRuleResultStatus::Inapplicable);
        }
    }

    #[test]
    fn selection_applies_only_to_interactive_statuses() {
        let rules = vec![unified_rule("a")];
        let results = vec![
            result("f", "a", ResultStatus::Fail),
            result("u", "a", ResultStatus::Unknown),
            result("p", "a", ResultStatus::Pass),
        ];
        let selection = CardSelectionViewData {
            selected_result_uids: vec!["f".into(), "u".into(), "p".into()],
            expanded_rule_ids: vec!["a".into()],
            visual_helper_enabled: true,
            results_highlight_status: [("f".to_string(), HighlightStatus::Visible)]
                .into_iter()
                .collect(),
        };

        let view = build(&rules, &results, &selection);
        assert!(view.visual_helper_enabled);
        assert!(!view.all_cards_collapsed);

        let fail = &view.cards.fail[0];
        assert!(fail.is_expanded);
        assert!(fail.nodes[0].is_selected);
        assert_eq!(
            fail.nodes[0].highlight_status,
            Some(HighlightStatus::Visible)
        );

        let unknown = &view.cards.unknown[0];
        assert!(unknown.is_expanded);
        assert!(unknown.nodes[0].is_selected);
        assert_eq!(unknown.nodes[0].highlight_status, None);
        assert_eq!(
            unknown.nodes[0].effective_highlight_status(),
            HighlightStatus::Unavailable
        );

        let pass = &view.cards.pass[0];
        assert!(!pass.is_expanded);
        assert!(!pass.nodes[0].is_selected);
    }

    #[test]
    fn collapsed_when_nothing_expanded() {
        let view = build(&[], &[], &CardSelectionViewData::default());
        assert!(view.all_cards_collapsed);
        assert_eq!(card_counts(&view), CardCounts::default());
    }

    #[test]
    fn counts_rules_and_instances() {
        let rules = vec![unified_rule("a"), unified_rule("b"), unified_rule("c")];
        let results = vec![
            result("1", "a", ResultStatus::Fail),
            result("2", "a", ResultStatus::Fail),
            result("3", "b", ResultStatus::Unknown),
            result("4", "b", ResultStatus::Pass),
        ];

        let view = build(&rules, &results, &CardSelectionViewData::default());
        let counts = card_counts(&view);
        assert_eq!(
            counts,
            CardCounts {
                pass_rules: 1,
                fail_rules: 1,
                unknown_rules: 1,
                inapplicable_rules: 1,
                fail_instances: 2,
                unknown_instances: 1,
            }
        );
    }

    #[test]
    fn counts_saturate_instead_of_wrapping() {
        assert_eq!(saturating_u32(0), 0);
        assert_eq!(saturating_u32(7), 7);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(saturating_u32(u32::MAX as usize + 1), u32::MAX);
            assert_eq!(saturating_u32(usize::MAX), u32::MAX);
        }
    }
}
