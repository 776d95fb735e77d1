use crate::rules::RuleRegistry;

/// Prefer a configured help URL override, else the engine's.
pub fn get_help_url(
    rule_id: &str,
    engine_help_url: &str,
    registry: Option<&RuleRegistry>,
) -> String {
    registry
        .and_then(|r| r.get(rule_id))
        .and_then(|rule| rule.help_url.clone())
        .unwrap_or_else(|| engine_help_url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::compile_rule_registry;
    use a11ylens_types::RuleConfig;

    #[test]
    fn override_wins_when_configured() {
        let registry = compile_rule_registry(&[
            RuleConfig {
                help_url: Some("https://custom".to_string()),
                ..RuleConfig::new("custom")
            },
            RuleConfig::new("plain"),
        ])
        .unwrap();

        let url = |id: &str| get_help_url(id, "https://engine", Some(&registry));
        assert_eq!(url("custom"), "https://custom");
        assert_eq!(url("plain"), "https://engine");
        assert_eq!(url("unknown"), "https://engine");
    }

    #[test]
    fn tolerates_missing_or_empty_registry() {
        assert_eq!(get_help_url("x", "https://engine", None), "https://engine");
        assert_eq!(
            get_help_url("x", "https://engine", Some(&RuleRegistry::empty())),
            "https://engine"
        );
    }
}
