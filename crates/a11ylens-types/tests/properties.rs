//! Serialization and configuration properties of the DTO crate.

use a11ylens_types::{
    Bucket, CardRuleResultStatus, CardSelectionViewData, ConfigFile, ConversionMode,
    EngineScanResult, EngineTimestamp, NodeDecorator, ResultStatus,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Configuration parsing
// ============================================================================

#[test]
fn parses_full_toml_config() {
    let toml_text = r#"
includes = ["shared.toml"]

[defaults]
title = "Home"
mode = "needs_review"

[[link]]
id = "WCAG_1_1_1"
text = "WCAG 1.1.1"
href = "https://www.w3.org/WAI/WCAG21/Understanding/non-text-content"

[[link]]
id = "WCAG_2_5_3"
text = "WCAG 2.5.3"
href = "https://www.w3.org/WAI/WCAG21/Understanding/label-in-name"
tags = [{ id = "WCAG_2_1", display_text = "WCAG 2.1" }]

[[rule]]
id = "link-purpose"
help_url = "https://custom.example/link-purpose"
decorate_node = "link-summary"
how_to_check = true
guidance = ["WCAG_1_1_1"]
best_practice = true

[[rule.check]]
id = "link-purpose-collected"
pass_message = "Link name: {data.accessibleName}"

[suppression]
messages = ["Element is hidden"]
"#;

    let config: ConfigFile = toml::from_str(toml_text).expect("valid config");
    assert_eq!(config.includes, ["shared.toml"]);
    assert_eq!(config.defaults.title.as_deref(), Some("Home"));
    assert_eq!(config.defaults.mode, Some(ConversionMode::NeedsReview));
    assert_eq!(config.link[1].tags[0].display_text, "WCAG 2.1");

    let rule = &config.rule[0];
    assert_eq!(rule.decorate_node, Some(NodeDecorator::LinkSummary));
    assert!(rule.how_to_check);
    assert!(rule.best_practice);
    assert_eq!(
        rule.checks[0].pass_message.as_deref(),
        Some("Link name: {data.accessibleName}")
    );
    assert_eq!(rule.checks[0].fail_message, None);
    assert_eq!(config.suppression.messages, ["Element is hidden"]);
}

#[test]
fn rejects_unknown_node_decorator() {
    let toml_text = r#"
[[rule]]
id = "x"
decorate_node = "sparkles"
"#;
    assert!(toml::from_str::<ConfigFile>(toml_text).is_err());
}

#[test]
fn built_in_config_survives_toml() {
    let built_in = ConfigFile::built_in();
    let text = toml::to_string(&built_in).expect("serialize");
    let parsed: ConfigFile = toml::from_str(&text).expect("parse");
    assert_eq!(parsed, built_in);
}

// ============================================================================
// Wire shapes
// ============================================================================

#[test]
fn selection_defaults_from_empty_object() {
    let selection: CardSelectionViewData = serde_json::from_value(json!({})).expect("parse");
    assert_eq!(selection, CardSelectionViewData::default());
}

#[test]
fn enums_use_lowercase_names() {
    assert_eq!(
        serde_json::to_value(ResultStatus::Unknown).unwrap(),
        json!("unknown")
    );
    assert_eq!(
        serde_json::to_value(CardRuleResultStatus::Inapplicable).unwrap(),
        json!("inapplicable")
    );
    for status in CardRuleResultStatus::ALL {
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            json!(status.as_str())
        );
    }
    for bucket in Bucket::ALL {
        assert_eq!(
            serde_json::to_value(bucket).unwrap(),
            json!(bucket.as_str())
        );
    }
}

fn arb_result_status() -> impl Strategy<Value = ResultStatus> {
    prop_oneof![
        Just(ResultStatus::Pass),
        Just(ResultStatus::Fail),
        Just(ResultStatus::Unknown),
    ]
}

proptest! {
    #[test]
    fn only_fail_and_unknown_are_interactive(status in arb_result_status()) {
        let card = CardRuleResultStatus::from(status);
        prop_assert_eq!(card.as_str(), status.as_str());
        prop_assert_eq!(card.is_interactive(), status != ResultStatus::Pass);
    }

    #[test]
    fn engine_timestamps_accept_numbers_and_strings(
        millis in 0i64..4_102_444_800_000,
        text in "[0-9T:.Z-]{1,24}",
    ) {
        let numeric: EngineScanResult = serde_json::from_value(json!({ "timestamp": millis }))
            .expect("numeric timestamp");
        prop_assert_eq!(numeric.timestamp, EngineTimestamp::EpochMillis(millis));

        let textual: EngineScanResult = serde_json::from_value(json!({ "timestamp": text.clone() }))
            .expect("string timestamp");
        prop_assert_eq!(textual.timestamp, EngineTimestamp::Text(text));
    }

    #[test]
    fn engine_results_ignore_unknown_fields(
        field in "[a-z]{1,10}Extra",
        value in any::<i32>(),
    ) {
        let parsed: EngineScanResult = serde_json::from_value(json!({
            field.as_str(): value,
            "url": "https://example.com/",
            "passes": [{ "id": "r", field.as_str(): value, "nodes": [] }],
        }))
        .expect("unknown fields ignored");
        prop_assert_eq!(parsed.url, "https://example.com/");
        prop_assert_eq!(parsed.passes.len(), 1);
    }
}
