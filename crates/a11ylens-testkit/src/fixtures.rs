//! Common test fixtures for a11ylens.
//!
//! Sample configs and engine results shared by tests across the workspace.

use a11ylens_types::{
    CheckConfig, ConfigFile, Defaults, EngineScanResult, LinkConfig, RuleConfig,
    SuppressionConfig,
};
use serde_json::json;

use crate::scan_builder::EngineScanBuilder;

// =============================================================================
// Sample Configs
// =============================================================================

/// Collection of sample configuration files for testing.
pub mod sample_configs {
    use super::*;

    /// No rules, no links: everything falls back to engine text.
    pub fn empty() -> ConfigFile {
        ConfigFile::default()
    }

    /// The built-in configuration from a11ylens-types.
    pub fn built_in() -> ConfigFile {
        ConfigFile::built_in()
    }

    /// One configured rule with a fail message and one guidance link.
    pub fn minimal() -> ConfigFile {
        ConfigFile {
            includes: vec![],
            defaults: Defaults::default(),
            rule: vec![RuleConfig {
                help: Some("Images need text alternatives".to_string()),
                guidance: vec!["WCAG_1_1_1".to_string()],
                checks: vec![CheckConfig {
                    id: "has-alt".to_string(),
                    pass_message: Some("Image has alt text".to_string()),
                    fail_message: Some("Configured: give the image alt text".to_string()),
                }],
                ..RuleConfig::new("image-alt")
            }],
            link: vec![LinkConfig {
                id: "WCAG_1_1_1".to_string(),
                text: "WCAG 1.1.1".to_string(),
                href: "https://www.w3.org/WAI/WCAG21/Understanding/non-text-content".to_string(),
                tags: vec![],
            }],
            suppression: SuppressionConfig::default(),
        }
    }

    /// The built-in configuration plus suppressed `messages`.
    pub fn with_suppression(messages: &[&str]) -> ConfigFile {
        ConfigFile {
            suppression: SuppressionConfig {
                messages: messages.iter().map(|m| m.to_string()).collect(),
            },
            ..ConfigFile::built_in()
        }
    }

    /// A user config as it would appear on disk.
    pub fn user_toml() -> &'static str {
        r#"
[defaults]
title = "Checkout page"
mode = "needs_review"

[[link]]
id = "INTERNAL_A11Y"
text = "Internal accessibility handbook"
href = "https://handbook.example/a11y"

[[rule]]
id = "image-alt"
help = "Every product image needs alt text"
guidance = ["INTERNAL_A11Y"]

[[rule.check]]
id = "has-alt"
fail_message = "Describe the product shown in {data.productName}"

[suppression]
messages = ["Element is hidden"]
"#
    }
}

// =============================================================================
// Sample Scans
// =============================================================================

/// Engine results shared by end-to-end tests.
pub mod sample_scans {
    use super::*;

    /// One `image-alt` violation with one node whose `all` check fails.
    /// Pair with [`sample_configs::minimal`].
    pub fn image_alt_violation() -> EngineScanResult {
        EngineScanBuilder::new()
            .url("https://example.com/products")
            .timestamp_millis(1_700_000_000_000)
            .violation("image-alt")
            .node("main > img.hero")
            .html("<img class=\"hero\" src=\"hero.png\">")
            .failure_summary("Fix all of the following:\n  Element does not have an alt attribute")
            .all_check("has-alt", "Element does not have an alt attribute", false)
            .done()
            .done()
            .build()
    }

    /// Only an inapplicable `region` rule.
    pub fn inapplicable_region_only() -> EngineScanResult {
        EngineScanBuilder::new()
            .url("https://example.com/")
            .inapplicable("region")
            .done()
            .build()
    }

    /// A failing `region` rule with one node.
    pub fn region_violation() -> EngineScanResult {
        EngineScanBuilder::new()
            .url("https://example.com/")
            .violation("region")
            .node("body > div.banner")
            .any_check(
                "region",
                "Some page content is not contained by landmarks",
                false,
            )
            .done()
            .done()
            .build()
    }

    /// A page with results in every bucket, including hooked and
    /// how-to-check rules.
    pub fn mixed() -> EngineScanResult {
        EngineScanBuilder::new()
            .url("https://example.com/mixed")
            .timestamp_text("2024-05-01T12:00:00.000Z")
            .pass("document-title")
            .node("html")
            .any_check(
                "doc-has-title",
                "Document has a non-empty <title> element",
                true,
            )
            .done()
            .done()
            .pass("image-alt")
            .node("img.logo")
            .any_check("has-alt", "Element has an alt attribute", true)
            .done()
            .done()
            .violation("image-alt")
            .node("main > img.hero")
            .failure_summary("Fix any of the following")
            .any_check("has-alt", "Element does not have an alt attribute", false)
            .done()
            .node("footer > img")
            .any_check("has-alt", "Element does not have an alt attribute", false)
            .done()
            .done()
            .violation("color-contrast")
            .node("p.muted")
            .any_check("color-contrast", "raw contrast message", false)
            .data(json!({ "contrastRatio": 2.5, "fgColor": "#aaaaaa", "bgColor": "#ffffff" }))
            .done()
            .done()
            .incomplete("link-purpose")
            .node("nav > a.more")
            .any_check("link-purpose-collected", "", true)
            .data(json!({ "accessibleName": "Read more", "url": "https://example.com/post" }))
            .done()
            .done()
            .inapplicable("region")
            .done()
            .inapplicable("frame-title")
            .done()
            .build()
    }

    /// A scan with no rules at all.
    pub fn empty() -> EngineScanResult {
        EngineScanResult::default()
    }
}
