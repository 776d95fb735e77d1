//! Built-in rule configuration and guidance link catalog.

use crate::{CheckConfig, LinkConfig, LinkTagConfig, NodeDecorator, RuleConfig};

const WCAG_UNDERSTANDING: &str = "https://www.w3.org/WAI/WCAG21/Understanding";

fn check(id: &str, pass: Option<&str>, fail: Option<&str>) -> CheckConfig {
    CheckConfig {
        id: id.to_string(),
        pass_message: pass.map(str::to_string),
        fail_message: fail.map(str::to_string),
    }
}

fn wcag(id: &str, number: &str, slug: &str) -> LinkConfig {
    LinkConfig {
        id: id.to_string(),
        text: format!("WCAG {number}"),
        href: format!("{WCAG_UNDERSTANDING}/{slug}"),
        tags: vec![],
    }
}

fn wcag_21(id: &str, number: &str, slug: &str) -> LinkConfig {
    LinkConfig {
        tags: vec![LinkTagConfig {
            id: "WCAG_2_1".to_string(),
            display_text: "WCAG 2.1".to_string(),
        }],
        ..wcag(id, number, slug)
    }
}

pub(crate) fn links() -> Vec<LinkConfig> {
    vec![
        wcag("WCAG_1_1_1", "1.1.1", "non-text-content"),
        wcag("WCAG_1_3_1", "1.3.1", "info-and-relationships"),
        wcag_21("WCAG_1_3_5", "1.3.5", "identify-input-purpose"),
        wcag("WCAG_1_4_1", "1.4.1", "use-of-color"),
        wcag("WCAG_1_4_3", "1.4.3", "contrast-minimum"),
        wcag("WCAG_2_1_1", "2.1.1", "keyboard"),
        wcag("WCAG_2_4_1", "2.4.1", "bypass-blocks"),
        wcag("WCAG_2_4_2", "2.4.2", "page-titled"),
        wcag("WCAG_2_4_4", "2.4.4", "link-purpose-in-context"),
        wcag_21("WCAG_2_5_3", "2.5.3", "label-in-name"),
        wcag("WCAG_3_1_1", "3.1.1", "language-of-page"),
        wcag("WCAG_3_3_2", "3.3.2", "labels-or-instructions"),
        wcag("WCAG_4_1_2", "4.1.2", "name-role-value"),
    ]
}

fn keys(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn rules() -> Vec<RuleConfig> {
    vec![
        // ============================================================
        // Images
        // ============================================================
        RuleConfig {
            help: Some("Images must have alternate text".to_string()),
            guidance: keys(&["WCAG_1_1_1"]),
            checks: vec![
                check(
                    "has-alt",
                    Some("Element has an alt attribute"),
                    Some("Add an alt attribute that describes the image's purpose"),
                ),
                check(
                    "aria-label",
                    Some("aria-label attribute exists and is not empty"),
                    Some("Add a non-empty aria-label attribute"),
                ),
                check(
                    "aria-labelledby",
                    Some("aria-labelledby attribute references elements with text"),
                    Some("Add an aria-labelledby attribute that references visible text"),
                ),
                check(
                    "role-presentation",
                    Some("Element's default semantics were overridden with role=\"presentation\""),
                    Some("Mark decorative images with role=\"presentation\" or alt=\"\""),
                ),
            ],
            ..RuleConfig::new("image-alt")
        },
        RuleConfig {
            description: Some("Identify each image's function and mark decorative images".to_string()),
            help: Some("Image function must be conveyed to assistive technology".to_string()),
            help_url: Some("https://www.w3.org/WAI/tutorials/images/decision-tree/".to_string()),
            decorate_node: Some(NodeDecorator::ImageSummary),
            how_to_check: true,
            guidance: keys(&["WCAG_1_1_1"]),
            checks: vec![check(
                "image-function-collected",
                Some("Image type: {data.imageType}"),
                None,
            )],
            ..RuleConfig::new("image-function")
        },
        // ============================================================
        // Links and buttons
        // ============================================================
        RuleConfig {
            help: Some("Links must have discernible text".to_string()),
            guidance: keys(&["WCAG_2_4_4", "WCAG_4_1_2"]),
            checks: vec![
                check(
                    "has-visible-text",
                    Some("Element has text that is visible to screen readers"),
                    Some("Add text inside the link that screen readers can read"),
                ),
                check(
                    "focusable-no-name",
                    Some("Element is not in tab order or has accessible text"),
                    Some("Remove the link from the tab order or give it accessible text"),
                ),
            ],
            ..RuleConfig::new("link-name")
        },
        RuleConfig {
            description: Some("Verify that each link's purpose is clear from its name and context".to_string()),
            help: Some("Link purpose must be identifiable".to_string()),
            help_url: Some(format!("{WCAG_UNDERSTANDING}/link-purpose-in-context")),
            decorate_node: Some(NodeDecorator::LinkSummary),
            how_to_check: true,
            guidance: keys(&["WCAG_2_4_4"]),
            checks: vec![check(
                "link-purpose-collected",
                Some("Link name: {data.accessibleName}"),
                None,
            )],
            ..RuleConfig::new("link-purpose")
        },
        RuleConfig {
            help: Some("Links must be distinguishable without relying on color".to_string()),
            how_to_check: true,
            guidance: keys(&["WCAG_1_4_1"]),
            checks: vec![check(
                "link-in-text-block",
                Some("Links can be distinguished from surrounding text in some way other than by color"),
                Some("Links must be distinguished from surrounding text in a way that does not rely on color"),
            )],
            ..RuleConfig::new("link-in-text-block")
        },
        RuleConfig {
            help: Some("Buttons must have discernible text".to_string()),
            guidance: keys(&["WCAG_4_1_2"]),
            checks: vec![check(
                "button-has-visible-text",
                Some("Element has inner text that is visible to screen readers"),
                Some("Add inner text that is visible to screen readers"),
            )],
            ..RuleConfig::new("button-name")
        },
        // ============================================================
        // Color
        // ============================================================
        RuleConfig {
            help: Some("Elements must have sufficient color contrast".to_string()),
            how_to_check: true,
            guidance: keys(&["WCAG_1_4_3"]),
            checks: vec![check(
                "color-contrast",
                Some("Element has sufficient color contrast of {data.contrastRatio}"),
                Some(
                    "Element has insufficient color contrast of {data.contrastRatio} \
                     (foreground color: {data.fgColor}, background color: {data.bgColor})",
                ),
            )],
            ..RuleConfig::new("color-contrast")
        },
        // ============================================================
        // Document
        // ============================================================
        RuleConfig {
            help: Some("Documents must have <title> element to aid in navigation".to_string()),
            guidance: keys(&["WCAG_2_4_2"]),
            checks: vec![check(
                "doc-has-title",
                Some("Document has a non-empty <title> element"),
                Some("Add a non-empty <title> element to the document"),
            )],
            ..RuleConfig::new("document-title")
        },
        RuleConfig {
            help: Some("<html> element must have a lang attribute".to_string()),
            guidance: keys(&["WCAG_3_1_1"]),
            checks: vec![check(
                "has-lang",
                Some("The <html> element has a lang attribute"),
                Some("Add a lang attribute to the <html> element"),
            )],
            ..RuleConfig::new("html-has-lang")
        },
        RuleConfig {
            help: Some("Page must have means to bypass repeated blocks".to_string()),
            guidance: keys(&["WCAG_2_4_1"]),
            ..RuleConfig::new("bypass")
        },
        // ============================================================
        // Structure
        // ============================================================
        RuleConfig {
            help: Some("All page content should be contained by landmarks".to_string()),
            best_practice: true,
            checks: vec![check(
                "region",
                Some("All page content is contained by landmarks"),
                Some("Move content that is not inside a landmark into one"),
            )],
            ..RuleConfig::new("region")
        },
        RuleConfig {
            help: Some("Heading levels should only increase by one".to_string()),
            best_practice: true,
            checks: vec![check(
                "heading-order",
                Some("Heading order valid"),
                Some("Heading order invalid"),
            )],
            ..RuleConfig::new("heading-order")
        },
        RuleConfig {
            help: Some("Document should have one main landmark".to_string()),
            best_practice: true,
            ..RuleConfig::new("landmark-one-main")
        },
        RuleConfig {
            help: Some("<ul> and <ol> must only directly contain <li>, <script> or <template> elements".to_string()),
            guidance: keys(&["WCAG_1_3_1"]),
            ..RuleConfig::new("list")
        },
        RuleConfig {
            help: Some("Styled <p> elements must not be used as headings".to_string()),
            how_to_check: true,
            guidance: keys(&["WCAG_1_3_1"]),
            ..RuleConfig::new("p-as-heading")
        },
        RuleConfig {
            help: Some("Table headers in a data table must refer to data cells".to_string()),
            how_to_check: true,
            guidance: keys(&["WCAG_1_3_1"]),
            ..RuleConfig::new("th-has-data-cells")
        },
        // ============================================================
        // Forms
        // ============================================================
        RuleConfig {
            help: Some("Form elements must have labels".to_string()),
            guidance: keys(&["WCAG_3_3_2", "WCAG_4_1_2"]),
            checks: vec![
                check(
                    "implicit-label",
                    Some("Form element has an implicit (wrapped) <label>"),
                    Some("Wrap the form element in a <label>"),
                ),
                check(
                    "explicit-label",
                    Some("Form element has an explicit <label>"),
                    Some("Add a <label> whose for attribute matches the element's id"),
                ),
                check(
                    "non-empty-title",
                    Some("Element has a title attribute"),
                    Some("Add a non-empty title attribute"),
                ),
            ],
            ..RuleConfig::new("label")
        },
        RuleConfig {
            help: Some("Interactive elements labelled through their content must have their visible label as part of their accessible name".to_string()),
            how_to_check: true,
            guidance: keys(&["WCAG_2_5_3"]),
            ..RuleConfig::new("label-content-name-mismatch")
        },
        RuleConfig {
            help: Some("autocomplete attribute must be used correctly".to_string()),
            guidance: keys(&["WCAG_1_3_5"]),
            ..RuleConfig::new("autocomplete-valid")
        },
        RuleConfig {
            help: Some("Frames must have an accessible name".to_string()),
            guidance: keys(&["WCAG_4_1_2"]),
            checks: vec![check(
                "non-empty-title",
                Some("Element has a title attribute"),
                Some("Add a non-empty title attribute to the frame"),
            )],
            ..RuleConfig::new("frame-title")
        },
        RuleConfig {
            help: Some("Scrollable region must have keyboard access".to_string()),
            how_to_check: true,
            guidance: keys(&["WCAG_2_1_1"]),
            ..RuleConfig::new("scrollable-region-focusable")
        },
    ]
}
