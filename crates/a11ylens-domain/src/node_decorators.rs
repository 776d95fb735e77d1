//! Built-in node decoration hooks.
//!
//! Each hook runs once per node after message decoration and synthesizes a
//! display snippet from check data when the node has none.

use a11ylens_types::{CheckResult, NodeDecorator, NodeResult};
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";

pub fn decorate_node(decorator: NodeDecorator, node: NodeResult) -> NodeResult {
    if node.snippet.is_some() {
        return node;
    }

    let snippet = match decorator {
        NodeDecorator::LinkSummary => {
            let name = data_field(&node, "accessibleName");
            let url = data_field(&node, "url");
            format!("Link name: {name}\nLink URL: {url}")
        }
        NodeDecorator::ImageSummary => {
            let kind = data_field(&node, "imageType");
            let name = data_field(&node, "accessibleName");
            format!("Image type: {kind}\nAccessible name: {name}")
        }
    };

    NodeResult {
        snippet: Some(snippet),
        ..node
    }
}

/// First non-empty value of `field` across the node's check data.
fn data_field(node: &NodeResult, field: &str) -> String {
    all_checks(node)
        .filter_map(|c| c.data.get(field))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn all_checks(node: &NodeResult) -> impl Iterator<Item = &CheckResult> {
    node.any.iter().chain(&node.all).chain(&node.none)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node_with_data(data: Value) -> NodeResult {
        NodeResult {
            target: vec!["a".to_string()],
            html: "<a href=\"/x\">x</a>".to_string(),
            any: vec![CheckResult {
                id: "link-purpose-collected".to_string(),
                data,
                result: true,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn link_summary_uses_name_and_url() {
        let node = node_with_data(json!({ "accessibleName": "Home", "url": "https://e.com/" }));
        let out = decorate_node(NodeDecorator::LinkSummary, node);
        assert_eq!(
            out.snippet.as_deref(),
            Some("Link name: Home\nLink URL: https://e.com/")
        );
        assert_eq!(out.html, "<a href=\"/x\">x</a>");
    }

    #[test]
    fn missing_data_falls_back_to_not_available() {
        let node = node_with_data(json!({ "accessibleName": "  " }));
        let out = decorate_node(NodeDecorator::LinkSummary, node);
        assert_eq!(
            out.snippet.as_deref(),
            Some("Link name: N/A\nLink URL: N/A")
        );

        let out = decorate_node(NodeDecorator::ImageSummary, node_with_data(Value::Null));
        assert_eq!(
            out.snippet.as_deref(),
            Some("Image type: N/A\nAccessible name: N/A")
        );
    }

    #[test]
    fn existing_snippet_is_kept() {
        let mut node = node_with_data(json!({ "accessibleName": "Home" }));
        node.snippet = Some("custom".to_string());
        let out = decorate_node(NodeDecorator::LinkSummary, node);
        assert_eq!(out.snippet.as_deref(), Some("custom"));
    }
}
