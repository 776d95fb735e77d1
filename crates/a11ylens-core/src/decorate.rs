use a11ylens_domain::{Registries, add_messages_to_checks, decorate_node, get_help_url};
use a11ylens_types::{
    Bucket, EngineScanResult, EngineTimestamp, NodeResult, RuleResult, ScanResults,
};
use chrono::{DateTime, SecondsFormat};
use tracing::debug;

/// Supplies the page title, so decoration can run outside the scanned page.
pub trait DocumentTitleProvider {
    fn document_title(&self) -> String;
}

impl<F> DocumentTitleProvider for F
where
    F: Fn() -> String,
{
    fn document_title(&self) -> String {
        self()
    }
}

/// A fixed title, e.g. one passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticTitle(pub String);

impl DocumentTitleProvider for StaticTitle {
    fn document_title(&self) -> String {
        self.0.clone()
    }
}

/// Turns raw engine output into [`ScanResults`].
///
/// Per bucket, each rule result gets configured check messages, the rule's
/// node hook, configured description/help, suppression, guidance links and
/// its resolved help URL. Engine ordering of rules and nodes is preserved.
/// The input is never mutated, so decorating the same result twice yields
/// identical output.
pub struct ResultDecorator<'a, T> {
    registries: &'a Registries,
    title: T,
}

impl<'a, T> ResultDecorator<'a, T>
where
    T: DocumentTitleProvider,
{
    pub fn new(registries: &'a Registries, title: T) -> Self {
        Self { registries, title }
    }

    /// Returns `None` when there is no engine result yet.
    pub fn decorate_results(&self, engine: Option<&EngineScanResult>) -> Option<ScanResults> {
        let engine = engine?;

        let mut out = ScanResults {
            timestamp: normalize_timestamp(&engine.timestamp),
            target_page_url: engine.url.clone(),
            target_page_title: self.title.document_title(),
            ..Default::default()
        };

        for bucket in Bucket::ALL {
            *out.bucket_mut(bucket) = self.decorate_bucket(bucket, engine.bucket(bucket));
        }

        Some(out)
    }

    fn decorate_bucket(&self, bucket: Bucket, rules: &[RuleResult]) -> Vec<RuleResult> {
        // Inapplicable rules have no nodes by definition.
        let remove_empty_rules = bucket != Bucket::Inapplicable;

        rules
            .iter()
            .filter_map(|rule| {
                let decorated = self.decorate_rule(rule);
                let Some(kept) = self
                    .registries
                    .suppression
                    .suppress(decorated, remove_empty_rules)
                else {
                    debug!(
                        "dropping rule '{}' from {}: no nodes left",
                        rule.id,
                        bucket.as_str()
                    );
                    return None;
                };
                Some(self.attach_links(kept))
            })
            .collect()
    }

    fn decorate_rule(&self, rule: &RuleResult) -> RuleResult {
        let config = self.registries.rules.get(&rule.id);
        let hook = config.and_then(|c| c.decorate_node);

        let nodes = rule
            .nodes
            .iter()
            .map(|node| {
                let decorated = NodeResult {
                    any: add_messages_to_checks(&node.any, config),
                    all: add_messages_to_checks(&node.all, config),
                    none: add_messages_to_checks(&node.none, config),
                    ..node.clone()
                };
                match hook {
                    Some(h) => decorate_node(h, decorated),
                    None => decorated,
                }
            })
            .collect();

        RuleResult {
            id: rule.id.clone(),
            description: config
                .and_then(|c| c.description.clone())
                .unwrap_or_else(|| rule.description.clone()),
            help: config
                .and_then(|c| c.help.clone())
                .unwrap_or_else(|| rule.help.clone()),
            help_url: rule.help_url.clone(),
            nodes,
            guidance_links: None,
        }
    }

    fn attach_links(&self, rule: RuleResult) -> RuleResult {
        let guidance_links = self
            .registries
            .guidance
            .links_for(&rule.id)
            .map(<[_]>::to_vec);
        let help_url = get_help_url(&rule.id, &rule.help_url, Some(&self.registries.rules));
        RuleResult {
            guidance_links,
            help_url,
            ..rule
        }
    }
}

/// RFC 3339 (UTC, millisecond precision) for epoch-millis timestamps;
/// pre-formatted strings pass through.
pub fn normalize_timestamp(timestamp: &EngineTimestamp) -> String {
    match timestamp {
        EngineTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| ms.to_string()),
        EngineTimestamp::Text(s) => s.clone(),
    }
}
