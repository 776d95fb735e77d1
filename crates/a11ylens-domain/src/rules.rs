use std::collections::HashMap;

use a11ylens_types::{NodeDecorator, RuleConfig};
use serde_json::Value;

use crate::template::{MessageTemplate, TemplateError};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("rule '{rule_id}' is defined more than once")]
    DuplicateRule { rule_id: String },

    #[error("rule '{rule_id}' defines check '{check_id}' more than once")]
    DuplicateCheck { rule_id: String, check_id: String },

    #[error("link '{link_id}' is defined more than once")]
    DuplicateLink { link_id: String },

    #[error("rule '{rule_id}' references unknown guidance link '{link_id}'")]
    UnknownLink { rule_id: String, link_id: String },

    #[error("rule '{rule_id}' check '{check_id}' has invalid message template '{template}': {source}")]
    InvalidTemplate {
        rule_id: String,
        check_id: String,
        template: String,
        source: TemplateError,
    },
}

/// Pass/fail message generators for one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCheck {
    pub id: String,
    pub pass: Option<MessageTemplate>,
    pub fail: Option<MessageTemplate>,
}

impl CompiledCheck {
    pub fn pass_message(&self, data: &Value) -> Option<String> {
        self.pass.as_ref().map(|t| t.render(data))
    }

    pub fn fail_message(&self, data: &Value) -> Option<String> {
        self.fail.as_ref().map(|t| t.render(data))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub id: String,
    pub description: Option<String>,
    pub help: Option<String>,
    pub help_url: Option<String>,
    pub decorate_node: Option<NodeDecorator>,
    pub how_to_check: bool,
    pub checks: HashMap<String, CompiledCheck>,
}

impl CompiledRule {
    pub fn check(&self, check_id: &str) -> Option<&CompiledCheck> {
        self.checks.get(check_id)
    }
}

/// Rule configuration keyed by rule id.
///
/// Lookups that miss are never errors: callers fall back to engine-supplied
/// text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRegistry {
    rules: HashMap<String, CompiledRule>,
}

impl RuleRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, rule_id: &str) -> Option<&CompiledRule> {
        self.rules.get(rule_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether downstream "how to check" text exists for this rule.
    pub fn has_how_to_check(&self, rule_id: &str) -> bool {
        self.get(rule_id).is_some_and(|r| r.how_to_check)
    }
}

pub fn compile_rule_registry(configs: &[RuleConfig]) -> Result<RuleRegistry, RegistryError> {
    let mut rules = HashMap::with_capacity(configs.len());

    for cfg in configs {
        let mut checks = HashMap::with_capacity(cfg.checks.len());
        for check in &cfg.checks {
            let compiled = CompiledCheck {
                id: check.id.clone(),
                pass: compile_template(cfg, &check.id, check.pass_message.as_deref())?,
                fail: compile_template(cfg, &check.id, check.fail_message.as_deref())?,
            };
            if checks.insert(check.id.clone(), compiled).is_some() {
                return Err(RegistryError::DuplicateCheck {
                    rule_id: cfg.id.clone(),
                    check_id: check.id.clone(),
                });
            }
        }

        let rule = CompiledRule {
            id: cfg.id.clone(),
            description: cfg.description.clone(),
            help: cfg.help.clone(),
            help_url: cfg.help_url.clone(),
            decorate_node: cfg.decorate_node,
            how_to_check: cfg.how_to_check,
            checks,
        };
        if rules.insert(cfg.id.clone(), rule).is_some() {
            return Err(RegistryError::DuplicateRule {
                rule_id: cfg.id.clone(),
            });
        }
    }

    Ok(RuleRegistry { rules })
}

fn compile_template(
    rule: &RuleConfig,
    check_id: &str,
    template: Option<&str>,
) -> Result<Option<MessageTemplate>, RegistryError> {
    let Some(template) = template else {
        return Ok(None);
    };
    MessageTemplate::parse(template)
        .map(Some)
        .map_err(|e| RegistryError::InvalidTemplate {
            rule_id: rule.id.clone(),
            check_id: check_id.to_string(),
            template: template.to_string(),
            source: e,
        })
}
