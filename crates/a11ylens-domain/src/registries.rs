use a11ylens_types::ConfigFile;

use crate::guidance::{GuidanceRegistry, compile_guidance_registry};
use crate::rules::{RegistryError, RuleRegistry, compile_rule_registry};
use crate::suppression::SuppressionList;

/// Everything the decorator reads, compiled once from a [`ConfigFile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registries {
    pub rules: RuleRegistry,
    pub guidance: GuidanceRegistry,
    pub suppression: SuppressionList,
}

impl Registries {
    /// No configuration: all decoration falls back to engine text.
    pub fn empty() -> Self {
        Self {
            rules: RuleRegistry::empty(),
            guidance: GuidanceRegistry::empty(),
            suppression: SuppressionList::built_in().clone(),
        }
    }
}

pub fn compile_registries(config: &ConfigFile) -> Result<Registries, RegistryError> {
    Ok(Registries {
        rules: compile_rule_registry(&config.rule)?,
        guidance: compile_guidance_registry(&config.rule, &config.link)?,
        suppression: SuppressionList::with_additional(&config.suppression.messages),
    })
}
