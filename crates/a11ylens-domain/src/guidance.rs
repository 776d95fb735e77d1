//! Guidance link registry: rule id -> ordered guidance references.

use std::collections::HashMap;

use a11ylens_types::{GuidanceLink, GuidanceTag, LinkConfig, RuleConfig};

use crate::rules::RegistryError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidanceRegistry {
    links: HashMap<String, Vec<GuidanceLink>>,
}

impl GuidanceRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `None` means the rule has no guidance; it is not an error.
    pub fn links_for(&self, rule_id: &str) -> Option<&[GuidanceLink]> {
        self.links.get(rule_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Resolve each rule's `guidance` keys against the link catalog.
///
/// Standard citations keep their configured order; the synthetic
/// "Best Practice" link, when requested, comes last. Rules with neither get
/// no entry.
pub fn compile_guidance_registry(
    rules: &[RuleConfig],
    catalog: &[LinkConfig],
) -> Result<GuidanceRegistry, RegistryError> {
    let mut by_id: HashMap<&str, GuidanceLink> = HashMap::with_capacity(catalog.len());
    for link in catalog {
        let previous = by_id.insert(link.id.as_str(), to_guidance_link(link));
        if previous.is_some() {
            return Err(RegistryError::DuplicateLink {
                link_id: link.id.clone(),
            });
        }
    }

    let mut links = HashMap::new();
    for rule in rules {
        let mut resolved = Vec::with_capacity(rule.guidance.len() + 1);
        for key in &rule.guidance {
            let link = by_id.get(key.as_str()).ok_or_else(|| RegistryError::UnknownLink {
                rule_id: rule.id.clone(),
                link_id: key.clone(),
            })?;
            resolved.push(link.clone());
        }
        if rule.best_practice {
            resolved.push(GuidanceLink::best_practice());
        }
        if !resolved.is_empty() {
            links.insert(rule.id.clone(), resolved);
        }
    }

    Ok(GuidanceRegistry { links })
}

fn to_guidance_link(link: &LinkConfig) -> GuidanceLink {
    let tags = if link.tags.is_empty() {
        None
    } else {
        Some(
            link.tags
                .iter()
                .map(|t| GuidanceTag {
                    id: t.id.clone(),
                    display_text: t.display_text.clone(),
                })
                .collect(),
        )
    };
    GuidanceLink {
        text: link.text.clone(),
        href: link.href.clone(),
        tags,
    }
}
