//! Configuration loading with include resolution.
//!
//! This module handles loading configuration files with support for:
//! - `includes` directive to compose configs from multiple files
//! - Circular include detection
//! - Merge semantics (later definitions override earlier ones by id)

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use a11ylens_types::{ConfigFile, Defaults, LinkConfig, RuleConfig, SuppressionConfig};

/// Maximum depth for include resolution to prevent excessive nesting.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Load a configuration file with include resolution.
///
/// `expand_env` is applied to each file's text before parsing.
pub fn load_config_with_includes<F>(path: &Path, expand_env: F) -> Result<ConfigFile>
where
    F: Fn(&str) -> Result<String> + Copy,
{
    let mut visited = HashSet::new();
    load_config_recursive(path, expand_env, &mut visited, 0)
}

/// Read and parse a single config file without resolving its includes.
pub fn read_config_file<F>(path: &Path, expand_env: F) -> Result<ConfigFile>
where
    F: Fn(&str) -> Result<String>,
{
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let expanded = expand_env(&text)?;
    toml::from_str(&expanded).with_context(|| format!("parse config '{}'", path.display()))
}

fn load_config_recursive<F>(
    path: &Path,
    expand_env: F,
    visited: &mut HashSet<PathBuf>,
    depth: usize,
) -> Result<ConfigFile>
where
    F: Fn(&str) -> Result<String> + Copy,
{
    if depth > MAX_INCLUDE_DEPTH {
        bail!(
            "Include depth exceeded maximum of {} levels at '{}'",
            MAX_INCLUDE_DEPTH,
            path.display()
        );
    }

    let canonical = path
        .canonicalize()
        .with_context(|| format!("canonicalize path '{}'", path.display()))?;

    if !visited.insert(canonical.clone()) {
        bail!("Circular include detected: '{}'", path.display());
    }

    debug!("Loading config from '{}' (depth {})", path.display(), depth);

    let config = read_config_file(path, expand_env)?;
    reject_duplicate_ids(&config, path)?;

    if config.includes.is_empty() {
        visited.remove(&canonical);
        return Ok(config);
    }

    let base_dir = path.parent().unwrap_or(Path::new("."));
    let mut merged = ConfigFile::default();

    for include_path in &config.includes {
        let full_path = base_dir.join(include_path);
        debug!(
            "Resolving include '{}' relative to '{}'",
            include_path,
            base_dir.display()
        );

        if !full_path.exists() {
            bail!(
                "Included config file not found: '{}' (resolved from '{}')",
                full_path.display(),
                include_path
            );
        }

        let included = load_config_recursive(&full_path, expand_env, visited, depth + 1)?;
        merged = merge_configs(merged, included);
    }

    // The including file wins over everything it includes.
    let main_without_includes = ConfigFile {
        includes: vec![],
        ..config
    };
    merged = merge_configs(merged, main_without_includes);

    // Only the current include chain counts as a cycle; diamonds are fine.
    visited.remove(&canonical);
    Ok(merged)
}

/// Overriding by id only applies across files; one file defines each id once.
fn reject_duplicate_ids(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(id) = first_duplicate(config.rule.iter().map(|r| r.id.as_str())) {
        bail!(
            "Rule '{}' is defined more than once in '{}'",
            id,
            path.display()
        );
    }
    if let Some(id) = first_duplicate(config.link.iter().map(|l| l.id.as_str())) {
        bail!(
            "Link '{}' is defined more than once in '{}'",
            id,
            path.display()
        );
    }
    Ok(())
}

fn first_duplicate<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

/// Merge two configs. Rules and links from `other` replace same-id entries
/// from `base` in place; new ids are appended. Suppressed messages are
/// unioned.
pub fn merge_configs(base: ConfigFile, other: ConfigFile) -> ConfigFile {
    let defaults = Defaults {
        title: other.defaults.title.or(base.defaults.title),
        mode: other.defaults.mode.or(base.defaults.mode),
    };

    let mut messages = base.suppression.messages;
    for message in other.suppression.messages {
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    ConfigFile {
        includes: vec![],
        defaults,
        rule: merge_by_id(base.rule, other.rule, |r: &RuleConfig| r.id.clone()),
        link: merge_by_id(base.link, other.link, |l: &LinkConfig| l.id.clone()),
        suppression: SuppressionConfig { messages },
    }
}

fn merge_by_id<T, F>(base: Vec<T>, other: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut merged = base;
    for item in other {
        let key = id(&item);
        match merged.iter().position(|existing| id(existing) == key) {
            Some(i) => merged[i] = item,
            None => merged.push(item),
        }
    }
    merged
}
