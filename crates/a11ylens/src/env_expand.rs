//! Environment variable expansion for configuration files.
//!
//! - `${VAR}` expands to the value of VAR and errors if it is unset
//! - `${VAR:-default}` uses "default" if VAR is unset or empty

use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::Regex;
use tracing::debug;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
        .expect("env var regex should compile")
});

pub fn expand_env_vars(content: &str) -> Result<String> {
    expand_with(content, |name| std::env::var(name).ok())
}

fn expand_with<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(content.len());
    let mut last_end = 0;

    for cap in ENV_VAR.captures_iter(content) {
        let whole = cap.get(0).expect("group 0 always matches");
        let name = &cap[1];
        result.push_str(&content[last_end..whole.start()]);

        match (lookup(name).filter(|v| !v.is_empty()), cap.get(2)) {
            (Some(value), _) => {
                debug!("Expanded env var ${{{}}}", name);
                result.push_str(&value);
            }
            (None, Some(default)) => {
                debug!("Env var ${{{}}} not set, using default", name);
                result.push_str(default.as_str());
            }
            (None, None) => {
                bail!("Environment variable '{name}' is not set and no default provided");
            }
        }

        last_end = whole.end();
    }

    result.push_str(&content[last_end..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "SITE" => Some("https://shop.example".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn expands_set_variables() {
        let out = expand_with("href = \"${SITE}/a11y\"", lookup).unwrap();
        assert_eq!(out, "href = \"https://shop.example/a11y\"");
    }

    #[test]
    fn uses_default_when_unset_or_empty() {
        assert_eq!(expand_with("${NOPE:-x}", lookup).unwrap(), "x");
        assert_eq!(expand_with("${EMPTY:-y}", lookup).unwrap(), "y");
        assert_eq!(expand_with("${NOPE:-}", lookup).unwrap(), "");
    }

    #[test]
    fn errors_when_unset_without_default() {
        let err = expand_with("${NOPE}", lookup).unwrap_err();
        assert!(err.to_string().contains("'NOPE' is not set"));
    }

    #[test]
    fn leaves_other_text_alone() {
        let text = "pass_message = \"Link name: {data.accessibleName}\" $HOME ${";
        assert_eq!(expand_with(text, lookup).unwrap(), text);
    }
}
