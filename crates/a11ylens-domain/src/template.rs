//! Check message templates.
//!
//! A template is literal text with `{data}` or `{data.<field>...}`
//! placeholders, filled from a check's `data` JSON at decoration time.
//!
//! ```rust
//! use a11ylens_domain::MessageTemplate;
//!
//! let t = MessageTemplate::parse("Contrast ratio {data.ratio}").unwrap();
//! let msg = t.render(&serde_json::json!({ "ratio": 3.2 }));
//! assert_eq!(msg, "Contrast ratio 3.2");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("placeholder regex should compile"));

const DATA_ROOT: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unbalanced '{{' or '}}'")]
    UnbalancedBrace,

    #[error("unknown placeholder '{{{0}}}'; expected 'data' or 'data.<field>'")]
    UnknownPlaceholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Field path below `data`; empty means the whole value.
    Data(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut last = 0;

        for m in PLACEHOLDER.find_iter(template) {
            push_literal(&mut segments, &template[last..m.start()])?;
            let inner = &m.as_str()[1..m.as_str().len() - 1];
            segments.push(Segment::Data(parse_path(inner)?));
            last = m.end();
        }
        push_literal(&mut segments, &template[last..])?;

        Ok(Self { segments })
    }

    /// True when the template contains no placeholders.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    pub fn render(&self, data: &Value) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Data(path) => {
                    if let Some(v) = lookup(data, path) {
                        push_value(&mut out, v);
                    }
                }
            }
        }
        out
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<(), TemplateError> {
    if text.contains('{') || text.contains('}') {
        return Err(TemplateError::UnbalancedBrace);
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

fn parse_path(inner: &str) -> Result<Vec<String>, TemplateError> {
    let trimmed = inner.trim();
    let mut parts = trimmed.split('.');
    if parts.next() != Some(DATA_ROOT) {
        return Err(TemplateError::UnknownPlaceholder(trimmed.to_string()));
    }

    let fields: Vec<String> = parts.map(str::to_string).collect();
    if fields.iter().any(|f| f.is_empty()) {
        return Err(TemplateError::UnknownPlaceholder(trimmed.to_string()));
    }
    Ok(fields)
}

fn lookup<'a>(data: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(data, |v, field| v.get(field.as_str()))
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}
