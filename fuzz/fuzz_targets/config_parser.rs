//! Fuzz target for TOML config parsing and registry compilation.
//!
//! Structured inputs build TOML with valid layout but hostile values
//! (templates with stray braces, unknown link keys, duplicate ids); raw
//! inputs exercise the parser directly. Neither may panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use a11ylens_domain::{MessageTemplate, compile_registries};
use a11ylens_types::{ConfigFile, NodeDecorator, RuleConfig};

#[derive(Arbitrary, Debug)]
struct FuzzConfig {
    use_structured: bool,
    raw_bytes: Vec<u8>,
    structured: StructuredConfig,
}

#[derive(Arbitrary, Debug)]
struct StructuredConfig {
    title: Option<String>,
    links: Vec<FuzzLink>,
    rules: Vec<FuzzRule>,
    suppressed: Vec<String>,
}

#[derive(Arbitrary, Debug)]
struct FuzzLink {
    id: String,
    text: String,
    href: String,
}

#[derive(Arbitrary, Debug)]
struct FuzzRule {
    id: String,
    help: Option<String>,
    decorator: Option<u8>,
    how_to_check: bool,
    best_practice: bool,
    guidance: Vec<String>,
    checks: Vec<FuzzCheck>,
}

#[derive(Arbitrary, Debug)]
struct FuzzCheck {
    id: String,
    pass_message: Option<String>,
    fail_message: Option<String>,
}

impl StructuredConfig {
    fn to_toml_string(&self) -> String {
        let mut out = String::new();

        if let Some(title) = &self.title {
            out.push_str("[defaults]\n");
            out.push_str(&format!("title = {}\n", escape_toml_string(title)));
        }

        for link in &self.links {
            out.push_str("\n[[link]]\n");
            out.push_str(&format!("id = {}\n", escape_toml_string(&link.id)));
            out.push_str(&format!("text = {}\n", escape_toml_string(&link.text)));
            out.push_str(&format!("href = {}\n", escape_toml_string(&link.href)));
        }

        for rule in &self.rules {
            out.push_str("\n[[rule]]\n");
            out.push_str(&format!("id = {}\n", escape_toml_string(&rule.id)));
            if let Some(help) = &rule.help {
                out.push_str(&format!("help = {}\n", escape_toml_string(help)));
            }
            if let Some(d) = rule.decorator {
                let name = if d % 2 == 0 {
                    NodeDecorator::LinkSummary
                } else {
                    NodeDecorator::ImageSummary
                };
                out.push_str(&format!("decorate_node = \"{}\"\n", name.as_str()));
            }
            out.push_str(&format!("how_to_check = {}\n", rule.how_to_check));
            out.push_str(&format!("best_practice = {}\n", rule.best_practice));
            if !rule.guidance.is_empty() {
                out.push_str(&format!("guidance = [{}]\n", join_strings(&rule.guidance)));
            }

            for check in &rule.checks {
                out.push_str("\n[[rule.check]]\n");
                out.push_str(&format!("id = {}\n", escape_toml_string(&check.id)));
                if let Some(m) = &check.pass_message {
                    out.push_str(&format!("pass_message = {}\n", escape_toml_string(m)));
                }
                if let Some(m) = &check.fail_message {
                    out.push_str(&format!("fail_message = {}\n", escape_toml_string(m)));
                }
            }
        }

        if !self.suppressed.is_empty() {
            out.push_str("\n[suppression]\n");
            out.push_str(&format!(
                "messages = [{}]\n",
                join_strings(&self.suppressed)
            ));
        }

        out
    }
}

fn join_strings(values: &[String]) -> String {
    values
        .iter()
        .map(|s| escape_toml_string(s))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_toml_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn exercise(config: &ConfigFile) {
    let _ = compile_registries(config);

    for rule in &config.rule {
        for check in &rule.checks {
            for template in [&check.pass_message, &check.fail_message].into_iter().flatten() {
                if let Ok(t) = MessageTemplate::parse(template) {
                    let _ = t.render(&serde_json::json!({ "name": "x", "nested": { "n": 1 } }));
                    if t.is_static() {
                        assert_eq!(t.render(&serde_json::Value::Null), *template);
                    }
                }
            }
        }
    }
}

fuzz_target!(|input: FuzzConfig| {
    if input.use_structured {
        let toml_str = input.structured.to_toml_string();
        if let Ok(config) = toml::from_str::<ConfigFile>(&toml_str) {
            exercise(&config);
        }
    } else if let Ok(s) = std::str::from_utf8(&input.raw_bytes) {
        if s.len() > 10000 {
            return;
        }

        let _ = toml::from_str::<toml::Value>(s);
        if let Ok(config) = toml::from_str::<ConfigFile>(s) {
            exercise(&config);
        }

        let wrapped = format!("[rule]\n{}", s);
        let _ = toml::from_str::<RuleConfig>(&wrapped);
    }

    let _ = toml::from_str::<NodeDecorator>("\"invalid\"");
});
