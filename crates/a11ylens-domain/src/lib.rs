//! Domain logic: rule/guidance registries and per-rule decoration.
//!
//! This crate is designed to be I/O-free and highly testable.

pub mod guidance;
pub mod help_url;
pub mod messages;
pub mod node_decorators;
pub mod registries;
pub mod rules;
pub mod suppression;
pub mod template;

pub use guidance::{GuidanceRegistry, compile_guidance_registry};
pub use help_url::get_help_url;
pub use messages::add_messages_to_checks;
pub use node_decorators::decorate_node;
pub use registries::{Registries, compile_registries};
pub use rules::{CompiledCheck, CompiledRule, RegistryError, RuleRegistry, compile_rule_registry};
pub use suppression::{SuppressionList, suppress_checks_by_messages};
pub use template::{MessageTemplate, TemplateError};
