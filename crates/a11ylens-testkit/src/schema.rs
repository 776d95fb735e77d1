//! JSON schema validators for a11ylens DTOs.
//!
//! Schemas are generated with schemars from the DTO types, the same way
//! `cargo xtask schema` writes them to disk.

use a11ylens_types::{CardsViewModel, ConfigFile, ScanResults, UnifiedScanResult};
use jsonschema::JSONSchema;
use schemars::{JsonSchema, schema_for};
use serde::Serialize;

/// Error type for schema validation failures.
#[derive(Debug)]
pub struct SchemaValidationError {
    /// The validation errors.
    pub errors: Vec<String>,
}

impl std::fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schema validation failed: {}", self.errors.join("; "))
    }
}

impl std::error::Error for SchemaValidationError {}

/// Compile the schemars-generated schema for `T`.
pub fn compile_schema<T: JsonSchema>() -> JSONSchema {
    let schema = serde_json::to_value(schema_for!(T)).expect("schema should serialize to JSON");
    JSONSchema::compile(&schema).expect("generated schema should compile")
}

/// Validate `value` against the schema generated for its own type.
pub fn validate_against_own_schema<T>(value: &T) -> Result<(), SchemaValidationError>
where
    T: JsonSchema + Serialize,
{
    let json = serde_json::to_value(value).expect("value should serialize to JSON");
    validate_json::<T>(&json)
}

/// Validate arbitrary JSON against the schema generated for `T`.
pub fn validate_json<T: JsonSchema>(json: &serde_json::Value) -> Result<(), SchemaValidationError> {
    let schema = compile_schema::<T>();
    match schema.validate(json) {
        Ok(()) => Ok(()),
        Err(errors) => Err(SchemaValidationError {
            errors: errors.map(|e| e.to_string()).collect(),
        }),
    }
}

pub fn validate_config_file(config: &ConfigFile) -> Result<(), SchemaValidationError> {
    validate_against_own_schema(config)
}

pub fn validate_scan_results(scan: &ScanResults) -> Result<(), SchemaValidationError> {
    validate_against_own_schema(scan)
}

pub fn validate_unified_scan_result(
    unified: &UnifiedScanResult,
) -> Result<(), SchemaValidationError> {
    validate_against_own_schema(unified)
}

pub fn validate_cards_view_model(view: &CardsViewModel) -> Result<(), SchemaValidationError> {
    validate_against_own_schema(view)
}

/// Keys the unified model spells with hyphens.
pub const HYPHENATED_KEYS: &[&str] = &["css-selector", "how-to-fix-web", "how-to-check-web"];

/// Check if a string is in camelCase format.
///
/// Only ASCII letters and digits, starting with a lowercase letter.
pub fn is_camel_case(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric())
}

/// Recursively collect all field names from a JSON value.
pub fn collect_field_names(value: &serde_json::Value) -> Vec<String> {
    let mut names = Vec::new();
    collect_field_names_recursive(value, &mut names);
    names
}

fn collect_field_names_recursive(value: &serde_json::Value, names: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                names.push(key.clone());
                collect_field_names_recursive(val, names);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                collect_field_names_recursive(item, names);
            }
        }
        _ => {}
    }
}

/// Verify all field names are camelCase or one of [`HYPHENATED_KEYS`].
///
/// # Returns
///
/// - `Ok(())` if all field names conform
/// - `Err(Vec<String>)` with the offending field names
pub fn verify_camel_case_fields(value: &serde_json::Value) -> Result<(), Vec<String>> {
    let offending: Vec<String> = collect_field_names(value)
        .into_iter()
        .filter(|name| !is_camel_case(name) && !HYPHENATED_KEYS.contains(&name.as_str()))
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(offending)
    }
}
