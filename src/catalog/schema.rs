//! JSON Schema for the persisted catalog value.
//!
//! Decoding runs the raw value through this schema before handing it to serde
//! so a corrupt store reports every offending field instead of the first serde
//! error. The schema is compiled once per process.

use jsonschema::JSONSchema;
use serde_json::{Value, json};
use std::sync::OnceLock;

/// Schema describing the value stored under the catalog key.
pub fn catalog_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "storefront catalog",
            "type": "array",
            "items": {
                "type": "object",
                "required": ["name", "price", "image"],
                "properties": {
                    "name": {"type": "string", "minLength": 1},
                    "price": {"type": "number", "minimum": 0},
                    "image": {"type": "string", "minLength": 1}
                }
            }
        })
    })
}

fn compiled_schema() -> Result<&'static JSONSchema, String> {
    static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    COMPILED
        .get_or_init(|| {
            JSONSchema::compile(catalog_schema())
                .map_err(|err| format!("compiling catalog schema: {err}"))
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Validate a decoded JSON value against the catalog schema.
///
/// On failure the error lists every violation, one per line.
pub fn validate_catalog_value(value: &Value) -> Result<(), String> {
    let schema = compiled_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(format!("catalog failed schema validation:\n{details}"));
    }
    Ok(())
}
