use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// JSON Schema of a dataset file
pub static DATASET_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Faceted search dataset",
        "type": "object",
        "properties": {
            "facets": {
                "type": "object",
                "additionalProperties": {"type": "string"}
            },
            "items": {
                "type": "array",
                "items": {"type": "object"}
            },
            "pagination_count": {
                "type": "integer",
                "minimum": 1
            }
        },
        "required": ["facets", "items"]
    })
});

/// Validate data against JSON Schema
/// Returns Ok(()) if valid, Err with every validation error if invalid
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a parsed document against [`DATASET_SCHEMA`]
pub fn validate_dataset_shape(data: &Value) -> Result<(), Vec<String>> {
    validate_against_schema(&DATASET_SCHEMA, data)
}
