//! crates/gpv_io/src/schema.rs
//! Embedded JSON Schema (draft-07) for one region document.
//!
//! The schema pins the shapes the renderer relies on: numeric map keys for
//! slots/days/epochs, string state codes, and the two required top-level
//! sections. Unknown fields are allowed; producers add bookkeeping freely.

use serde_json::Value;

use crate::IoError;

pub const REGION_DOCUMENT_SCHEMA_JSON: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "GPV region document",
  "type": "object",
  "required": ["preset", "fact"],
  "definitions": {
    "numericKeyed": {
      "type": "object",
      "propertyNames": { "pattern": "^[0-9]+$" }
    },
    "daySchedule": {
      "type": "object",
      "propertyNames": { "pattern": "^[0-9]+$" },
      "additionalProperties": { "type": "string" }
    },
    "optText": { "type": ["string", "null"] }
  },
  "properties": {
    "regionId": { "type": ["string", "null"] },
    "preset": {
      "type": "object",
      "properties": {
        "time_zone": {
          "allOf": [{ "$ref": "#/definitions/numericKeyed" }],
          "additionalProperties": {
            "type": "array",
            "items": { "type": "string" }
          }
        },
        "days": {
          "allOf": [{ "$ref": "#/definitions/numericKeyed" }],
          "additionalProperties": { "type": "string" }
        },
        "data": {
          "type": "object",
          "additionalProperties": {
            "allOf": [{ "$ref": "#/definitions/numericKeyed" }],
            "additionalProperties": { "$ref": "#/definitions/daySchedule" }
          }
        },
        "time_type": {
          "type": "object",
          "additionalProperties": { "type": "string" }
        },
        "sch_names": {
          "type": "object",
          "additionalProperties": { "type": "string" }
        },
        "update": { "$ref": "#/definitions/optText" },
        "updateFact": { "$ref": "#/definitions/optText" }
      }
    },
    "fact": {
      "type": "object",
      "properties": {
        "today": {
          "oneOf": [
            { "type": "integer" },
            { "type": "string", "pattern": "^\\s*-?[0-9]+\\s*$" },
            { "type": "null" }
          ]
        },
        "data": {
          "allOf": [{ "$ref": "#/definitions/numericKeyed" }],
          "additionalProperties": {
            "type": "object",
            "additionalProperties": { "$ref": "#/definitions/daySchedule" }
          }
        },
        "update": { "$ref": "#/definitions/optText" },
        "updateFact": { "$ref": "#/definitions/optText" }
      }
    },
    "meta": {
      "type": ["object", "null"],
      "properties": {
        "contentHash": { "$ref": "#/definitions/optText" }
      }
    }
  }
}"##;

/// Validate `v` against the embedded region schema; report the first violation.
#[cfg(feature = "schemaval")]
pub fn validate_region_document(v: &Value) -> Result<(), IoError> {
    use jsonschema::{Draft, JSONSchema};

    let schema: Value = serde_json::from_str(REGION_DOCUMENT_SCHEMA_JSON)
        .map_err(|e| IoError::Invalid(format!("embedded schema is not JSON: {e}")))?;
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|e| IoError::Invalid(format!("embedded schema failed to compile: {e}")))?;

    let first = match compiled.validate(v) {
        Ok(()) => None,
        Err(mut errors) => errors.next().map(|err| {
            let ptr = err.instance_path.to_string();
            (if ptr.is_empty() { "/".to_string() } else { ptr }, err.to_string())
        }),
    };
    match first {
        None => Ok(()),
        Some((pointer, msg)) => Err(IoError::Schema { pointer, msg }),
    }
}

/// Without `schemaval` only the required top-level sections are checked.
#[cfg(not(feature = "schemaval"))]
pub fn validate_region_document(v: &Value) -> Result<(), IoError> {
    for key in ["preset", "fact"] {
        if !v.get(key).map(Value::is_object).unwrap_or(false) {
            return Err(IoError::Schema {
                pointer: "/".into(),
                msg: format!("\"{key}\" is a required property"),
            });
        }
    }
    Ok(())
}
