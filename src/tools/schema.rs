//! Argument validation against each tool's declared input schema.

use crate::error::ErrorContext;
use crate::{Error, Result};
use jsonschema::{Draft, JSONSchema};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Compiled input schema for one tool.
pub struct ArgsValidator {
    tool: String,
    schema: JSONSchema,
}

impl ArgsValidator {
    pub fn compile(tool: &str, schema: &Value) -> Result<Self> {
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("failed to compile input schema: {}", e),
                    ErrorContext::new().with_source(tool.to_string()),
                )
            })?;
        Ok(Self {
            tool: tool.to_string(),
            schema,
        })
    }

    /// Report the first violated constraint, if any.
    pub fn validate(&self, args: &Value) -> Result<()> {
        let Err(mut errors) = self.schema.validate(args) else {
            return Ok(());
        };
        let Some(first) = errors.next() else {
            return Ok(());
        };

        let mut context = ErrorContext::new().with_source(self.tool.clone());
        let path = first.instance_path.to_string();
        if !path.is_empty() {
            context = context.with_field_path(path);
        }
        Err(Error::validation_with_context(first.to_string(), context))
    }
}

/// Deserialize already-validated arguments into a typed parameter struct.
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| {
        Error::validation_with_context(
            e.to_string(),
            ErrorContext::new().with_source(tool.to_string()),
        )
    })
}

/// Missing or `null` arguments mean "no arguments".
pub fn normalize_args(args: Value) -> Value {
    match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    }
}

// Schema fragments shared by the tool tables.

pub(crate) fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Non-empty identifier string.
pub(crate) fn id(description: &str) -> Value {
    json!({ "type": "string", "minLength": 1, "description": description })
}

pub(crate) fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

pub(crate) fn boolean(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

pub(crate) fn limit(max: u32, description: &str) -> Value {
    json!({ "type": "integer", "minimum": 1, "maximum": max, "description": description })
}

pub(crate) fn string_enum(values: &[&str], description: &str) -> Value {
    json!({ "type": "string", "enum": values, "description": description })
}

pub(crate) fn string_array(min_items: Option<u32>, description: &str) -> Value {
    let mut schema = json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description,
    });
    if let Some(min) = min_items {
        schema["minItems"] = json!(min);
    }
    schema
}

pub(crate) fn cells(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "properties": {
                "column": { "type": "string", "description": "Column ID or name" },
                "value": { "description": "Cell value" }
            },
            "required": ["column", "value"]
        }
    })
}

pub(crate) fn rows(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "properties": {
                "cells": cells("Array of cells with column and value")
            },
            "required": ["cells"]
        }
    })
}

pub(crate) fn canvas_content(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "format": string_enum(&["html", "markdown"], "Content format"),
            "content": string("The actual content in HTML or Markdown")
        },
        "required": ["format", "content"]
    })
}
