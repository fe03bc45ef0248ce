//! Tool tables: one entry per exposed Coda operation.
//!
//! Each resource group contributes its own table; [`all_tools`] concatenates
//! them once at startup for the registry.
//!
//! A handler receives arguments that have already passed its schema, turns
//! them into typed parameters, makes exactly one client call and renders the
//! payload as text.

use crate::client::{ApiPayload, CodaClient};
use crate::types::ToolDefinition;
use crate::Result;
use futures::future::BoxFuture;
use serde_json::Value;

pub mod columns;
pub mod docs;
pub mod pages;
pub mod rows;
pub mod schema;
pub mod tables;

pub type ToolFuture<'a> = BoxFuture<'a, Result<String>>;

/// Handler signature shared by every tool.
pub type ToolHandler = for<'a> fn(&'a CodaClient, Value) -> ToolFuture<'a>;

/// Appended to row mutations, which Coda applies after responding.
pub const ASYNC_NOTE: &str =
    "Note: This operation is asynchronous and will be processed within seconds.";

/// Appended to upserts: every row matching the key columns is updated.
pub const UPSERT_NOTE: &str =
    "Note: This operation is asynchronous. If multiple rows match the key columns, ALL will be updated.";

pub struct ToolSpec {
    pub definition: ToolDefinition,
    pub handler: ToolHandler,
}

impl ToolSpec {
    pub fn new(name: &str, description: &str, input_schema: Value, handler: ToolHandler) -> Self {
        Self {
            definition: ToolDefinition {
                name: name.to_string(),
                description: description.to_string(),
                input_schema,
            },
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Every tool, grouped by resource in a stable order.
pub fn all_tools() -> Vec<ToolSpec> {
    let mut tools = docs::tools();
    tools.extend(pages::tools());
    tools.extend(tables::tools());
    tools.extend(columns::tools());
    tools.extend(rows::tools());
    tools
}

pub(crate) fn render(payload: &ApiPayload) -> Result<String> {
    payload.to_pretty_string()
}

pub(crate) fn render_with_note(payload: &ApiPayload, note: &str) -> Result<String> {
    Ok(format!("{}\n\n{}", render(payload)?, note))
}
