//! Tool registry and dispatcher.
//!
//! Built once at startup from every tool table, then read-only. `call_tool`
//! is the single boundary where failures become user-visible text: unknown
//! names, schema violations, upstream API errors and transport failures all
//! come back as an error [`CallOutcome`] rather than a Rust error.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::client::CodaClient;
use crate::error::ErrorContext;
use crate::tools::schema::{normalize_args, ArgsValidator};
use crate::tools::{all_tools, ToolSpec};
use crate::types::{CallOutcome, ToolDefinition};
use crate::{Error, Result};

struct RegisteredTool {
    spec: ToolSpec,
    validator: ArgsValidator,
}

impl RegisteredTool {
    async fn invoke(&self, client: &CodaClient, args: Value) -> Result<String> {
        let args = normalize_args(args);
        self.validator.validate(&args)?;
        (self.spec.handler)(client, args).await
    }
}

pub struct ToolRegistry {
    client: Arc<CodaClient>,
    tools: Vec<RegisteredTool>,
    by_name: HashMap<String, usize>,
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Register every Coda tool against `client`.
    pub fn new(client: Arc<CodaClient>) -> Result<Self> {
        Self::with_tools(client, all_tools())
    }

    /// Register an explicit tool list; names must be unique.
    pub fn with_tools(client: Arc<CodaClient>, specs: Vec<ToolSpec>) -> Result<Self> {
        let mut tools = Vec::with_capacity(specs.len());
        let mut by_name = HashMap::with_capacity(specs.len());

        for spec in specs {
            if by_name.contains_key(spec.name()) {
                return Err(Error::configuration_with_context(
                    "duplicate tool name",
                    ErrorContext::new().with_details(spec.name().to_string()),
                ));
            }
            let validator = ArgsValidator::compile(spec.name(), &spec.definition.input_schema)?;
            by_name.insert(spec.name().to_string(), tools.len());
            tools.push(RegisteredTool { spec, validator });
        }

        let definitions = tools.iter().map(|t| t.spec.definition.clone()).collect();
        debug!(count = tools.len(), "tool registry built");

        Ok(Self {
            client,
            tools,
            by_name,
            definitions,
        })
    }

    /// Tool definitions in registration order.
    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch one call. Never fails; errors are folded into the outcome.
    pub async fn call_tool(&self, name: &str, args: Value) -> CallOutcome {
        let Some(tool) = self.by_name.get(name).map(|idx| &self.tools[*idx]) else {
            warn!(tool = name, "unknown tool requested");
            return CallOutcome::error(format!("Unknown tool: {}", name));
        };

        debug!(tool = name, "tool called");
        match tool.invoke(&self.client, args).await {
            Ok(text) => CallOutcome::success(text),
            Err(e) => {
                match &e {
                    Error::Api(api) => error!(
                        tool = name,
                        status = api.status(),
                        class = api.name(),
                        error = %e,
                        "tool call failed"
                    ),
                    _ => error!(tool = name, error = %e, "tool call failed"),
                }
                CallOutcome::error(e)
            }
        }
    }
}
