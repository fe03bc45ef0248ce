//! # coda-mcp
//!
//! Coda document API exposed as a set of MCP tools.
//!
//! ## Overview
//!
//! A host (an AI assistant) lists the available tools, then invokes them by
//! name with JSON arguments. Each call is validated against the tool's input
//! schema, executed as one rate-limited HTTP request against Coda, and
//! answered with a uniform text envelope: pretty-printed JSON on success,
//! `Error: <message>` with `isError` set on failure.
//!
//! ## Core Behaviour
//!
//! - **Rate limiting**: reads and writes draw from separate sliding windows
//!   (100 and 10 requests per 6 seconds). Callers over budget wait; they are
//!   never rejected locally.
//! - **Error classification**: non-2xx responses become a typed [`ApiError`]
//!   keyed by status code.
//! - **Asynchronous mutations**: `202 Accepted` responses surface the
//!   upstream request id, and row mutations carry an advisory note.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coda_mcp::{CodaClientBuilder, ToolRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> coda_mcp::Result<()> {
//!     let client = CodaClientBuilder::new("your-api-token").build()?;
//!     let registry = ToolRegistry::new(Arc::new(client))?;
//!
//!     let outcome = registry
//!         .call_tool("coda_list_docs", json!({ "isOwner": true, "limit": 10 }))
//!         .await;
//!     println!("{}", outcome.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Coda API client, builder and response classification |
//! | [`config`] | Environment-driven server configuration |
//! | [`mcp`] | JSON-RPC server over stdio |
//! | [`registry`] | Tool registry and dispatcher |
//! | [`resilience`] | Dual-window sliding rate limiter |
//! | [`tools`] | Per-resource tool tables and argument schemas |
//! | [`transport`] | HTTP transport and URL construction |
//! | [`types`] | Request parameters and tool envelope types |

pub mod client;
pub mod config;
pub mod mcp;
pub mod registry;
pub mod resilience;
pub mod tools;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{ApiPayload, CodaClient, CodaClientBuilder};
pub use config::ServerConfig;
pub use mcp::McpServer;
pub use registry::ToolRegistry;
pub use resilience::{RateLimiter, RateLimiterConfig, RequestClass};
pub use types::{CallOutcome, ToolContent, ToolDefinition};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, Error, ErrorContext};
