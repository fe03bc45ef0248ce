//! Core data types: typed request parameters for each Coda resource group
//! and the tool/envelope types exchanged with the host.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`docs`] | Document listing and creation parameters |
//! | [`pages`] | Page metadata and canvas content parameters |
//! | [`tables`] | Table and column parameters |
//! | [`rows`] | Row query and mutation parameters |
//! | [`tool`] | Tool definitions and the call-result envelope |
//!
//! Request structs serialize with Coda's camelCase field names and omit
//! unset optional fields.

pub mod docs;
pub mod pages;
pub mod rows;
pub mod tables;
pub mod tool;

pub use tool::{CallOutcome, ToolContent, ToolDefinition};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional count that may arrive as `10` or `10.0`.
pub(crate) fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!("expected a whole number, got {}", n)));
    }
    Ok(Some(n as u32))
}
