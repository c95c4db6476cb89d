//! MCP tools and prompts exposed by the server.
//!
//! Each tool validates and defaults its arguments, then delegates to the
//! YouTube client or to a capability borrowed from the caller.

pub mod caller;
pub mod channel;
pub mod lookup;
pub mod params;
pub mod prompts;
pub mod registry;
pub mod title;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that reach the protocol layer instead of the result payload.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What a tool hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Structured envelope
    Json(Value),
    /// Bare text (generated titles)
    Text(String),
}

impl ToolOutput {
    pub fn json<S: Serialize>(payload: &S) -> Result<Self, ToolError> {
        Ok(ToolOutput::Json(serde_json::to_value(payload)?))
    }

    /// Render as the text block sent over the wire.
    pub fn into_text(self) -> Result<String, ToolError> {
        match self {
            ToolOutput::Json(value) => Ok(serde_json::to_string_pretty(&value)?),
            ToolOutput::Text(text) => Ok(text),
        }
    }
}
