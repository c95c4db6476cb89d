//! Capabilities borrowed from the MCP client during a tool call.
//!
//! Sampling asks the caller's model for text; elicitation pauses the call and
//! asks the caller for structured input. The server implements [`CallerPeer`]
//! over the live connection, tests implement it with canned answers.

use anyhow::Result;
use rmcp::model::ElicitationSchema;
use serde_json::Value;
use std::future::Future;

/// A text-generation request forwarded to the caller's model.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingRequest {
    pub prompt: String,
    /// Preferred models, most preferred first
    pub model_hints: Vec<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The caller's answer to an elicitation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Elicitation {
    /// Caller submitted the form; content may be absent
    Accept(Option<Value>),
    Decline,
    Cancel,
}

/// Requests an in-flight tool call can make back to its caller.
pub trait CallerPeer: Send + Sync {
    /// Ask the caller's model to complete `request`.
    ///
    /// Returns the generated text, or `None` if the reply held no text.
    fn sample(
        &self,
        request: SamplingRequest,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Suspend until the caller answers `message` with data matching `schema`.
    fn elicit(
        &self,
        message: String,
        schema: ElicitationSchema,
    ) -> impl Future<Output = Result<Elicitation>> + Send;
}
