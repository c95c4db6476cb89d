//! Title generation through the caller's model.

use crate::tools::ToolError;
use crate::tools::caller::{CallerPeer, SamplingRequest};
use crate::tools::params::{GenerateTitleParams, require_non_empty};

/// How sampling requests are parameterized.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingSettings {
    pub model_hints: Vec<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

fn title_prompt(topic: &str) -> String {
    format!(
        "Generate a catchy YouTube video title based on the topic: {}. \
         Before generating the title, search for popular titles on YouTube related to the topic.",
        topic
    )
}

/// Ask the caller's model for a catchy title.
///
/// # Arguments
/// * `peer` - Caller connection
/// * `settings` - Model hints and sampling parameters
/// * `params` - Tool arguments
///
/// # Returns
/// * `Result<String, ToolError>` - Generated text, empty if the caller gave none
///
/// # Details
/// One attempt, no validation of what comes back. A failed sampling round
/// trip is logged and yields an empty string.
pub async fn generate_title<P: CallerPeer>(
    peer: &P,
    settings: &SamplingSettings,
    params: GenerateTitleParams,
) -> Result<String, ToolError> {
    require_non_empty("topic", &params.topic)?;

    let request = SamplingRequest {
        prompt: title_prompt(&params.topic),
        model_hints: settings.model_hints.clone(),
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
    };

    match peer.sample(request).await {
        Ok(text) => Ok(text.unwrap_or_default()),
        Err(e) => {
            tracing::warn!("Sampling failed for topic '{}': {:#}", params.topic, e);
            Ok(String::new())
        }
    }
}
