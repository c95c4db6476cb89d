//! Prompt templates offered to the caller.

use crate::tools::ToolError;
use crate::tools::params::{DEFAULT_MAX_RESULTS, require_non_empty};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const SEARCH_PROMPT: &str = "search_prompt";

/// One named argument of a prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A prompt template as advertised in prompts/list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgumentSpec>,
}

pub fn specs() -> Vec<PromptSpec> {
    vec![PromptSpec {
        name: SEARCH_PROMPT,
        description: "Build a request to search YouTube videos about a topic in a given language",
        arguments: vec![
            PromptArgumentSpec {
                name: "topic",
                description: "Subject of the videos",
                required: true,
            },
            PromptArgumentSpec {
                name: "language",
                description: "Language of the videos (e.g. English, Spanish, French)",
                required: true,
            },
            PromptArgumentSpec {
                name: "max_results",
                description: "Maximum number of videos (default 5)",
                required: false,
            },
        ],
    }]
}

/// Prompt arguments arrive as strings; `max_results` is accepted as either
/// a string or a number.
#[derive(Debug, Deserialize)]
struct SearchPromptArgs {
    topic: String,
    language: String,
    #[serde(default)]
    max_results: Option<Value>,
}

fn max_results_arg(value: Option<Value>) -> Result<u32, ToolError> {
    match value {
        None | Some(Value::Null) => Ok(DEFAULT_MAX_RESULTS),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ToolError::InvalidParams(format!("`max_results` out of range: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(DEFAULT_MAX_RESULTS),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| {
            ToolError::InvalidParams(format!("`max_results` is not a number: {}", s))
        }),
        Some(other) => Err(ToolError::InvalidParams(format!(
            "`max_results` is not a number: {}",
            other
        ))),
    }
}

/// Render the search prompt.
///
/// # Arguments
/// * `topic` - Subject of the videos
/// * `language` - Language the videos should be in
/// * `max_results` - Upper bound on the number of videos
pub fn search_prompt(topic: &str, language: &str, max_results: u32) -> String {
    format!(
        "Busca máximo {} vídeos relacionados con {} en {}",
        max_results, topic, language
    )
}

/// Render a prompt by name.
///
/// # Arguments
/// * `name` - Prompt name from [`specs`]
/// * `args` - Raw arguments from the caller
///
/// # Returns
/// * `Result<String, ToolError>` - Rendered prompt text
pub fn render(name: &str, args: Map<String, Value>) -> Result<String, ToolError> {
    match name {
        SEARCH_PROMPT => {
            let args: SearchPromptArgs = serde_json::from_value(Value::Object(args))
                .map_err(|e| ToolError::InvalidParams(e.to_string()))?;
            require_non_empty("topic", &args.topic)?;
            require_non_empty("language", &args.language)?;
            let max_results = max_results_arg(args.max_results)?;
            tracing::info!(
                topic = %args.topic,
                language = %args.language,
                max_results,
                "Generating search prompt"
            );
            Ok(search_prompt(&args.topic, &args.language, max_results))
        }
        other => Err(ToolError::UnknownPrompt(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_search_prompt_text() {
        assert_eq!(
            search_prompt("Rust", "Spanish", 3),
            "Busca máximo 3 vídeos relacionados con Rust en Spanish"
        );
    }

    #[test]
    fn test_render_defaults_max_results() {
        let text = render(
            SEARCH_PROMPT,
            args(json!({ "topic": "cocina", "language": "Spanish" })),
        )
        .unwrap();
        assert_eq!(text, "Busca máximo 5 vídeos relacionados con cocina en Spanish");
    }

    #[test]
    fn test_render_accepts_string_and_number_max_results() {
        let from_string = render(
            SEARCH_PROMPT,
            args(json!({ "topic": "a", "language": "French", "max_results": "7" })),
        )
        .unwrap();
        let from_number = render(
            SEARCH_PROMPT,
            args(json!({ "topic": "a", "language": "French", "max_results": 7 })),
        )
        .unwrap();
        assert_eq!(from_string, from_number);
        assert!(from_string.starts_with("Busca máximo 7 "));
    }

    #[test]
    fn test_render_rejects_bad_arguments() {
        assert!(matches!(
            render(SEARCH_PROMPT, args(json!({ "topic": "a" }))),
            Err(ToolError::InvalidParams(_))
        ));
        assert!(matches!(
            render(
                SEARCH_PROMPT,
                args(json!({ "topic": "a", "language": "en", "max_results": "many" }))
            ),
            Err(ToolError::InvalidParams(_))
        ));
        assert!(matches!(
            render("missing", Map::new()),
            Err(ToolError::UnknownPrompt(_))
        ));
    }

    #[test]
    fn test_specs_mark_optional_arguments() {
        let spec = &specs()[0];
        assert_eq!(spec.name, "search_prompt");
        let optional: Vec<_> = spec
            .arguments
            .iter()
            .filter(|a| !a.required)
            .map(|a| a.name)
            .collect();
        assert_eq!(optional, vec!["max_results"]);
    }
}
