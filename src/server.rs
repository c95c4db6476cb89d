//! MCP protocol binding.
//!
//! Adapts the tool registry to rmcp's [`ServerHandler`] and implements
//! [`CallerPeer`] over the live client connection.

use crate::config::Config;
use crate::icons;
use crate::tools::ToolError;
use crate::tools::caller::{CallerPeer, Elicitation, SamplingRequest};
use crate::tools::prompts::{self, PromptSpec};
use crate::tools::registry::{self, Registry, ToolSpec};
use anyhow::{Context, Result};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, CreateElicitationRequestParam,
    CreateElicitationResult, CreateMessageRequestParam, CreateMessageResult, ElicitationAction,
    ElicitationSchema, GetPromptRequestParam, GetPromptResult, Icon, Implementation,
    ListPromptsResult, ListToolsResult, ModelHint, ModelPreferences, PaginatedRequestParam,
    Prompt, PromptArgument, PromptMessage, PromptMessageRole, Role, SamplingMessage,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{Peer, RequestContext};
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::collections::HashMap;
use std::sync::Arc;

const SERVER_NAME: &str = "YouTube MCP Server";
const INSTRUCTIONS: &str = "A server that provides YouTube video information.";
const SERVER_ICON: &str = "youtube.png";

/// The MCP server. Cheap to clone; the HTTP transport builds one per session.
#[derive(Clone)]
pub struct YouTubeMcpServer {
    registry: Arc<Registry>,
    tools: Arc<Vec<Tool>>,
    prompts: Arc<Vec<Prompt>>,
    server_icons: Arc<Vec<Icon>>,
}

impl YouTubeMcpServer {
    /// Build the server from configuration.
    ///
    /// # Details
    /// Validates the API key and reads every icon once. Neither step is
    /// fatal: a missing key turns every network tool into a configuration
    /// failure, a missing icon is simply not advertised.
    pub fn new(config: &Config) -> Self {
        let registry = Registry::from_config(config);

        let mut tool_icons: HashMap<&str, Vec<Icon>> = HashMap::new();
        let tools = registry::specs()
            .into_iter()
            .map(|spec| {
                let icons = tool_icons
                    .entry(spec.icon)
                    .or_insert_with(|| icons::icon_or_empty(&config.icons_dir, spec.icon))
                    .clone();
                mcp_tool(spec, icons)
            })
            .collect();
        let prompts = prompts::specs().into_iter().map(mcp_prompt).collect();

        Self {
            registry: Arc::new(registry),
            tools: Arc::new(tools),
            prompts: Arc::new(prompts),
            server_icons: Arc::new(icons::load_icons(&config.icons_dir, &[SERVER_ICON])),
        }
    }

    fn implementation(&self) -> Implementation {
        Implementation {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            icons: non_empty(self.server_icons.as_ref().clone()),
            ..Implementation::from_build_env()
        }
    }
}

fn non_empty(icons: Vec<Icon>) -> Option<Vec<Icon>> {
    (!icons.is_empty()).then_some(icons)
}

fn mcp_tool(spec: ToolSpec, icons: Vec<Icon>) -> Tool {
    Tool {
        icons: non_empty(icons),
        ..Tool::new(spec.name, spec.description, Arc::new(spec.input_schema))
    }
}

fn mcp_prompt(spec: PromptSpec) -> Prompt {
    let arguments = spec
        .arguments
        .into_iter()
        .map(|a| PromptArgument {
            name: a.name.to_string(),
            title: None,
            description: Some(a.description.to_string()),
            required: Some(a.required),
        })
        .collect();
    Prompt::new(spec.name, Some(spec.description), Some(arguments))
}

fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::Serialization(_) => McpError::internal_error(err.to_string(), None),
        _ => McpError::invalid_params(err.to_string(), None),
    }
}

impl ServerHandler for YouTubeMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: self.implementation(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        let output = self
            .registry
            .call(&context.peer, &request.name, args)
            .await
            .map_err(to_mcp_error)?;
        let text = output.into_text().map_err(to_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(self.prompts.as_ref().clone()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        let text = prompts::render(&request.name, args).map_err(to_mcp_error)?;
        Ok(GetPromptResult {
            description: None,
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}

fn sampling_params(request: SamplingRequest) -> CreateMessageRequestParam {
    let hints = request
        .model_hints
        .into_iter()
        .map(|name| ModelHint { name: Some(name) })
        .collect();

    CreateMessageRequestParam {
        messages: vec![SamplingMessage {
            role: Role::User,
            content: Content::text(request.prompt),
        }],
        model_preferences: Some(ModelPreferences {
            hints: Some(hints),
            cost_priority: None,
            speed_priority: None,
            intelligence_priority: None,
        }),
        system_prompt: None,
        include_context: None,
        temperature: Some(request.temperature),
        max_tokens: request.max_tokens,
        stop_sequences: None,
        metadata: None,
    }
}

/// Text of a sampling result; `None` for image or audio replies.
fn sampled_text(result: &CreateMessageResult) -> Option<String> {
    result
        .message
        .content
        .as_text()
        .map(|block| block.text.clone())
}

fn elicitation_answer(result: CreateElicitationResult) -> Elicitation {
    match result.action {
        ElicitationAction::Accept => Elicitation::Accept(result.content.filter(|c| !c.is_null())),
        ElicitationAction::Decline => Elicitation::Decline,
        ElicitationAction::Cancel => Elicitation::Cancel,
    }
}

impl CallerPeer for Peer<RoleServer> {
    async fn sample(&self, request: SamplingRequest) -> Result<Option<String>> {
        let result = self
            .create_message(sampling_params(request))
            .await
            .context("Sampling request failed")?;
        Ok(sampled_text(&result))
    }

    async fn elicit(&self, message: String, schema: ElicitationSchema) -> Result<Elicitation> {
        let result = self
            .create_elicitation(CreateElicitationRequestParam {
                message,
                requested_schema: schema,
            })
            .await
            .context("Elicitation request failed")?;
        Ok(elicitation_answer(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    fn config_with_icons(dir: &TempDir) -> Config {
        Config {
            icons_dir: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_sampling_params_wire_form() {
        let params = sampling_params(SamplingRequest {
            prompt: "Generate a title".to_string(),
            model_hints: vec!["model-a".to_string(), "model-b".to_string()],
            temperature: 0.5,
            max_tokens: 200,
        });
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["messages"][0]["role"], json!("user"));
        assert_eq!(body["messages"][0]["content"]["text"], json!("Generate a title"));
        assert_eq!(body["modelPreferences"]["hints"][1]["name"], json!("model-b"));
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["maxTokens"], json!(200));
    }

    fn sampling_result(content: Content) -> CreateMessageResult {
        CreateMessageResult {
            model: "model-a".to_string(),
            stop_reason: Some(CreateMessageResult::STOP_REASON_END_TURN.to_string()),
            message: SamplingMessage {
                role: Role::Assistant,
                content,
            },
        }
    }

    #[test]
    fn test_sampled_text() {
        assert_eq!(
            sampled_text(&sampling_result(Content::text("Hi"))).as_deref(),
            Some("Hi")
        );
        assert_eq!(
            sampled_text(&sampling_result(Content::image("aGk=", "image/png"))),
            None
        );
    }

    #[test]
    fn test_elicitation_answer() {
        let answer = |action, content| elicitation_answer(CreateElicitationResult { action, content });
        assert_eq!(
            answer(
                ElicitationAction::Accept,
                Some(json!({ "include_latest_videos": false }))
            ),
            Elicitation::Accept(Some(json!({ "include_latest_videos": false })))
        );
        assert_eq!(
            answer(ElicitationAction::Accept, Some(Value::Null)),
            Elicitation::Accept(None)
        );
        assert_eq!(answer(ElicitationAction::Decline, None), Elicitation::Decline);
        assert_eq!(answer(ElicitationAction::Cancel, None), Elicitation::Cancel);
    }

    #[test]
    fn test_tools_listed_without_icons() {
        let dir = TempDir::new().unwrap();
        let server = YouTubeMcpServer::new(&config_with_icons(&dir));
        let names: Vec<String> = server.tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"search_youtube_channel".to_string()));
        assert!(server.server_icons.is_empty());
        assert!(server.tools.iter().all(|t| t.icons.is_none()));
    }

    #[test]
    fn test_server_icon_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("youtube.png"), [0x89, b'P', b'N', b'G']).unwrap();
        let server = YouTubeMcpServer::new(&config_with_icons(&dir));
        assert_eq!(server.server_icons.len(), 1);
        assert!(server.server_icons[0].src.starts_with("data:image/png;base64,"));
        let icons = server.get_info().server_info.icons.unwrap();
        assert_eq!(icons[0].mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_tool_icons_attached() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("youtube-title.png"), b"title").unwrap();
        let server = YouTubeMcpServer::new(&config_with_icons(&dir));
        let icons_of = |name: &str| {
            server
                .tools
                .iter()
                .find(|t| t.name == name)
                .and_then(|t| t.icons.clone())
        };
        assert_eq!(icons_of("generate_youtube_title").map(|i| i.len()), Some(1));
        assert!(icons_of("search_videos").is_none());
    }

    #[test]
    fn test_get_info() {
        let dir = TempDir::new().unwrap();
        let info = YouTubeMcpServer::new(&config_with_icons(&dir)).get_info();
        assert_eq!(info.server_info.name, "YouTube MCP Server");
        assert_eq!(
            info.instructions.as_deref(),
            Some("A server that provides YouTube video information.")
        );
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
    }

    #[test]
    fn test_prompt_listing() {
        let prompt = mcp_prompt(prompts::specs().remove(0));
        assert_eq!(prompt.name, "search_prompt");
        let args = prompt.arguments.unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[2].name, "max_results");
        assert_eq!(args[2].required, Some(false));
    }

    #[test]
    fn test_tool_errors_map_to_invalid_params() {
        let err = to_mcp_error(ToolError::UnknownTool("nope".to_string()));
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("nope"));
    }
}
