//! Tool catalogue and dispatch.

use crate::config::Config;
use crate::tools::caller::CallerPeer;
use crate::tools::params::{
    ChannelDetailsParams, ChannelVideosParams, GenerateTitleParams, SearchChannelParams,
    SearchChannelsParams, SearchVideosParams, VideoCommentsParams, VideoIdParams,
};
use crate::tools::title::SamplingSettings;
use crate::tools::{ToolError, ToolOutput, channel, lookup, title};
use crate::youtube::transport::HttpTransport;
use crate::youtube::{ApiAccess, Envelope, Transport};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const VIDEOS_ICON: &str = "youtube-videos.png";
const CHANNEL_ICON: &str = "youtube-channel.png";
const TITLE_ICON: &str = "youtube-title.png";

/// Tool as advertised in tools/list.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Icon file name inside the configured icons directory
    pub icon: &'static str,
    /// JSON Schema for the arguments object
    pub input_schema: Map<String, Value>,
}

impl ToolSpec {
    fn new<P: JsonSchema>(name: &'static str, description: &'static str, icon: &'static str) -> Self {
        let input_schema = match serde_json::to_value(schemars::schema_for!(P)) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self {
            name,
            description,
            icon,
            input_schema,
        }
    }
}

/// All tools, in the order they are listed.
pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new::<SearchVideosParams>(
            "search_videos",
            "Search YouTube videos by topic or title. Optional ordering, region and language filters.",
            VIDEOS_ICON,
        ),
        ToolSpec::new::<VideoIdParams>(
            "get_video_details",
            "Get full details of a YouTube video: duration, view, like and comment counts, tags.",
            VIDEOS_ICON,
        ),
        ToolSpec::new::<SearchChannelsParams>(
            "search_channels",
            "Search YouTube channels by name or keywords.",
            CHANNEL_ICON,
        ),
        ToolSpec::new::<ChannelDetailsParams>(
            "get_channel_details",
            "Get details of a YouTube channel, optionally with subscriber, video and view counts.",
            CHANNEL_ICON,
        ),
        ToolSpec::new::<ChannelVideosParams>(
            "get_channel_videos",
            "List the most recent uploads of a YouTube channel.",
            CHANNEL_ICON,
        ),
        ToolSpec::new::<VideoCommentsParams>(
            "get_video_comments",
            "Get top-level comments of a YouTube video.",
            VIDEOS_ICON,
        ),
        ToolSpec::new::<GenerateTitleParams>(
            "generate_youtube_title",
            "Generate a catchy YouTube video title for a topic using the client's model.",
            TITLE_ICON,
        ),
        ToolSpec::new::<SearchChannelParams>(
            "search_youtube_channel",
            "Find a YouTube channel by name, asking the user whether to include its latest videos.",
            CHANNEL_ICON,
        ),
    ]
}

/// Everything a tool call needs, built once at start-up.
pub struct Registry<T = HttpTransport> {
    access: ApiAccess<T>,
    sampling: SamplingSettings,
}

impl Registry<HttpTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ApiAccess::from_config(config),
            SamplingSettings {
                model_hints: config.sampling_models.clone(),
                temperature: config.sampling_temperature,
                max_tokens: config.sampling_max_tokens,
            },
        )
    }
}

impl<T: Transport> Registry<T> {
    pub fn new(access: ApiAccess<T>, sampling: SamplingSettings) -> Self {
        Self { access, sampling }
    }

    /// Run a tool by name.
    ///
    /// # Arguments
    /// * `peer` - Caller connection, used by the sampling and elicitation tools
    /// * `name` - Tool name from [`specs`]
    /// * `args` - Raw arguments object
    ///
    /// # Returns
    /// * `Result<ToolOutput, ToolError>` - Envelope or text on success
    ///
    /// # Details
    /// Upstream problems come back inside the envelope. Only malformed
    /// arguments and unknown names are errors here.
    pub async fn call<P: CallerPeer>(
        &self,
        peer: &P,
        name: &str,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ToolError> {
        tracing::info!(tool = name, "Tool called");
        let access = &self.access;

        match name {
            "search_videos" => respond(name, lookup::search_videos(access, parse(args)?).await?),
            "get_video_details" => {
                respond(name, lookup::get_video_details(access, parse(args)?).await?)
            }
            "search_channels" => {
                respond(name, lookup::search_channels(access, parse(args)?).await?)
            }
            "get_channel_details" => {
                respond(name, lookup::get_channel_details(access, parse(args)?).await?)
            }
            "get_channel_videos" => {
                respond(name, lookup::get_channel_videos(access, parse(args)?).await?)
            }
            "get_video_comments" => {
                respond(name, lookup::get_video_comments(access, parse(args)?).await?)
            }
            "generate_youtube_title" => Ok(ToolOutput::Text(
                title::generate_title(peer, &self.sampling, parse(args)?).await?,
            )),
            "search_youtube_channel" => respond(
                name,
                channel::search_youtube_channel(access, peer, parse(args)?).await?,
            ),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn respond<D: Serialize>(tool: &str, envelope: Envelope<D>) -> Result<ToolOutput, ToolError> {
    if let Some(failure) = envelope.failure() {
        tracing::debug!(tool, error = %failure.error, "Tool returned a failure payload");
    }
    ToolOutput::json(&envelope)
}

fn parse<A: DeserializeOwned>(args: Map<String, Value>) -> Result<A, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidParams(e.to_string()))
}
