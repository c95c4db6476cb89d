//! Tool arguments as received from MCP clients.

use crate::tools::ToolError;
use crate::youtube::{CommentOrder, SearchOrder};
use schemars::JsonSchema;
use serde::Deserialize;

/// `max_results` when the caller leaves it out.
pub const DEFAULT_MAX_RESULTS: u32 = 5;
const DEFAULT_MAX_COMMENTS: u32 = 20;

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

fn default_max_comments() -> u32 {
    DEFAULT_MAX_COMMENTS
}

fn default_true() -> bool {
    true
}

fn default_upload_order() -> SearchOrder {
    SearchOrder::Date
}

/// Reject blank identifiers and queries before they reach upstream.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidParams(format!("`{}` must not be empty", field)));
    }
    Ok(())
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchVideosParams {
    /// Topic or title to search for, e.g. "Tutorial de Python"
    pub topic: String,
    /// Maximum number of results (1-50)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Result ordering
    #[serde(default)]
    pub order: SearchOrder,
    /// ISO 3166-1 alpha-2 region code, e.g. "ES"
    #[serde(default)]
    pub region_code: Option<String>,
    /// ISO 639-1 language code, e.g. "es"
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct VideoIdParams {
    /// YouTube video ID
    pub video_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchChannelsParams {
    /// Channel name or keywords
    pub query: String,
    /// Maximum number of results (1-50)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChannelDetailsParams {
    /// YouTube channel ID
    pub channel_id: String,
    /// Include subscriber, video and view counts
    #[serde(default = "default_true")]
    pub include_statistics: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChannelVideosParams {
    /// YouTube channel ID
    pub channel_id: String,
    /// Maximum number of videos (1-50)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Ordering of the returned page
    #[serde(default = "default_upload_order")]
    pub order: SearchOrder,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct VideoCommentsParams {
    /// YouTube video ID
    pub video_id: String,
    /// Maximum number of comments (1-100)
    #[serde(default = "default_max_comments")]
    pub max_results: u32,
    #[serde(default)]
    pub order: CommentOrder,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateTitleParams {
    /// Subject of the video, e.g. "Cómo aprender Python en 2024"
    pub topic: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchChannelParams {
    /// Name of the channel, e.g. "freeCodeCamp"
    pub channel_name: String,
}

/// Form the caller fills in when asked how much channel data to fetch.
#[derive(Debug, Deserialize)]
pub struct ChannelInfoRequest {
    #[serde(default = "default_true")]
    pub include_latest_videos: bool,
}
