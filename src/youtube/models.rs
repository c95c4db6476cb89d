//! YouTube Data API v3 models and data structures.
//!
//! Raw `Api*` structures mirror the upstream JSON; the flat records below them
//! are what the server hands back to callers.

use crate::error::YouTubeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Build the public watch URL for a video.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Build the public URL for a channel.
pub fn channel_url(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{}", channel_id)
}

/// YouTube API search/list response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Response items
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Next page token for pagination
    #[serde(rename = "nextPageToken")]
    #[allow(dead_code)] // Single-page listings only
    pub next_page_token: Option<String>,
}

/// Thumbnail information.
#[derive(Debug, Default, Deserialize)]
pub struct ApiThumbnails {
    /// Default thumbnail
    #[serde(default)]
    pub default: Option<ApiThumbnail>,
    /// Medium thumbnail
    #[serde(default)]
    pub medium: Option<ApiThumbnail>,
    /// High thumbnail
    #[serde(default)]
    pub high: Option<ApiThumbnail>,
}

impl ApiThumbnails {
    /// URL of the default-size thumbnail, falling back to larger ones.
    fn default_url(&self) -> String {
        self.default
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.high.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }

    fn high_url(&self) -> Option<String> {
        self.high.as_ref().map(|t| t.url.clone())
    }
}

/// Single thumbnail.
#[derive(Debug, Deserialize)]
pub struct ApiThumbnail {
    /// Thumbnail URL
    pub url: String,
}

/// Item from search.list (either a video or a channel hit).
#[derive(Debug, Deserialize)]
pub struct ApiSearchItem {
    pub id: ApiSearchItemId,
    pub snippet: ApiSearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: ApiThumbnails,
}

/// Item from videos.list.
#[derive(Debug, Deserialize)]
pub struct ApiVideoItem {
    /// Video ID
    pub id: String,
    /// Snippet containing video details
    pub snippet: ApiVideoSnippet,
    /// Content details (duration, etc.)
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ApiContentDetails>,
    /// Statistics (view count, etc.)
    pub statistics: Option<ApiVideoStatistics>,
}

/// Video snippet from API response.
#[derive(Debug, Deserialize)]
pub struct ApiVideoSnippet {
    /// Video title
    pub title: String,
    /// Channel title
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    /// Channel ID
    #[serde(rename = "channelId")]
    pub channel_id: String,
    /// Video description
    #[serde(default)]
    pub description: String,
    /// Published date
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    /// Free-form tags (absent when the uploader set none)
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

/// Content details (duration, etc.).
#[derive(Debug, Deserialize)]
pub struct ApiContentDetails {
    /// Video duration in ISO 8601 format (PT4M13S)
    pub duration: Option<String>,
}

/// Video statistics. Upstream encodes counts as decimal strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

/// Item from channels.list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChannelItem {
    pub id: String,
    pub snippet: ApiChannelSnippet,
    pub content_details: Option<ApiChannelContentDetails>,
    pub statistics: Option<ApiChannelStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub custom_url: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: ApiThumbnails,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChannelContentDetails {
    #[serde(default)]
    pub related_playlists: ApiRelatedPlaylists,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiRelatedPlaylists {
    /// Uploads playlist ID
    pub uploads: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChannelStatistics {
    pub subscriber_count: Option<String>,
    pub video_count: Option<String>,
    pub view_count: Option<String>,
}

/// Item from playlistItems.list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlaylistItem {
    pub snippet: ApiPlaylistSnippet,
    pub content_details: ApiPlaylistContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlaylistSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnails: ApiThumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlaylistContentDetails {
    pub video_id: String,
}

/// Item from commentThreads.list.
#[derive(Debug, Deserialize)]
pub struct ApiCommentThread {
    pub snippet: ApiCommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommentThreadSnippet {
    pub top_level_comment: ApiTopLevelComment,
}

#[derive(Debug, Deserialize)]
pub struct ApiTopLevelComment {
    pub snippet: ApiCommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommentSnippet {
    pub author_display_name: String,
    pub text_display: String,
    #[serde(default)]
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A video as returned by a search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub thumbnail_high: Option<String>,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
}

/// Full video record from videos.list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VideoDetail {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    /// ISO 8601 duration as sent upstream
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    pub url: String,
}

/// A channel as returned by a search.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelSummary {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
}

/// Channel record from channels.list.
///
/// Statistics fields are only serialized when they were requested.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelDetail {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub custom_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub thumbnail: String,
    pub url: String,
    pub uploads_playlist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
}

/// An entry of a channel's uploads playlist.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlaylistVideo {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
}

/// Top-level comment on a video.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoSearchResults {
    pub total_results: usize,
    pub videos: Vec<VideoSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelSearchResults {
    pub total_results: usize,
    pub channels: Vec<ChannelSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelVideos {
    pub channel_id: String,
    pub total_results: usize,
    pub videos: Vec<PlaylistVideo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoComments {
    pub video_id: String,
    pub total_results: usize,
    pub comments: Vec<Comment>,
}

impl TryFrom<ApiSearchItem> for VideoSummary {
    type Error = YouTubeError;

    fn try_from(item: ApiSearchItem) -> Result<Self, Self::Error> {
        let video_id = item
            .id
            .video_id
            .ok_or_else(|| YouTubeError::Other("search result without videoId".to_string()))?;
        Ok(Self {
            url: watch_url(&video_id),
            thumbnail: item.snippet.thumbnails.default_url(),
            thumbnail_high: item.snippet.thumbnails.high_url(),
            video_id,
            title: item.snippet.title,
            description: item.snippet.description,
            channel_id: item.snippet.channel_id,
            channel_title: item.snippet.channel_title,
            published_at: item.snippet.published_at,
        })
    }
}

impl TryFrom<ApiSearchItem> for ChannelSummary {
    type Error = YouTubeError;

    fn try_from(item: ApiSearchItem) -> Result<Self, Self::Error> {
        let channel_id = item
            .id
            .channel_id
            .ok_or_else(|| YouTubeError::Other("search result without channelId".to_string()))?;
        Ok(Self {
            url: channel_url(&channel_id),
            thumbnail: item.snippet.thumbnails.default_url(),
            channel_id,
            title: item.snippet.title,
            description: item.snippet.description,
            published_at: item.snippet.published_at,
        })
    }
}

impl From<ApiVideoItem> for VideoDetail {
    /// Convert API video item to a flat record.
    ///
    /// # Details
    /// Parses duration from ISO 8601 format (PT4M13S) to seconds and the
    /// string-encoded counters to integers. Unparseable values become `None`.
    fn from(item: ApiVideoItem) -> Self {
        let duration = item.content_details.and_then(|cd| cd.duration);
        let duration_seconds = duration.as_deref().and_then(parse_duration);
        let (view_count, like_count, comment_count) = match item.statistics {
            Some(s) => (
                parse_count(s.view_count),
                parse_count(s.like_count),
                parse_count(s.comment_count),
            ),
            None => (None, None, None),
        };

        Self {
            url: watch_url(&item.id),
            video_id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            channel_id: item.snippet.channel_id,
            channel_title: item.snippet.channel_title,
            published_at: item.snippet.published_at,
            duration,
            duration_seconds,
            view_count,
            like_count,
            comment_count,
            tags: item.snippet.tags,
            category_id: item.snippet.category_id,
        }
    }
}

impl ChannelDetail {
    /// Flatten a channels.list item.
    ///
    /// # Arguments
    /// * `item` - API channel item
    /// * `include_statistics` - Whether counters should be carried over
    pub fn from_api(item: ApiChannelItem, include_statistics: bool) -> Self {
        let uploads_playlist_id = item
            .content_details
            .and_then(|cd| cd.related_playlists.uploads);
        let (subscriber_count, video_count, view_count) = match item.statistics {
            Some(s) if include_statistics => (
                parse_count(s.subscriber_count),
                parse_count(s.video_count),
                parse_count(s.view_count),
            ),
            _ => (None, None, None),
        };

        Self {
            url: channel_url(&item.id),
            thumbnail: item.snippet.thumbnails.default_url(),
            channel_id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            custom_url: item.snippet.custom_url,
            published_at: item.snippet.published_at,
            uploads_playlist_id,
            country: item.snippet.country,
            subscriber_count,
            video_count,
            view_count,
        }
    }
}

impl From<ApiPlaylistItem> for PlaylistVideo {
    fn from(item: ApiPlaylistItem) -> Self {
        let video_id = item.content_details.video_id;
        Self {
            url: watch_url(&video_id),
            thumbnail: item.snippet.thumbnails.default_url(),
            video_id,
            title: item.snippet.title,
            description: item.snippet.description,
            published_at: item.snippet.published_at,
        }
    }
}

impl From<ApiCommentThread> for Comment {
    fn from(thread: ApiCommentThread) -> Self {
        let c = thread.snippet.top_level_comment.snippet;
        Self {
            author: c.author_display_name,
            text: c.text_display,
            like_count: c.like_count,
            published_at: c.published_at,
            updated_at: c.updated_at,
        }
    }
}

fn parse_count(value: Option<String>) -> Option<u64> {
    value.and_then(|v| v.parse().ok())
}

/// Parse ISO 8601 duration (PT4M13S, P1DT2H) to seconds.
///
/// # Arguments
/// * `duration` - ISO 8601 duration string
///
/// # Returns
/// * `Option<u64>` - Duration in seconds, or `None` if the format is not understood
pub fn parse_duration(duration: &str) -> Option<u64> {
    let rest = duration.strip_prefix('P')?;
    let mut seconds = 0u64;
    let mut current_num = String::new();
    let mut in_time = false;

    for ch in rest.chars() {
        let unit = match (ch, in_time) {
            ('T', false) => {
                in_time = true;
                continue;
            }
            (c, _) if c.is_ascii_digit() => {
                current_num.push(c);
                continue;
            }
            ('W', false) => 7 * 86_400,
            ('D', false) => 86_400,
            ('H', true) => 3600,
            ('M', true) => 60,
            ('S', true) => 1,
            _ => return None,
        };
        let part = current_num.parse::<u64>().ok()?.checked_mul(unit)?;
        seconds = seconds.checked_add(part)?;
        current_num.clear();
    }

    current_num.is_empty().then_some(seconds)
}
