//! YouTube Data API v3 client implementation.
//!
//! Every public operation returns an [`Envelope`]; upstream and decode errors
//! are folded into the failure branch at the method boundary.

use crate::config::Config;
use crate::error::YouTubeError;
use crate::youtube::envelope::{Envelope, Failure};
use crate::youtube::models::{
    ApiChannelItem, ApiCommentThread, ApiPlaylistItem, ApiResponse, ApiSearchItem, ApiVideoItem,
    ChannelDetail, ChannelSearchResults, ChannelSummary, ChannelVideos, Comment, PlaylistVideo,
    VideoComments, VideoDetail, VideoSearchResults, VideoSummary,
};
use crate::youtube::order::{CommentOrder, SearchOrder};
use crate::youtube::transport::{HttpTransport, Params, Transport};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Upstream cap on `maxResults` for search, videos and playlist items.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Upstream cap on `maxResults` for comment threads.
pub const MAX_COMMENT_PAGE_SIZE: u32 = 100;

/// YouTube Data API v3 client.
#[derive(Debug, Clone)]
pub struct YouTubeService<T = HttpTransport> {
    transport: T,
}

impl YouTubeService<HttpTransport> {
    /// Create a new YouTube client from configuration.
    ///
    /// # Arguments
    /// * `config` - Server configuration
    ///
    /// # Returns
    /// * `Result<YouTubeService, YouTubeError>` - New client or error
    ///
    /// # Details
    /// Requires an API key; a blank key yields [`YouTubeError::MissingApiKey`]
    /// before any HTTP client is built.
    pub fn from_config(config: &Config) -> Result<Self, YouTubeError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(YouTubeError::MissingApiKey);
        }

        let transport = HttpTransport::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> YouTubeService<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call a list endpoint and decode its `items`.
    async fn list<I: DeserializeOwned>(
        &self,
        resource: &'static str,
        params: Params,
    ) -> Result<Vec<I>, YouTubeError> {
        let body = self.transport.get(resource, params).await?;
        let response: ApiResponse<I> = serde_json::from_value(body)?;
        Ok(response.items)
    }

    /// Search for videos on YouTube.
    ///
    /// # Arguments
    /// * `query` - Search query string
    /// * `max_results` - Maximum number of videos, clamped to `1..=50`
    /// * `order` - Result ordering
    /// * `region_code` - ISO 3166-1 alpha-2 region hint (e.g. `ES`)
    /// * `language` - ISO 639-1 relevance language (e.g. `es`)
    ///
    /// # Returns
    /// * `Envelope<VideoSearchResults>` - Videos in upstream order, query echoed
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
        order: SearchOrder,
        region_code: Option<&str>,
        language: Option<&str>,
    ) -> Envelope<VideoSearchResults> {
        let result = self
            .try_search_videos(query, max_results, order, region_code, language)
            .await;
        Envelope::from_result(result).with_query(query)
    }

    async fn try_search_videos(
        &self,
        query: &str,
        max_results: u32,
        order: SearchOrder,
        region_code: Option<&str>,
        language: Option<&str>,
    ) -> Result<VideoSearchResults, YouTubeError> {
        let mut params: Params = vec![
            ("q", query.to_string()),
            ("part", "id,snippet".to_string()),
            ("maxResults", clamp_page(max_results, MAX_PAGE_SIZE)),
            ("type", "video".to_string()),
            ("order", order.as_str().to_string()),
        ];
        if let Some(region) = region_code {
            params.push(("regionCode", region.to_string()));
        }
        if let Some(lang) = language {
            params.push(("relevanceLanguage", lang.to_string()));
        }

        let items: Vec<ApiSearchItem> = self.list("search", params).await?;
        let videos = items
            .into_iter()
            .map(VideoSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(VideoSearchResults {
            total_results: videos.len(),
            videos,
        })
    }

    /// Fetch detailed information for a single video.
    ///
    /// # Arguments
    /// * `video_id` - YouTube video ID
    ///
    /// # Returns
    /// * `Envelope<VideoDetail>` - Video record, or "Vídeo no encontrado"
    pub async fn get_video_details(&self, video_id: &str) -> Envelope<VideoDetail> {
        Envelope::from_result(self.try_get_video_details(video_id).await)
    }

    async fn try_get_video_details(&self, video_id: &str) -> Result<VideoDetail, YouTubeError> {
        let params: Params = vec![
            ("part", "snippet,contentDetails,statistics".to_string()),
            ("id", video_id.to_string()),
        ];
        let items: Vec<ApiVideoItem> = self.list("videos", params).await?;

        items
            .into_iter()
            .next()
            .map(VideoDetail::from)
            .ok_or(YouTubeError::VideoNotFound)
    }

    /// Search for channels.
    ///
    /// # Details
    /// Zero matches is a success with an empty list.
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Envelope<ChannelSearchResults> {
        Envelope::from_result(self.try_search_channels(query, max_results).await).with_query(query)
    }

    async fn try_search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<ChannelSearchResults, YouTubeError> {
        let params: Params = vec![
            ("q", query.to_string()),
            ("part", "id,snippet".to_string()),
            ("maxResults", clamp_page(max_results, MAX_PAGE_SIZE)),
            ("type", "channel".to_string()),
        ];

        let items: Vec<ApiSearchItem> = self.list("search", params).await?;
        let channels = items
            .into_iter()
            .map(ChannelSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChannelSearchResults {
            total_results: channels.len(),
            channels,
        })
    }

    /// Fetch detailed information for a channel.
    ///
    /// # Arguments
    /// * `channel_id` - YouTube channel ID
    /// * `include_statistics` - Request and report subscriber/video/view counts
    ///
    /// # Returns
    /// * `Envelope<ChannelDetail>` - Channel record, or "Canal no encontrado"
    pub async fn get_channel_details(
        &self,
        channel_id: &str,
        include_statistics: bool,
    ) -> Envelope<ChannelDetail> {
        Envelope::from_result(
            self.try_get_channel_details(channel_id, include_statistics)
                .await,
        )
    }

    async fn try_get_channel_details(
        &self,
        channel_id: &str,
        include_statistics: bool,
    ) -> Result<ChannelDetail, YouTubeError> {
        let part = if include_statistics {
            "snippet,contentDetails,statistics"
        } else {
            "snippet,contentDetails"
        };
        let params: Params = vec![("part", part.to_string()), ("id", channel_id.to_string())];
        let items: Vec<ApiChannelItem> = self.list("channels", params).await?;

        items
            .into_iter()
            .next()
            .map(|item| ChannelDetail::from_api(item, include_statistics))
            .ok_or(YouTubeError::ChannelNotFound)
    }

    /// Fetch the most recent uploads of a channel.
    ///
    /// # Arguments
    /// * `channel_id` - YouTube channel ID
    /// * `max_results` - Maximum number of videos, clamped to `1..=50`
    /// * `order` - Ordering applied to the page
    ///
    /// # Details
    /// Resolves the uploads playlist through [`Self::get_channel_details`] and
    /// returns its failure untouched. The uploads playlist is newest-first, so
    /// `date` needs no work; `title` is sorted locally; other orders keep the
    /// upload order since playlistItems.list has no sort parameter.
    pub async fn get_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
        order: SearchOrder,
    ) -> Envelope<ChannelVideos> {
        let channel = match self.get_channel_details(channel_id, false).await.into_result() {
            Ok(channel) => channel,
            Err(failure) => return Envelope::from_failure(failure),
        };

        let Some(playlist_id) = channel.uploads_playlist_id else {
            return Envelope::from_result(Err(YouTubeError::UploadsUnavailable));
        };

        Envelope::from_result(
            self.try_list_uploads(channel_id, &playlist_id, max_results, order)
                .await,
        )
    }

    async fn try_list_uploads(
        &self,
        channel_id: &str,
        playlist_id: &str,
        max_results: u32,
        order: SearchOrder,
    ) -> Result<ChannelVideos, YouTubeError> {
        let params: Params = vec![
            ("playlistId", playlist_id.to_string()),
            ("part", "snippet,contentDetails".to_string()),
            ("maxResults", clamp_page(max_results, MAX_PAGE_SIZE)),
        ];
        let items: Vec<ApiPlaylistItem> = self.list("playlistItems", params).await?;
        let mut videos: Vec<PlaylistVideo> = items.into_iter().map(PlaylistVideo::from).collect();

        match order {
            SearchOrder::Date => {}
            SearchOrder::Title => videos.sort_by(|a, b| a.title.cmp(&b.title)),
            other => tracing::debug!(
                order = other.as_str(),
                "uploads playlist cannot be reordered, keeping upload order"
            ),
        }

        Ok(ChannelVideos {
            channel_id: channel_id.to_string(),
            total_results: videos.len(),
            videos,
        })
    }

    /// Fetch top-level comments of a video.
    ///
    /// # Details
    /// Upstream answers 403 when comments are turned off; that case is
    /// reported as "Los comentarios están deshabilitados para este vídeo".
    pub async fn get_video_comments(
        &self,
        video_id: &str,
        max_results: u32,
        order: CommentOrder,
    ) -> Envelope<VideoComments> {
        Envelope::from_result(
            self.try_get_video_comments(video_id, max_results, order)
                .await,
        )
    }

    async fn try_get_video_comments(
        &self,
        video_id: &str,
        max_results: u32,
        order: CommentOrder,
    ) -> Result<VideoComments, YouTubeError> {
        let params: Params = vec![
            ("part", "snippet".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", clamp_page(max_results, MAX_COMMENT_PAGE_SIZE)),
            ("order", order.as_str().to_string()),
            ("textFormat", "plainText".to_string()),
        ];

        let items: Vec<ApiCommentThread> = self
            .list("commentThreads", params)
            .await
            .map_err(|err| match err {
                YouTubeError::Api { status: 403, .. } => YouTubeError::CommentsDisabled,
                other => other,
            })?;
        let comments: Vec<Comment> = items.into_iter().map(Comment::from).collect();

        Ok(VideoComments {
            video_id: video_id.to_string(),
            total_results: comments.len(),
            comments,
        })
    }
}

fn clamp_page(requested: u32, cap: u32) -> String {
    requested.clamp(1, cap).to_string()
}

/// The API client as validated once at start-up.
///
/// Operations match on this instead of re-checking the credential.
#[derive(Debug, Clone)]
pub enum ApiAccess<T = HttpTransport> {
    Ready(YouTubeService<T>),
    /// Fixed failure returned by every network-backed operation
    Unavailable(Failure),
}

impl ApiAccess<HttpTransport> {
    pub fn from_config(config: &Config) -> Self {
        match YouTubeService::from_config(config) {
            Ok(service) => ApiAccess::Ready(service),
            Err(err) => {
                tracing::warn!("YouTube API unavailable: {}", err);
                ApiAccess::Unavailable(Failure::from(&err))
            }
        }
    }
}

impl<T> ApiAccess<T> {
    pub fn service(&self) -> Result<&YouTubeService<T>, &Failure> {
        match self {
            ApiAccess::Ready(service) => Ok(service),
            ApiAccess::Unavailable(failure) => Err(failure),
        }
    }
}
