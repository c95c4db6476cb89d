//! Tools that forward straight to the YouTube client.

use crate::tools::ToolError;
use crate::tools::params::{
    ChannelDetailsParams, ChannelVideosParams, SearchChannelsParams, SearchVideosParams,
    VideoCommentsParams, VideoIdParams, require_non_empty,
};
use crate::youtube::models::{
    ChannelDetail, ChannelSearchResults, ChannelVideos, VideoComments, VideoDetail,
    VideoSearchResults,
};
use crate::youtube::{ApiAccess, Envelope, Transport};

pub async fn search_videos<T: Transport>(
    access: &ApiAccess<T>,
    params: SearchVideosParams,
) -> Result<Envelope<VideoSearchResults>, ToolError> {
    require_non_empty("topic", &params.topic)?;

    Ok(match access.service() {
        Ok(service) => {
            service
                .search_videos(
                    &params.topic,
                    params.max_results,
                    params.order,
                    params.region_code.as_deref(),
                    params.language.as_deref(),
                )
                .await
        }
        Err(failure) => Envelope::from_failure(failure.clone()).with_query(&params.topic),
    })
}

pub async fn get_video_details<T: Transport>(
    access: &ApiAccess<T>,
    params: VideoIdParams,
) -> Result<Envelope<VideoDetail>, ToolError> {
    require_non_empty("video_id", &params.video_id)?;

    Ok(match access.service() {
        Ok(service) => service.get_video_details(&params.video_id).await,
        Err(failure) => Envelope::from_failure(failure.clone()),
    })
}

pub async fn search_channels<T: Transport>(
    access: &ApiAccess<T>,
    params: SearchChannelsParams,
) -> Result<Envelope<ChannelSearchResults>, ToolError> {
    require_non_empty("query", &params.query)?;

    Ok(match access.service() {
        Ok(service) => {
            service
                .search_channels(&params.query, params.max_results)
                .await
        }
        Err(failure) => Envelope::from_failure(failure.clone()).with_query(&params.query),
    })
}

pub async fn get_channel_details<T: Transport>(
    access: &ApiAccess<T>,
    params: ChannelDetailsParams,
) -> Result<Envelope<ChannelDetail>, ToolError> {
    require_non_empty("channel_id", &params.channel_id)?;

    Ok(match access.service() {
        Ok(service) => {
            service
                .get_channel_details(&params.channel_id, params.include_statistics)
                .await
        }
        Err(failure) => Envelope::from_failure(failure.clone()),
    })
}

pub async fn get_channel_videos<T: Transport>(
    access: &ApiAccess<T>,
    params: ChannelVideosParams,
) -> Result<Envelope<ChannelVideos>, ToolError> {
    require_non_empty("channel_id", &params.channel_id)?;

    Ok(match access.service() {
        Ok(service) => {
            service
                .get_channel_videos(&params.channel_id, params.max_results, params.order)
                .await
        }
        Err(failure) => Envelope::from_failure(failure.clone()),
    })
}

pub async fn get_video_comments<T: Transport>(
    access: &ApiAccess<T>,
    params: VideoCommentsParams,
) -> Result<Envelope<VideoComments>, ToolError> {
    require_non_empty("video_id", &params.video_id)?;

    Ok(match access.service() {
        Ok(service) => {
            service
                .get_video_comments(&params.video_id, params.max_results, params.order)
                .await
        }
        Err(failure) => Envelope::from_failure(failure.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::transport::testing::StubTransport;
    use crate::youtube::{Failure, SearchOrder, YouTubeService};
    use crate::error::YouTubeError;
    use serde_json::json;

    fn unavailable() -> ApiAccess<StubTransport> {
        ApiAccess::Unavailable(Failure::from(&YouTubeError::MissingApiKey))
    }

    #[tokio::test]
    async fn test_unconfigured_search_returns_config_failure() {
        let env = search_videos(
            &unavailable(),
            SearchVideosParams {
                topic: "rust".to_string(),
                max_results: 5,
                order: SearchOrder::Relevance,
                region_code: None,
                language: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({
                "success": false,
                "error": "YOUTUBE_API_KEY not set. Please set the environment variable.",
                "instructions": "Get your API key from https://console.cloud.google.com/apis/credentials",
                "query": "rust"
            })
        );
    }

    #[tokio::test]
    async fn test_unconfigured_never_touches_network() {
        let access = unavailable();
        let comments = get_video_comments(
            &access,
            VideoCommentsParams {
                video_id: "v".to_string(),
                max_results: 20,
                order: Default::default(),
            },
        )
        .await
        .unwrap();
        assert!(!comments.is_success());

        let details = get_channel_details(
            &access,
            ChannelDetailsParams {
                channel_id: "UC1".to_string(),
                include_statistics: true,
            },
        )
        .await
        .unwrap();
        assert!(!details.is_success());
    }

    #[tokio::test]
    async fn test_blank_video_id_is_rejected() {
        let access = ApiAccess::Ready(YouTubeService::with_transport(StubTransport::new()));
        let err = get_video_details(
            &access,
            VideoIdParams {
                video_id: " ".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_search_channels_delegates() {
        let access = ApiAccess::Ready(YouTubeService::with_transport(
            StubTransport::new().respond("search", json!({ "items": [] })),
        ));
        let env = search_channels(
            &access,
            SearchChannelsParams {
                query: "nobody".to_string(),
                max_results: 5,
            },
        )
        .await
        .unwrap();
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": true, "query": "nobody", "total_results": 0, "channels": [] })
        );
    }
}
