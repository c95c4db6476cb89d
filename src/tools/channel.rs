//! Channel lookup that pauses to ask the caller what to include.

use crate::tools::ToolError;
use crate::tools::caller::{CallerPeer, Elicitation};
use crate::tools::params::{ChannelInfoRequest, SearchChannelParams, require_non_empty};
use crate::youtube::models::{ChannelDetail, PlaylistVideo};
use crate::youtube::{ApiAccess, Envelope, Failure, SearchOrder, Transport, YouTubeService};
use rmcp::model::{BooleanSchema, ElicitationSchema, PrimitiveSchema};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DECLINED_MESSAGE: &str = "Information not provided";
pub const CANCELLED_MESSAGE: &str = "Operation cancelled";
const NO_CHANNELS_MESSAGE: &str = "No channels found matching that name";
const PREFERENCE_QUESTION: &str = "Do you want the channel's latest videos included?";
/// Uploads fetched when the caller asks for them.
const LATEST_VIDEOS: u32 = 5;

/// The caller's answer, reduced to what the lookup needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPreference {
    Accepted { include_latest_videos: bool },
    Declined,
    Cancelled,
}

impl From<Elicitation> for ChannelPreference {
    fn from(answer: Elicitation) -> Self {
        match answer {
            Elicitation::Accept(content) => {
                // Missing or malformed form data falls back to the form defaults
                let form = content
                    .and_then(|v| serde_json::from_value::<ChannelInfoRequest>(v).ok())
                    .unwrap_or(ChannelInfoRequest {
                        include_latest_videos: true,
                    });
                ChannelPreference::Accepted {
                    include_latest_videos: form.include_latest_videos,
                }
            }
            Elicitation::Decline => ChannelPreference::Declined,
            Elicitation::Cancel => ChannelPreference::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    Accepted,
    Declined,
    Cancelled,
}

/// Result of `search_youtube_channel`, the same shape on every path.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelLookup {
    pub outcome: LookupOutcome,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_videos: Option<Vec<PlaylistVideo>>,
}

impl ChannelLookup {
    fn without_channel(outcome: LookupOutcome, message: &str) -> Self {
        Self {
            outcome,
            message: message.to_string(),
            channel: None,
            latest_videos: None,
        }
    }
}

/// Form shown to the caller.
fn preference_schema() -> ElicitationSchema {
    let include_latest_videos = BooleanSchema::new()
        .title("Include latest videos")
        .description("Also fetch the channel's most recent uploads")
        .with_default(true);
    ElicitationSchema::new(BTreeMap::from([(
        "include_latest_videos".to_string(),
        PrimitiveSchema::Boolean(include_latest_videos),
    )]))
}

/// Look up a channel by name after confirming with the caller.
///
/// # Arguments
/// * `access` - Validated API client
/// * `peer` - Caller connection used for the confirmation pause
/// * `params` - Tool arguments
///
/// # Returns
/// * `Result<Envelope<ChannelLookup>, ToolError>` - Lookup result with the name echoed
///
/// # Details
/// Suspends until the caller answers. On accept: top channel match, its
/// details with statistics, and optionally its latest uploads. Decline and
/// cancel stop before any network call.
pub async fn search_youtube_channel<T: Transport, P: CallerPeer>(
    access: &ApiAccess<T>,
    peer: &P,
    params: SearchChannelParams,
) -> Result<Envelope<ChannelLookup>, ToolError> {
    require_non_empty("channel_name", &params.channel_name)?;
    let name = params.channel_name.as_str();

    let preference = match peer
        .elicit(PREFERENCE_QUESTION.to_string(), preference_schema())
        .await
    {
        Ok(answer) => ChannelPreference::from(answer),
        Err(e) => {
            tracing::warn!("Elicitation failed: {:#}", e);
            let failure = Failure::new(format!("Could not ask for channel preferences: {}", e));
            return Ok(Envelope::from_failure(failure).with_query(name));
        }
    };
    tracing::debug!(?preference, channel = name, "channel preference received");

    let include_latest_videos = match preference {
        ChannelPreference::Accepted {
            include_latest_videos,
        } => include_latest_videos,
        ChannelPreference::Declined => {
            let lookup = ChannelLookup::without_channel(LookupOutcome::Declined, DECLINED_MESSAGE);
            return Ok(Envelope::success(lookup).with_query(name));
        }
        ChannelPreference::Cancelled => {
            let lookup =
                ChannelLookup::without_channel(LookupOutcome::Cancelled, CANCELLED_MESSAGE);
            return Ok(Envelope::success(lookup).with_query(name));
        }
    };

    let envelope = match access.service() {
        Ok(service) => Envelope::from(lookup_channel(service, name, include_latest_videos).await),
        Err(failure) => Envelope::from_failure(failure.clone()),
    };
    Ok(envelope.with_query(name))
}

async fn lookup_channel<T: Transport>(
    service: &YouTubeService<T>,
    name: &str,
    include_latest_videos: bool,
) -> Result<ChannelLookup, Failure> {
    let top = service
        .search_channels(name, 1)
        .await
        .into_result()?
        .channels
        .into_iter()
        .next()
        .ok_or_else(|| Failure::new(NO_CHANNELS_MESSAGE))?;

    let channel = service
        .get_channel_details(&top.channel_id, true)
        .await
        .into_result()?;

    let latest_videos = if include_latest_videos {
        let uploads = service
            .get_channel_videos(&top.channel_id, LATEST_VIDEOS, SearchOrder::Date)
            .await
            .into_result()?;
        Some(uploads.videos)
    } else {
        None
    };

    Ok(ChannelLookup {
        outcome: LookupOutcome::Accepted,
        message: format!("Found channel {}", channel.title),
        channel: Some(channel),
        latest_videos,
    })
}
