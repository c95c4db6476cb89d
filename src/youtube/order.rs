//! Result ordering accepted by the list endpoints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sort order for search.list and channel uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SearchOrder {
    Date,
    Rating,
    #[default]
    Relevance,
    Title,
    VideoCount,
    ViewCount,
}

impl SearchOrder {
    /// Upstream query value.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOrder::Date => "date",
            SearchOrder::Rating => "rating",
            SearchOrder::Relevance => "relevance",
            SearchOrder::Title => "title",
            SearchOrder::VideoCount => "videoCount",
            SearchOrder::ViewCount => "viewCount",
        }
    }
}

/// Sort order for commentThreads.list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CommentOrder {
    #[default]
    Relevance,
    Time,
}

impl CommentOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentOrder::Relevance => "relevance",
            CommentOrder::Time => "time",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for order in [
            SearchOrder::Date,
            SearchOrder::Rating,
            SearchOrder::Relevance,
            SearchOrder::Title,
            SearchOrder::VideoCount,
            SearchOrder::ViewCount,
        ] {
            let encoded = serde_json::to_value(order).unwrap();
            assert_eq!(encoded, serde_json::Value::from(order.as_str()));
        }
        assert_eq!(
            serde_json::from_str::<CommentOrder>("\"time\"").unwrap(),
            CommentOrder::Time
        );
    }
}
