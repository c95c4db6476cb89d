//! Error types for YouTube Data API access.
//!
//! Every variant renders the message that ends up in a failure envelope, so
//! callers never see a raw error type.

use thiserror::Error;

/// Where operators can issue a YouTube Data API key.
pub const CREDENTIALS_URL: &str = "https://console.cloud.google.com/apis/credentials";

/// Errors raised while talking to the YouTube Data API.
#[derive(Error, Debug)]
pub enum YouTubeError {
    /// No API key configured
    #[error("YOUTUBE_API_KEY not set. Please set the environment variable.")]
    MissingApiKey,

    /// Upstream answered with a non-2xx status
    #[error("Error de API de YouTube: {status} - {body}")]
    Api { status: u16, body: String },

    /// Video id matched no upstream item
    #[error("Vídeo no encontrado")]
    VideoNotFound,

    /// Channel id matched no upstream item
    #[error("Canal no encontrado")]
    ChannelNotFound,

    /// Channel exists but exposes no uploads playlist
    #[error("No se pudo obtener la playlist de vídeos del canal")]
    UploadsUnavailable,

    /// Upstream refused the comment listing (403)
    #[error("Los comentarios están deshabilitados para este vídeo")]
    CommentsDisabled,

    /// HTTP client failure (connect, timeout, body read)
    #[error("Error inesperado: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Error inesperado: {0}")]
    Decode(#[from] serde_json::Error),

    /// Anything else
    #[error("Error inesperado: {0}")]
    Other(String),
}

impl YouTubeError {
    /// Operator guidance attached to the failure envelope, if any.
    pub fn instructions(&self) -> Option<String> {
        match self {
            YouTubeError::MissingApiKey => {
                Some(format!("Get your API key from {}", CREDENTIALS_URL))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = YouTubeError::Api {
            status: 400,
            body: "{\"error\":\"bad\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error de API de YouTube: 400 - {\"error\":\"bad\"}"
        );
    }

    #[test]
    fn test_only_missing_key_has_instructions() {
        assert_eq!(
            YouTubeError::MissingApiKey.instructions().as_deref(),
            Some("Get your API key from https://console.cloud.google.com/apis/credentials")
        );
        assert!(YouTubeError::VideoNotFound.instructions().is_none());
        assert!(YouTubeError::Other("boom".into()).instructions().is_none());
    }

    #[test]
    fn test_decode_error_is_unexpected() {
        let err: YouTubeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Error inesperado: "));
    }
}
