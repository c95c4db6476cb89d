//! Success/failure wrapper returned by every client operation.
//!
//! Serializes to `{"success": true, "query"?, ...payload}` or
//! `{"success": false, "error", "instructions"?, "query"?}`.

use crate::error::YouTubeError;
use serde::Serialize;

/// Outcome of a client operation, reported as data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success(Success<T>),
    Failure(Failure),
}

#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl Failure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            instructions: None,
            query: None,
        }
    }
}

impl From<&YouTubeError> for Failure {
    fn from(err: &YouTubeError) -> Self {
        Self {
            instructions: err.instructions(),
            ..Failure::new(err.to_string())
        }
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success(Success {
            success: true,
            query: None,
            data,
        })
    }

    pub fn from_failure(failure: Failure) -> Self {
        Envelope::Failure(failure)
    }

    /// Wrap an operation result, logging failures.
    pub fn from_result(result: Result<T, YouTubeError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => {
                tracing::warn!("YouTube request failed: {}", err);
                Self::from_failure(Failure::from(&err))
            }
        }
    }

    /// Echo the caller's query on either branch.
    pub fn with_query(mut self, query: &str) -> Self {
        match &mut self {
            Envelope::Success(s) => s.query = Some(query.to_string()),
            Envelope::Failure(f) => f.query = Some(query.to_string()),
        }
        self
    }

    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    /// Payload of a successful envelope.
    #[cfg(test)]
    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success(s) => Some(&s.data),
            Envelope::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(f) => Some(f),
        }
    }

    /// Split into payload or failure so a failure can be forwarded with `?`.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Envelope::Success(s) => Ok(s.data),
            Envelope::Failure(f) => Err(f),
        }
    }
}

impl<T> From<Result<T, Failure>> for Envelope<T> {
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(data) => Envelope::success(data),
            Err(failure) => Envelope::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        total_results: usize,
    }

    #[test]
    fn test_success_flattens_payload() {
        let env = Envelope::success(Payload { total_results: 2 }).with_query("rust");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": true, "query": "rust", "total_results": 2 })
        );
    }

    #[test]
    fn test_failure_shape() {
        let env: Envelope<Payload> = Envelope::from_result(Err(YouTubeError::VideoNotFound));
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": false, "error": "Vídeo no encontrado" })
        );
    }

    #[test]
    fn test_missing_key_failure_carries_instructions() {
        let env: Envelope<Payload> =
            Envelope::from_result(Err(YouTubeError::MissingApiKey)).with_query("q");
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["query"], json!("q"));
        assert_eq!(
            value["instructions"],
            json!("Get your API key from https://console.cloud.google.com/apis/credentials")
        );
    }
}
