//! Configuration management for the YouTube MCP server.
//!
//! Loads settings from a JSONC file, then layers the `YOUTUBE_API_KEY`
//! environment variable (optionally read from a `.env` file) on top.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Server configuration.
///
/// Contains the API credential, upstream endpoint and server preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API v3 key
    pub api_key: String,
    /// Base URL for YouTube Data API
    pub base_url: String,
    /// Directory holding tool and server icons
    pub icons_dir: PathBuf,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Listen address for the streamable HTTP transport
    pub http_bind: String,
    /// Model hints forwarded with sampling requests, most preferred first
    pub sampling_models: Vec<String>,
    /// Sampling temperature for title generation
    pub sampling_temperature: f32,
    /// Token cap for title generation
    pub sampling_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            icons_dir: PathBuf::from("assets").join("icons"),
            request_timeout_secs: 30,
            http_bind: "127.0.0.1:8000".to_string(),
            sampling_models: vec![
                "claude-opus-4-5".to_string(),
                "claude-sonnet-4-5".to_string(),
            ],
            sampling_temperature: 0.7,
            sampling_max_tokens: 200,
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/yt-mcp/config.jsonc`
    /// 3. `~/.config/yt-mcp/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_jsonc_comments(&content))
            .with_context(|| "Failed to deserialize config")?;

        Ok(config)
    }

    /// Overlay the API key from the process environment.
    ///
    /// # Arguments
    /// * `value` - Value of `YOUTUBE_API_KEY`, if set
    ///
    /// # Details
    /// A non-blank environment value wins over whatever the file said.
    pub fn apply_env_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.map(|v| v.trim().to_string())
            && !key.is_empty()
        {
            self.api_key = key;
        }
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to config file or error
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("yt-mcp").join("config.jsonc"))
    }
}

/// Strip `//` line comments that sit outside string literals.
fn strip_jsonc_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| match comment_start(line) {
            Some(pos) => line[..pos].trim_end(),
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the first `//` that is not inside a string.
fn comment_start(line: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    let mut prev_slash = false;

    for (i, c) in line.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '/' if prev_slash => return Some(i - 1),
            _ => {}
        }
        prev_slash = c == '/';
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, "https://www.googleapis.com/youtube/v3");
        assert_eq!(config.http_bind, "127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load(Some(&temp_dir.path().join("absent.jsonc"))).unwrap();
        assert!(loaded.api_key.is_empty());
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // API key for YouTube Data API v3
            "api_key": "test_key",
            "base_url": "http://localhost:9000/youtube/v3", // local mock
            "request_timeout_secs": 5
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.api_key, "test_key");
        assert_eq!(loaded.base_url, "http://localhost:9000/youtube/v3");
        assert_eq!(loaded.request_timeout_secs, 5);
        assert_eq!(loaded.sampling_max_tokens, 200);
    }

    #[test]
    fn test_comment_markers_inside_strings_are_kept() {
        let stripped = strip_jsonc_comments(
            r#"{ "a": "say \"//hi\"", "b": "x" } // trailing
// whole line
{ "c": "http://h/p" }"#,
        );
        assert_eq!(
            stripped,
            "{ \"a\": \"say \\\"//hi\\\"\", \"b\": \"x\" }\n\n{ \"c\": \"http://h/p\" }"
        );
    }

    #[test]
    fn test_example_config_parses() {
        let example = include_str!("../config.jsonc.example");
        let loaded: Config = serde_json::from_str(&strip_jsonc_comments(example)).unwrap();
        let defaults = Config::default();
        assert_eq!(loaded.base_url, defaults.base_url);
        assert_eq!(loaded.http_bind, defaults.http_bind);
        assert_eq!(loaded.sampling_models, defaults.sampling_models);
    }

    #[test]
    fn test_config_invalid_json_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");
        fs::write(&config_path, "{ not json").unwrap();
        assert!(Config::load(Some(&config_path)).is_err());
    }

    #[test]
    fn test_env_api_key_overrides_file() {
        let mut config = Config {
            api_key: "from_file".to_string(),
            ..Config::default()
        };
        config.apply_env_api_key(Some("  from_env ".to_string()));
        assert_eq!(config.api_key, "from_env");

        config.apply_env_api_key(Some("   ".to_string()));
        assert_eq!(config.api_key, "from_env");

        config.apply_env_api_key(None);
        assert_eq!(config.api_key, "from_env");
    }
}
