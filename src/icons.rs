//! Icon loading for the server and its tools.
//!
//! Icons are read from disk and inlined as base64 data URIs. They are purely
//! decorative: a missing file logs a warning and yields no icon.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rmcp::model::Icon;
use std::fs;
use std::path::Path;

/// Load a single icon.
///
/// # Arguments
/// * `icons_dir` - Directory holding the icon files
/// * `filename` - File name inside `icons_dir` (e.g. `youtube.png`)
/// * `mime_type` - MIME type written into the data URI
/// * `sizes` - Advertised sizes (e.g. `["64x64"]`)
///
/// # Returns
/// * `Option<Icon>` - The icon with a `data:<mime>;base64,<payload>` source, or `None` if it could not be read
pub fn load_icon(
    icons_dir: &Path,
    filename: &str,
    mime_type: &str,
    sizes: &[&str],
) -> Option<Icon> {
    match read_icon(icons_dir, filename, mime_type, sizes) {
        Ok(icon) => {
            tracing::debug!("Icon loaded from {}", icons_dir.join(filename).display());
            Some(icon)
        }
        Err(e) => {
            tracing::warn!("Could not load icon '{}': {:#}", filename, e);
            None
        }
    }
}

fn read_icon(
    icons_dir: &Path,
    filename: &str,
    mime_type: &str,
    sizes: &[&str],
) -> Result<Icon> {
    let path = icons_dir.join(filename);
    let bytes = fs::read(&path)
        .with_context(|| format!("Failed to read icon file: {}", path.display()))?;

    Ok(Icon {
        src: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        mime_type: Some(mime_type.to_string()),
        sizes: Some(sizes.iter().map(|s| s.to_string()).collect()),
    })
}

/// Load a 64x64 PNG icon as a list ready to attach to a tool.
///
/// Returns `[icon]` on success and `[]` otherwise.
pub fn icon_or_empty(icons_dir: &Path, filename: &str) -> Vec<Icon> {
    load_icon(icons_dir, filename, "image/png", &["64x64"])
        .into_iter()
        .collect()
}

/// Load several PNG icons, keeping only those that succeed.
pub fn load_icons(icons_dir: &Path, filenames: &[&str]) -> Vec<Icon> {
    filenames
        .iter()
        .flat_map(|name| icon_or_empty(icons_dir, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_icon_encodes_data_uri() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("youtube.png"), b"\x89PNG").unwrap();

        let icon = load_icon(temp_dir.path(), "youtube.png", "image/png", &["64x64"]).unwrap();
        assert_eq!(icon.src, "data:image/png;base64,iVBORw==");
        assert_eq!(icon.mime_type.as_deref(), Some("image/png"));
        assert_eq!(icon.sizes, Some(vec!["64x64".to_string()]));
    }

    #[test]
    fn test_missing_icon_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_icon(temp_dir.path(), "nope.png", "image/png", &[]).is_none());
        assert!(icon_or_empty(temp_dir.path(), "nope.png").is_empty());
    }

    #[test]
    fn test_load_icons_skips_failures() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.png"), b"a").unwrap();
        fs::write(temp_dir.path().join("c.png"), b"c").unwrap();

        let icons = load_icons(temp_dir.path(), &["a.png", "b.png", "c.png"]);
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[1].src, "data:image/png;base64,Yw==");
    }

    #[test]
    fn test_icon_wire_form() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("youtube.png"), b"\x89PNG").unwrap();
        let icon = icon_or_empty(temp_dir.path(), "youtube.png").remove(0);
        let value = serde_json::to_value(&icon).unwrap();
        assert_eq!(value["mimeType"], "image/png");
        assert_eq!(value["sizes"][0], "64x64");
    }
}
