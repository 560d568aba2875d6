use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::error::CodedError;
use crate::prompt::PromptConfig;

/// All compositions in the render project run at this rate.
pub const FPS: u32 = 30;
pub const DEFAULT_DURATION_SECS: u32 = 5;

/// Extensions treated as video; anything else is handled as a still image.
const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mov", "webm", "avi", "mkv", "m4v"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Self::Video
        } else {
            Self::Image
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    Center,
    Bottom,
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::Bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Minimal,
    Bold,
    Elegant,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::Bold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    Fade,
    Slide,
    Zoom,
    None,
}

impl Default for Animation {
    fn default() -> Self {
        Self::Fade
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Landscape,
    Portrait,
    Square,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Landscape
    }
}

/// Values passed explicitly on the command line. They win over anything
/// parsed out of the prompt.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Fully resolved parameters for one render. Every field is defined once
/// `resolve_config` returns; nothing downstream applies further defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// File name the media will be staged under (basename of the source).
    pub media_path: String,
    pub media_type: MediaType,
    pub title: String,
    pub subtitle: String,
    pub text_position: TextPosition,
    pub text_style: TextStyle,
    pub animation: Animation,
    pub format: OutputFormat,
    pub duration_secs: u32,
}

impl RenderConfig {
    pub fn duration_in_frames(&self) -> u32 {
        self.duration_secs.saturating_mul(FPS)
    }
}

/// Merges prompt-derived values with explicit overrides and defaults.
/// Precedence per field: override > parsed > default.
pub fn resolve_config(
    media: &Path,
    parsed: PromptConfig,
    overrides: Overrides,
) -> Result<RenderConfig> {
    if !media.is_file() {
        return Err(anyhow!(CodedError::validation(
            "MEDIA_NOT_FOUND",
            format!("media file not found: '{}'", media.display()),
        )));
    }
    let media_file = media
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            anyhow!(CodedError::validation(
                "INVALID_CONFIG",
                format!("media path has no usable file name: '{}'", media.display()),
            ))
        })?
        .to_owned();

    let config = RenderConfig {
        media_path: media_file,
        media_type: MediaType::from_path(media),
        title: overrides.title.or(parsed.title).unwrap_or_default(),
        subtitle: overrides.subtitle.or(parsed.subtitle).unwrap_or_default(),
        text_position: parsed.text_position.unwrap_or_default(),
        text_style: parsed.text_style.unwrap_or_default(),
        animation: parsed.animation.unwrap_or_default(),
        format: parsed.format.unwrap_or_default(),
        // A parsed 0 counts as unresolved; the default applies.
        duration_secs: parsed
            .duration_secs
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_DURATION_SECS),
    };

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::tempdir;

    use super::{
        resolve_config, Animation, MediaType, OutputFormat, Overrides, RenderConfig, TextPosition,
        TextStyle,
    };
    use crate::error::find_coded_error;
    use crate::prompt::PromptConfig;

    fn touch(path: &Path) {
        fs::write(path, b"media bytes").expect("fixture file should write");
    }

    #[test]
    fn media_type_is_derived_from_extension() {
        assert_eq!(MediaType::from_path(Path::new("clip.mp4")), MediaType::Video);
        assert_eq!(MediaType::from_path(Path::new("CLIP.MOV")), MediaType::Video);
        assert_eq!(MediaType::from_path(Path::new("a/b/loop.m4v")), MediaType::Video);
        assert_eq!(MediaType::from_path(Path::new("photo.jpg")), MediaType::Image);
        assert_eq!(MediaType::from_path(Path::new("scan.tiff")), MediaType::Image);
        assert_eq!(MediaType::from_path(Path::new("noext")), MediaType::Image);
        // A bare ".mp4" has no stem, so there is no extension to inspect.
        assert_eq!(MediaType::from_path(Path::new(".mp4")), MediaType::Image);
    }

    #[test]
    fn unresolved_fields_fall_back_to_defaults() {
        let dir = tempdir().expect("tempdir should create");
        let media = dir.path().join("photo.jpg");
        touch(&media);

        let config = resolve_config(&media, PromptConfig::default(), Overrides::default())
            .expect("resolve should succeed");
        assert_eq!(
            config,
            RenderConfig {
                media_path: "photo.jpg".to_owned(),
                media_type: MediaType::Image,
                title: String::new(),
                subtitle: String::new(),
                text_position: TextPosition::Bottom,
                text_style: TextStyle::Bold,
                animation: Animation::Fade,
                format: OutputFormat::Landscape,
                duration_secs: 5,
            }
        );
        assert_eq!(config.duration_in_frames(), 150);
    }

    #[test]
    fn explicit_overrides_beat_prompt_values() {
        let dir = tempdir().expect("tempdir should create");
        let media = dir.path().join("clip.webm");
        touch(&media);

        let parsed = PromptConfig {
            title: Some("From Prompt".to_owned()),
            subtitle: Some("Prompt Sub".to_owned()),
            ..PromptConfig::default()
        };
        let overrides = Overrides {
            title: Some("From Flag".to_owned()),
            subtitle: None,
        };
        let config =
            resolve_config(&media, parsed, overrides).expect("resolve should succeed");
        assert_eq!(config.title, "From Flag");
        assert_eq!(config.subtitle, "Prompt Sub");
        assert_eq!(config.media_type, MediaType::Video);
    }

    #[test]
    fn empty_string_override_still_wins() {
        let dir = tempdir().expect("tempdir should create");
        let media = dir.path().join("photo.png");
        touch(&media);

        let parsed = PromptConfig {
            title: Some("From Prompt".to_owned()),
            ..PromptConfig::default()
        };
        let overrides = Overrides {
            title: Some(String::new()),
            subtitle: None,
        };
        let config =
            resolve_config(&media, parsed, overrides).expect("resolve should succeed");
        assert_eq!(config.title, "");
    }

    #[test]
    fn missing_media_is_a_coded_error() {
        let dir = tempdir().expect("tempdir should create");
        let media = dir.path().join("nope.jpg");

        let error = resolve_config(&media, PromptConfig::default(), Overrides::default())
            .expect_err("resolve should fail");
        let coded = find_coded_error(&error).expect("error should carry a code");
        assert_eq!(coded.code, "MEDIA_NOT_FOUND");
    }

    #[test]
    fn directory_media_is_rejected() {
        let dir = tempdir().expect("tempdir should create");

        let error = resolve_config(dir.path(), PromptConfig::default(), Overrides::default())
            .expect_err("resolve should fail");
        let coded = find_coded_error(&error).expect("error should carry a code");
        assert_eq!(coded.code, "MEDIA_NOT_FOUND");
    }

    #[test]
    fn zero_duration_falls_back_to_default() {
        let dir = tempdir().expect("tempdir should create");
        let media = dir.path().join("photo.jpg");
        touch(&media);

        let parsed = PromptConfig {
            duration_secs: Some(0),
            ..PromptConfig::default()
        };
        let config =
            resolve_config(&media, parsed, Overrides::default()).expect("resolve should succeed");
        assert_eq!(config.duration_secs, 5);
        assert_eq!(config.duration_in_frames(), 150);
    }
}
