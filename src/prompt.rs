use std::sync::OnceLock;

use regex::Regex;

use crate::config::{Animation, OutputFormat, TextPosition, TextStyle};

/// Partial configuration extracted from a free-text prompt. `None` means the
/// prompt said nothing recognizable about that field; defaults are applied
/// later, during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptConfig {
    pub text_position: Option<TextPosition>,
    pub text_style: Option<TextStyle>,
    pub animation: Option<Animation>,
    pub format: Option<OutputFormat>,
    pub duration_secs: Option<u32>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Scans the prompt with one independent rule per field. Every rule reads
/// the whole prompt; rules never consume text from each other, so a single
/// phrase may legitimately feed several fields.
pub fn parse_prompt(prompt: &str) -> PromptConfig {
    PromptConfig {
        text_position: parse_text_position(prompt),
        text_style: parse_text_style(prompt),
        animation: parse_animation(prompt),
        format: parse_format(prompt),
        duration_secs: parse_duration_secs(prompt),
        title: parse_title(prompt),
        subtitle: parse_subtitle(prompt),
    }
}

fn parse_text_position(prompt: &str) -> Option<TextPosition> {
    static TOP_RE: OnceLock<Regex> = OnceLock::new();
    static CENTER_RE: OnceLock<Regex> = OnceLock::new();
    let top = TOP_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(top|upper)\b").expect("top position regex should compile")
    });
    let center = CENTER_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(center|middle)\b").expect("center position regex should compile")
    });
    if top.is_match(prompt) {
        Some(TextPosition::Top)
    } else if center.is_match(prompt) {
        Some(TextPosition::Center)
    } else {
        None
    }
}

fn parse_text_style(prompt: &str) -> Option<TextStyle> {
    static MINIMAL_RE: OnceLock<Regex> = OnceLock::new();
    static ELEGANT_RE: OnceLock<Regex> = OnceLock::new();
    let minimal = MINIMAL_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(minimal|clean|simple)\b").expect("minimal style regex should compile")
    });
    let elegant = ELEGANT_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(elegant|fancy|serif)\b").expect("elegant style regex should compile")
    });
    if minimal.is_match(prompt) {
        Some(TextStyle::Minimal)
    } else if elegant.is_match(prompt) {
        Some(TextStyle::Elegant)
    } else {
        None
    }
}

fn parse_animation(prompt: &str) -> Option<Animation> {
    static SLIDE_RE: OnceLock<Regex> = OnceLock::new();
    static ZOOM_RE: OnceLock<Regex> = OnceLock::new();
    static NONE_RE: OnceLock<Regex> = OnceLock::new();
    let slide = SLIDE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(slide|sliding)\b").expect("slide animation regex should compile")
    });
    let zoom = ZOOM_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(zoom|ken burns)\b").expect("zoom animation regex should compile")
    });
    let none = NONE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(no animation|static)\b").expect("static animation regex should compile")
    });
    if slide.is_match(prompt) {
        Some(Animation::Slide)
    } else if zoom.is_match(prompt) {
        Some(Animation::Zoom)
    } else if none.is_match(prompt) {
        Some(Animation::None)
    } else {
        None
    }
}

fn parse_format(prompt: &str) -> Option<OutputFormat> {
    static PORTRAIT_RE: OnceLock<Regex> = OnceLock::new();
    static SQUARE_RE: OnceLock<Regex> = OnceLock::new();
    let portrait = PORTRAIT_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(portrait|vertical|story|stories|tiktok|reel|reels|short)\b")
            .expect("portrait format regex should compile")
    });
    let square = SQUARE_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(square|instagram)\b").expect("square format regex should compile")
    });
    if portrait.is_match(prompt) {
        Some(OutputFormat::Portrait)
    } else if square.is_match(prompt) {
        Some(OutputFormat::Square)
    } else {
        None
    }
}

fn parse_duration_secs(prompt: &str) -> Option<u32> {
    static DURATION_RE: OnceLock<Regex> = OnceLock::new();
    let re = DURATION_RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(?:seconds?|s)\b").expect("duration regex should compile")
    });
    re.captures(prompt)
        .and_then(|capture| capture.get(1))
        .and_then(|value| value.as_str().parse::<u32>().ok())
}

// Quoted text anywhere in the prompt counts as a title, with or without a
// "title:" label; an unquoted label captures up to the next comma, period,
// or line break.
fn parse_title(prompt: &str) -> Option<String> {
    static QUOTED_RE: OnceLock<Regex> = OnceLock::new();
    static LABELED_RE: OnceLock<Regex> = OnceLock::new();
    let quoted = QUOTED_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:title[:\s]+)?["']([^"']+)["']"#)
            .expect("quoted title regex should compile")
    });
    let labeled = LABELED_RE.get_or_init(|| {
        Regex::new(r"(?i)title[:\s]+([^,.\n]+)").expect("labeled title regex should compile")
    });
    quoted
        .captures(prompt)
        .or_else(|| labeled.captures(prompt))
        .and_then(|capture| capture.get(1))
        .map(|value| value.as_str().trim().to_owned())
}

fn parse_subtitle(prompt: &str) -> Option<String> {
    static SUBTITLE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SUBTITLE_RE.get_or_init(|| {
        Regex::new(r#"(?i)subtitle[:\s]+["']?([^"'\n,]+)["']?"#)
            .expect("subtitle regex should compile")
    });
    re.captures(prompt)
        .and_then(|capture| capture.get(1))
        .map(|value| value.as_str().trim().to_owned())
}
