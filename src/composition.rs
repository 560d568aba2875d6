use serde::Serialize;

use crate::config::OutputFormat;

/// Compositions registered in the render project. Ids must match the
/// project's composition registry exactly; the render engine resolves the
/// template by this string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompositionId {
    MediaVideo,
    MediaVideoShort,
    MediaVideoSquare,
}

impl CompositionId {
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Portrait => Self::MediaVideoShort,
            OutputFormat::Square => Self::MediaVideoSquare,
            OutputFormat::Landscape => Self::MediaVideo,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MediaVideo => "MediaVideo",
            Self::MediaVideoShort => "MediaVideoShort",
            Self::MediaVideoSquare => "MediaVideoSquare",
        }
    }

    /// Canvas size the composition is registered with.
    pub fn dimensions_px(self) -> (u32, u32) {
        match self {
            Self::MediaVideo => (1920, 1080),
            Self::MediaVideoShort => (1080, 1920),
            Self::MediaVideoSquare => (1080, 1080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CompositionId;
    use crate::config::OutputFormat;

    #[test]
    fn format_selects_matching_composition() {
        assert_eq!(
            CompositionId::for_format(OutputFormat::Landscape),
            CompositionId::MediaVideo
        );
        assert_eq!(
            CompositionId::for_format(OutputFormat::Portrait),
            CompositionId::MediaVideoShort
        );
        assert_eq!(
            CompositionId::for_format(OutputFormat::Square),
            CompositionId::MediaVideoSquare
        );
    }

    #[test]
    fn ids_and_dimensions_match_the_registry() {
        assert_eq!(CompositionId::MediaVideo.as_str(), "MediaVideo");
        assert_eq!(CompositionId::MediaVideo.dimensions_px(), (1920, 1080));
        assert_eq!(CompositionId::MediaVideoShort.dimensions_px(), (1080, 1920));
        assert_eq!(CompositionId::MediaVideoSquare.dimensions_px(), (1080, 1080));
    }
}
