use std::fmt;
use std::str::FromStr;

/// Stability style presets offered in the prompt form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Enhance,
    Anime,
    Photographic,
    DigitalArt,
    ComicBook,
    FantasyArt,
    LineArt,
    AnalogFilm,
    NeonPunk,
    Isometric,
    LowPoly,
    Origami,
    ModelingCompound,
    Cinematic,
    Model3d,
    PixelArt,
    TileTexture,
}

impl Style {
    pub const ALL: [Style; 17] = [
        Style::Enhance,
        Style::Anime,
        Style::Photographic,
        Style::DigitalArt,
        Style::ComicBook,
        Style::FantasyArt,
        Style::LineArt,
        Style::AnalogFilm,
        Style::NeonPunk,
        Style::Isometric,
        Style::LowPoly,
        Style::Origami,
        Style::ModelingCompound,
        Style::Cinematic,
        Style::Model3d,
        Style::PixelArt,
        Style::TileTexture,
    ];

    /// Preset name sent to the API
    pub fn value(&self) -> &'static str {
        match self {
            Style::Enhance => "enhance",
            Style::Anime => "anime",
            Style::Photographic => "photographic",
            Style::DigitalArt => "digital-art",
            Style::ComicBook => "comic-book",
            Style::FantasyArt => "fantasy-art",
            Style::LineArt => "line-art",
            Style::AnalogFilm => "analog-film",
            Style::NeonPunk => "neon-punk",
            Style::Isometric => "isometric",
            Style::LowPoly => "low-poly",
            Style::Origami => "origami",
            Style::ModelingCompound => "modeling-compound",
            Style::Cinematic => "cinematic",
            Style::Model3d => "3d-model",
            Style::PixelArt => "pixel-art",
            Style::TileTexture => "tile-texture",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Style::Enhance => "Enhance",
            Style::Anime => "Anime",
            Style::Photographic => "Photographic",
            Style::DigitalArt => "Digital Art",
            Style::ComicBook => "Comic Book",
            Style::FantasyArt => "Fantasy Art",
            Style::LineArt => "Line Art",
            Style::AnalogFilm => "Analog Film",
            Style::NeonPunk => "Neon Punk",
            Style::Isometric => "Isometric",
            Style::LowPoly => "Low Poly",
            Style::Origami => "Origami",
            Style::ModelingCompound => "Modeling Compound",
            Style::Cinematic => "Cinematic",
            Style::Model3d => "3D Model",
            Style::PixelArt => "Pixel Art",
            Style::TileTexture => "Tile Texture",
        }
    }

    /// Cycle through `None` and the catalog, in catalog order.
    pub fn cycle(current: Option<Style>, forward: bool) -> Option<Style> {
        let len = Self::ALL.len() + 1;
        let index = match current {
            None => 0,
            Some(style) => Self::ALL.iter().position(|s| *s == style).map_or(0, |i| i + 1),
        };
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if next == 0 {
            None
        } else {
            Some(Self::ALL[next - 1])
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.value() == s)
            .ok_or_else(|| format!("Unknown style \"{}\"", s))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_parses_back() {
        for style in Style::ALL {
            assert_eq!(style.value().parse::<Style>().unwrap(), style);
        }
        assert!("watercolor".parse::<Style>().is_err());
    }

    #[test]
    fn cycling_wraps_through_none() {
        assert_eq!(Style::cycle(None, true), Some(Style::Enhance));
        assert_eq!(Style::cycle(Some(Style::TileTexture), true), None);
        assert_eq!(Style::cycle(None, false), Some(Style::TileTexture));
        assert_eq!(Style::cycle(Some(Style::Enhance), false), None);
    }
}
