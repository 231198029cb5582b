//! Output format and background fill.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

/// Encoded output format of a split cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless RGBA PNG.
    #[default]
    Png,
    /// Single-frame, palette-quantized GIF.
    Gif,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "gif" => Ok(OutputFormat::Gif),
            other => Err(format!("Invalid format: '{}' (expected 'png' or 'gif')", other)),
        }
    }
}

/// Canvas fill behind the copied content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Transparent,
    White,
}

impl Background {
    pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Pixel value used to fill a fresh canvas.
    pub fn fill(self) -> Rgba<u8> {
        match self {
            Background::Transparent => Self::CLEAR,
            Background::White => Self::WHITE,
        }
    }

    pub fn is_white(self) -> bool {
        self == Background::White
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Transparent => write!(f, "transparent"),
            Background::White => write!(f, "white"),
        }
    }
}

impl FromStr for Background {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transparent" | "none" => Ok(Background::Transparent),
            "white" => Ok(Background::White),
            other => Err(format!(
                "Invalid background: '{}' (expected 'transparent' or 'white')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("GIF".parse::<OutputFormat>(), Ok(OutputFormat::Gif));
        assert!("webp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Gif.to_string(), "gif");
    }

    #[test]
    fn test_background_fill() {
        assert_eq!(Background::White.fill(), Rgba([255, 255, 255, 255]));
        assert_eq!(Background::Transparent.fill()[3], 0);
    }

    #[test]
    fn test_background_parse() {
        assert_eq!("white".parse::<Background>(), Ok(Background::White));
        assert_eq!("none".parse::<Background>(), Ok(Background::Transparent));
        assert!("black".parse::<Background>().is_err());
    }
}
