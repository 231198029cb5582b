//! Per-cell compositing parameters.
//!
//! A `CellAdjustment` describes how one extracted rectangle is placed on its
//! output canvas: margins around it, a free offset, whether the canvas is
//! squared, what fills the background, and an optional fixed output size.
//!
//! # Example
//!
//! ```yaml
//! margins: { top: 4, bottom: 4, left: 8, right: 8 }
//! offset: { x: -2, y: 0 }
//! square: true
//! background: white
//! size: 240
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Background;

/// Canvas padding on each edge, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Margins {
    pub const ZERO: Self = Self::uniform(0);

    pub const fn uniform(px: u32) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }

    /// Left plus right. Widened so extreme margins cannot overflow.
    pub fn horizontal(&self) -> u64 {
        self.left as u64 + self.right as u64
    }

    pub fn vertical(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }
}

/// Free-form content offset applied after centering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Target edge length of the final canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "SizeRepr", into = "SizeRepr")]
pub enum OutputSize {
    /// Keep the composed canvas as-is.
    #[default]
    Auto,
    /// Resample onto a square canvas of this many pixels.
    Fixed(u32),
}

impl OutputSize {
    /// Sizes offered without typing a custom value.
    pub const PRESETS: [u32; 3] = [128, 240, 512];
    pub const MIN: u32 = 16;
    pub const MAX: u32 = 2048;

    /// A fixed size, clamped to the supported range.
    pub fn fixed(px: u32) -> Self {
        OutputSize::Fixed(px.clamp(Self::MIN, Self::MAX))
    }

    pub fn is_fixed(self) -> bool {
        matches!(self, OutputSize::Fixed(_))
    }

    pub fn pixels(self) -> Option<u32> {
        match self {
            OutputSize::Auto => None,
            OutputSize::Fixed(px) => Some(px),
        }
    }

    /// Whether the size is one of the presets (or `auto`).
    pub fn is_preset(self) -> bool {
        match self {
            OutputSize::Auto => true,
            OutputSize::Fixed(px) => Self::PRESETS.contains(&px),
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSize::Auto => write!(f, "auto"),
            OutputSize::Fixed(px) => write!(f, "{}", px),
        }
    }
}

impl FromStr for OutputSize {
    type Err = String;

    /// Accepts "auto" or a pixel count (e.g. "240").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "auto" {
            return Ok(OutputSize::Auto);
        }
        let px = s
            .parse::<u32>()
            .map_err(|_| format!("Invalid size: '{}' (expected 'auto' or a pixel count)", s))?;
        Ok(OutputSize::fixed(px))
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Pixels(u32),
    Keyword(String),
}

impl TryFrom<SizeRepr> for OutputSize {
    type Error = String;

    fn try_from(repr: SizeRepr) -> Result<Self, Self::Error> {
        match repr {
            SizeRepr::Pixels(px) => Ok(OutputSize::fixed(px)),
            SizeRepr::Keyword(s) => s.parse(),
        }
    }
}

impl From<OutputSize> for SizeRepr {
    fn from(size: OutputSize) -> Self {
        match size {
            OutputSize::Auto => SizeRepr::Keyword("auto".to_string()),
            OutputSize::Fixed(px) => SizeRepr::Pixels(px),
        }
    }
}

/// Everything the compositor needs besides the source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellAdjustment {
    pub margins: Margins,
    pub offset: Offset,
    pub is_square: bool,
    pub background: Background,
    pub output_size: OutputSize,
}

impl CellAdjustment {
    /// No margins, no offset. A fixed size implies a square canvas.
    pub fn neutral(background: Background, output_size: OutputSize) -> Self {
        Self {
            margins: Margins::ZERO,
            offset: Offset::ZERO,
            is_square: output_size.is_fixed(),
            background,
            output_size,
        }
    }
}
