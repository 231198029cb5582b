//! Image encoding.
//!
//! PNG is a direct lossless write. GIF quantizes the bitmap to an adaptive
//! palette of at most 256 colours (NeuQuant) and writes one static frame;
//! on a transparent background palette index 0 is reserved as the
//! transparent colour.
//!
//! GIF support is a capability of an [`Encoder`]. [`encode_cell`] asks for
//! GIF only when the encoder reports the capability and falls back to the
//! same encoder's PNG path if the capability is missing or the call fails.

use std::borrow::Cow;
use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{CutError, Result};
use crate::report::Diagnostic;
use crate::types::{Background, OutputFormat};

/// Largest palette a GIF frame can carry.
pub const GIF_MAX_COLORS: usize = 256;

/// NeuQuant sampling factor: 1 is best quality, 30 is fastest.
const NEUQUANT_SAMPLE: i32 = 10;

/// Pixels below this alpha become the transparent index.
const ALPHA_CUTOFF: u8 = 128;

/// Diagnostic code for a GIF that was written as PNG instead.
pub const GIF_FALLBACK_CODE: &str = "memecut::encode::gif-fallback";

/// Something that can serialize finished bitmaps.
pub trait Encoder {
    /// Lossless PNG. No fallback exists if this fails.
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>>;

    /// Palette GIF; transparent backgrounds register index 0 as transparent.
    fn try_encode_gif(&self, image: &RgbaImage, background: Background) -> Result<Vec<u8>>;

    /// Whether `try_encode_gif` is available at all.
    fn supports_gif(&self) -> bool {
        true
    }
}

/// Encoder backed by the `image` PNG codec and the `gif` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoder;

impl Encoder for StandardEncoder {
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| CutError::Encode {
                format: OutputFormat::Png,
                message: e.to_string(),
            })?;
        Ok(bytes)
    }

    fn try_encode_gif(&self, image: &RgbaImage, background: Background) -> Result<Vec<u8>> {
        write_gif(image, background)
    }
}

/// Encoder without GIF support; every GIF request becomes PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngOnlyEncoder;

impl Encoder for PngOnlyEncoder {
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        StandardEncoder.encode_png(image)
    }

    fn try_encode_gif(&self, _image: &RgbaImage, _background: Background) -> Result<Vec<u8>> {
        Err(gif_error("GIF encoder not available"))
    }

    fn supports_gif(&self) -> bool {
        false
    }
}

/// An encoded cell image.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Format actually written; PNG after a GIF fallback.
    pub format: OutputFormat,
    /// Set when a GIF request fell back to PNG.
    pub warning: Option<Diagnostic>,
}

/// Encode `image` as `format`, falling back from GIF to PNG.
///
/// A GIF failure is never an error here: the PNG path is used and a warning
/// is attached. A PNG failure is returned as-is.
pub fn encode_cell<E: Encoder + ?Sized>(
    encoder: &E,
    image: &RgbaImage,
    format: OutputFormat,
    background: Background,
) -> Result<Encoded> {
    if format == OutputFormat::Gif {
        let attempt = if encoder.supports_gif() {
            encoder.try_encode_gif(image, background)
        } else {
            Err(gif_error("GIF encoder not available"))
        };

        match attempt {
            Ok(bytes) => {
                return Ok(Encoded {
                    bytes,
                    format: OutputFormat::Gif,
                    warning: None,
                })
            }
            Err(e) => {
                let bytes = encoder.encode_png(image)?;
                let warning = Diagnostic::warning(
                    GIF_FALLBACK_CODE,
                    format!("GIF generation failed, saved as PNG instead ({})", e),
                );
                return Ok(Encoded {
                    bytes,
                    format: OutputFormat::Png,
                    warning: Some(warning),
                });
            }
        }
    }

    Ok(Encoded {
        bytes: encoder.encode_png(image)?,
        format: OutputFormat::Png,
        warning: None,
    })
}

/// A palette-indexed bitmap ready for GIF output.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    /// Flat RGB triplets.
    pub palette: Vec<u8>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
    /// Palette index drawn as transparent, if any.
    pub transparent: Option<u8>,
}

impl IndexedImage {
    pub fn colour_count(&self) -> usize {
        self.palette.len() / 3
    }
}

/// Quantize to at most 256 colours.
///
/// On a transparent background index 0 is reserved for pixels with alpha
/// below the cutoff and the remaining 255 slots are learned from the rest.
/// On white every slot is learned.
pub fn quantize(image: &RgbaImage, background: Background) -> IndexedImage {
    let keyed = !background.is_white();
    let reserved = usize::from(keyed);
    let is_clear = |a: u8| keyed && a < ALPHA_CUTOFF;

    // NeuQuant works on RGBA bytes; opaque samples only
    let samples: Vec<u8> = image
        .pixels()
        .filter(|p| !is_clear(p[3]))
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect();

    let quantizer = (!samples.is_empty())
        .then(|| color_quant::NeuQuant::new(NEUQUANT_SAMPLE, GIF_MAX_COLORS - reserved, &samples));

    let mut palette = vec![0u8; reserved * 3];
    if let Some(nq) = &quantizer {
        palette.extend(nq.color_map_rgb());
    }
    if palette.is_empty() {
        palette.extend([0, 0, 0]);
    }

    let indices = image
        .pixels()
        .map(|p| match &quantizer {
            Some(nq) if !is_clear(p[3]) => (nq.index_of(&[p[0], p[1], p[2], 255]) + reserved) as u8,
            _ => 0,
        })
        .collect();

    IndexedImage {
        palette,
        indices,
        transparent: keyed.then_some(0),
    }
}

/// Write a single static GIF frame.
fn write_gif(image: &RgbaImage, background: Background) -> Result<Vec<u8>> {
    let (w, h) = image.dimensions();
    let (Ok(width), Ok(height)) = (u16::try_from(w), u16::try_from(h)) else {
        return Err(gif_error(&format!(
            "{}x{} exceeds the GIF maximum of 65535x65535",
            w, h
        )));
    };

    let indexed = quantize(image, background);

    let mut encoder = gif::Encoder::new(Vec::new(), width, height, &indexed.palette)
        .map_err(|e| gif_error(&e.to_string()))?;

    let frame = gif::Frame {
        width,
        height,
        delay: 0,
        transparent: indexed.transparent,
        buffer: Cow::Borrowed(&indexed.indices),
        ..Default::default()
    };
    encoder
        .write_frame(&frame)
        .map_err(|e| gif_error(&e.to_string()))?;

    encoder.into_inner().map_err(|e| gif_error(&e.to_string()))
}

fn gif_error(message: &str) -> CutError {
    CutError::Encode {
        format: OutputFormat::Gif,
        message: message.to_string(),
    }
}
