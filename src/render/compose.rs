//! Cell compositor.
//!
//! Copies one rectangle of the source image onto a fresh canvas sized by the
//! cell's margins and square flag, then optionally resamples the canvas to a
//! fixed square output size. The source is never modified.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{CutError, Result};
use crate::types::{Background, CellAdjustment, OutputSize, Rect};

/// Largest canvas side the compositor will allocate.
pub const MAX_CANVAS_SIDE: u32 = 16384;

/// Canvas geometry for one cell before any resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Rectangle plus margins.
    pub content: (u32, u32),
    /// Content size, or its larger side twice when squared.
    pub canvas: (u32, u32),
    /// Where the top-left source pixel lands on the canvas.
    pub origin: (i64, i64),
}

impl Layout {
    /// Compute the layout for `rect` under `adjustment`.
    pub fn new(rect: &Rect, adjustment: &CellAdjustment) -> Result<Self> {
        let margins = &adjustment.margins;
        let content_w = rect.w as u64 + margins.horizontal();
        let content_h = rect.h as u64 + margins.vertical();

        let (canvas_w, canvas_h) = if adjustment.is_square {
            let side = content_w.max(content_h);
            (side, side)
        } else {
            (content_w, content_h)
        };

        if canvas_w > MAX_CANVAS_SIDE as u64 || canvas_h > MAX_CANVAS_SIDE as u64 {
            return Err(CutError::Compose {
                message: format!(
                    "Canvas {}x{} exceeds the {}px limit",
                    canvas_w, canvas_h, MAX_CANVAS_SIDE
                ),
                help: Some("Reduce the crop size or margins for this cell".to_string()),
            });
        }

        // Centre the content block, then apply margin asymmetry and offset
        let origin_x = (canvas_w - content_w) as i64 / 2
            + margins.left as i64
            + adjustment.offset.x as i64;
        let origin_y = (canvas_h - content_h) as i64 / 2
            + margins.top as i64
            + adjustment.offset.y as i64;

        Ok(Self {
            content: (content_w as u32, content_h as u32),
            canvas: (canvas_w as u32, canvas_h as u32),
            origin: (origin_x, origin_y),
        })
    }
}

/// Render one cell of `source` into a finished bitmap.
pub fn compose_cell(
    source: &RgbaImage,
    rect: &Rect,
    adjustment: &CellAdjustment,
) -> Result<RgbaImage> {
    let layout = Layout::new(rect, adjustment)?;
    let (canvas_w, canvas_h) = layout.canvas;
    let background = adjustment.background;

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, background.fill());

    // Clipped to the source bounds; may be empty if the rect lies outside
    let content = imageops::crop_imm(source, rect.x, rect.y, rect.w, rect.h).to_image();
    let (x, y) = layout.origin;
    draw(&mut canvas, &content, x, y, background);

    match adjustment.output_size {
        OutputSize::Fixed(side) => {
            let side = side.clamp(OutputSize::MIN, OutputSize::MAX);
            if (canvas_w, canvas_h) == (side, side) {
                return Ok(canvas);
            }
            Ok(resample(&canvas, side, background))
        }
        OutputSize::Auto => Ok(canvas),
    }
}

/// Scale the whole canvas onto a square of `side` pixels.
fn resample(canvas: &RgbaImage, side: u32, background: Background) -> RgbaImage {
    let scaled = imageops::resize(canvas, side, side, FilterType::Triangle);
    if !background.is_white() {
        return scaled;
    }

    let mut out = RgbaImage::from_pixel(side, side, background.fill());
    imageops::overlay(&mut out, &scaled, 0, 0);
    out
}

/// Place `top` at (x, y): blended over white, copied verbatim over transparent.
fn draw(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64, background: Background) {
    match background {
        Background::White => imageops::overlay(canvas, top, x, y),
        Background::Transparent => imageops::replace(canvas, top, x, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Margins, Offset};
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// Source image where every pixel encodes its own coordinates.
    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    fn neutral() -> CellAdjustment {
        CellAdjustment::default()
    }

    #[test]
    fn test_identity_copy() {
        let source = gradient(40, 30);
        let rect = Rect::new(5, 7, 12, 9);
        let out = compose_cell(&source, &rect, &neutral()).unwrap();

        assert_eq!(out.dimensions(), (12, 9));
        for (x, y, p) in out.enumerate_pixels() {
            assert_eq!(p, source.get_pixel(rect.x + x, rect.y + y));
        }
    }

    #[test]
    fn test_identity_keeps_partial_alpha() {
        let source = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 77]));
        let out = compose_cell(&source, &Rect::new(0, 0, 4, 4), &neutral()).unwrap();
        assert_eq!(out.get_pixel(2, 2), &Rgba([10, 20, 30, 77]));
    }

    #[test]
    fn test_square_centres_short_axis() {
        let source = RgbaImage::from_pixel(10, 4, RED);
        let adj = CellAdjustment {
            is_square: true,
            ..neutral()
        };
        let out = compose_cell(&source, &Rect::new(0, 0, 10, 4), &adj).unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        let filled: Vec<u32> = (0..10).filter(|&y| out.get_pixel(0, y) == &RED).collect();
        assert_eq!(filled, vec![3, 4, 5, 6]);
        // Equal blank rows above and below
        assert_eq!(filled[0], 10 - 1 - filled[3]);
    }

    #[test]
    fn test_square_includes_margins() {
        let source = RgbaImage::from_pixel(10, 10, RED);
        let adj = CellAdjustment {
            margins: Margins {
                top: 0,
                bottom: 0,
                left: 6,
                right: 2,
            },
            is_square: true,
            ..neutral()
        };
        let layout = Layout::new(&Rect::new(0, 0, 10, 4), &adj).unwrap();
        assert_eq!(layout.content, (18, 4));
        assert_eq!(layout.canvas, (18, 18));
        assert_eq!(layout.origin, (6, 7));

        let out = compose_cell(&source, &Rect::new(0, 0, 10, 4), &adj).unwrap();
        assert_eq!(out.get_pixel(5, 8), &CLEAR);
        assert_eq!(out.get_pixel(6, 8), &RED);
        assert_eq!(out.get_pixel(15, 8), &RED);
        assert_eq!(out.get_pixel(16, 8), &CLEAR);
    }

    #[test]
    fn test_margins_extend_canvas() {
        let source = RgbaImage::from_pixel(8, 8, RED);
        let adj = CellAdjustment {
            margins: Margins {
                top: 1,
                bottom: 2,
                left: 3,
                right: 4,
            },
            ..neutral()
        };
        let out = compose_cell(&source, &Rect::new(0, 0, 8, 8), &adj).unwrap();

        assert_eq!(out.dimensions(), (15, 11));
        assert_eq!(out.get_pixel(3, 1), &RED);
        assert_eq!(out.get_pixel(2, 1), &CLEAR);
        assert_eq!(out.get_pixel(10, 8), &RED);
        assert_eq!(out.get_pixel(11, 9), &CLEAR);
    }

    #[test]
    fn test_offset_shifts_and_clips() {
        let source = RgbaImage::from_pixel(4, 4, RED);
        let adj = CellAdjustment {
            offset: Offset::new(2, -1),
            ..neutral()
        };
        let out = compose_cell(&source, &Rect::new(0, 0, 4, 4), &adj).unwrap();

        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.get_pixel(1, 0), &CLEAR);
        assert_eq!(out.get_pixel(2, 0), &RED);
        assert_eq!(out.get_pixel(3, 2), &RED);
        assert_eq!(out.get_pixel(3, 3), &CLEAR);
    }

    #[test]
    fn test_white_background_fills_and_blends() {
        let mut source = RgbaImage::from_pixel(2, 1, CLEAR);
        source.put_pixel(1, 0, RED);
        let adj = CellAdjustment {
            background: Background::White,
            margins: Margins::uniform(1),
            ..neutral()
        };
        let out = compose_cell(&source, &Rect::new(0, 0, 2, 1), &adj).unwrap();

        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(out.get_pixel(0, 0), &Background::WHITE);
        assert_eq!(out.get_pixel(1, 1), &Background::WHITE);
        assert_eq!(out.get_pixel(2, 1), &RED);
    }

    #[test]
    fn test_fixed_size_resamples() {
        let source = RgbaImage::from_pixel(10, 10, RED);
        let adj = CellAdjustment::neutral(Background::Transparent, OutputSize::Fixed(64));
        let out = compose_cell(&source, &Rect::new(0, 0, 10, 10), &adj).unwrap();

        assert_eq!(out.dimensions(), (64, 64));
        let centre = out.get_pixel(32, 32);
        assert!(centre[0] >= 254 && centre[3] >= 254);
        assert_eq!((centre[1], centre[2]), (0, 0));
    }

    #[test]
    fn test_fixed_size_matching_canvas_is_untouched() {
        let source = gradient(20, 20);
        let adj = CellAdjustment::neutral(Background::Transparent, OutputSize::Fixed(16));
        let out = compose_cell(&source, &Rect::new(2, 2, 16, 16), &adj).unwrap();

        assert_eq!(out.dimensions(), (16, 16));
        assert_eq!(out.get_pixel(0, 0), source.get_pixel(2, 2));
    }

    #[test]
    fn test_fixed_size_white_stays_opaque() {
        let source = RgbaImage::from_pixel(10, 4, RED);
        let adj = CellAdjustment::neutral(Background::White, OutputSize::Fixed(32));
        let out = compose_cell(&source, &Rect::new(0, 0, 10, 4), &adj).unwrap();

        assert_eq!(out.dimensions(), (32, 32));
        assert!(out.pixels().all(|p| p[3] == 255));
        assert_eq!(out.get_pixel(16, 0), &Background::WHITE);
    }

    #[test]
    fn test_rect_outside_source_gives_blank_canvas() {
        let source = RgbaImage::from_pixel(10, 10, RED);
        let out = compose_cell(&source, &Rect::new(10, 0, 1, 10), &neutral()).unwrap();
        assert_eq!(out.dimensions(), (1, 10));
        assert!(out.pixels().all(|p| p == &CLEAR));
    }

    #[test]
    fn test_oversized_canvas_is_compose_error() {
        let source = RgbaImage::from_pixel(4, 4, RED);
        let adj = CellAdjustment {
            margins: Margins {
                left: MAX_CANVAS_SIDE,
                ..Margins::ZERO
            },
            ..neutral()
        };
        let err = compose_cell(&source, &Rect::new(0, 0, 4, 4), &adj).unwrap_err();
        assert!(matches!(err, CutError::Compose { .. }));
    }

    #[test]
    fn test_extreme_margins_are_compose_error() {
        let source = RgbaImage::from_pixel(4, 4, RED);
        let adj = CellAdjustment {
            margins: Margins {
                left: u32::MAX,
                right: 1,
                top: u32::MAX,
                bottom: u32::MAX,
            },
            ..neutral()
        };
        let err = compose_cell(&source, &Rect::new(0, 0, 4, 4), &adj).unwrap_err();
        assert!(matches!(err, CutError::Compose { .. }));
    }

    #[test]
    fn test_source_unchanged() {
        let source = gradient(8, 8);
        let before = source.clone();
        let adj = CellAdjustment::neutral(Background::White, OutputSize::Fixed(32));
        compose_cell(&source, &Rect::new(1, 1, 5, 5), &adj).unwrap();
        assert_eq!(source, before);
    }
}
