//! Pixel rectangles in source-image coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rectangle of the source image, in whole pixels.
///
/// Width and height are never zero: every constructor floors them at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x,
            y,
            w: w.max(1),
            h: h.max(1),
        }
    }

    /// Move the origin by a signed delta, stopping at the image origin.
    pub fn translate(&mut self, dx: i64, dy: i64) {
        self.x = (self.x as i64 + dx).max(0) as u32;
        self.y = (self.y as i64 + dy).max(0) as u32;
    }

    /// Set the size, flooring each side at 1 pixel.
    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w.max(1);
        self.h = h.max(1);
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_floors_size() {
        let r = Rect::new(3, 4, 0, 0);
        assert_eq!((r.w, r.h), (1, 1));
    }

    #[test]
    fn test_translate_stops_at_origin() {
        let mut r = Rect::new(5, 5, 10, 10);
        r.translate(-10, 3);
        assert_eq!((r.x, r.y), (0, 8));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::new(1, 2, 30, 40).to_string(), "30x40+1+2");
    }
}
