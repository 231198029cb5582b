//! Core value types shared by the grid, compositor, encoder and session.
//!
//! - `Rect` - a pixel rectangle of the source image
//! - `CellAdjustment` - margins, offset, square flag, background and size for one cell
//! - `OutputFormat` / `Background` / `OutputSize` - export settings

mod adjustment;
mod format;
mod rect;

pub use adjustment::{CellAdjustment, Margins, Offset, OutputSize};
pub use format::{Background, OutputFormat};
pub use rect::Rect;
