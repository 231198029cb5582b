//! Rendering module for memecut.
//!
//! Turns grid cells into finished, encoded images: compositing onto a
//! canvas, PNG/GIF encoding, and the sequential split batch.

mod batch;
mod compose;
mod encode;

pub use batch::{render_cell, split_image, SplitBatch, SplitResult, SplitSettings};
pub use compose::{compose_cell, Layout, MAX_CANVAS_SIDE};
pub use encode::{
    encode_cell, quantize, Encoded, Encoder, IndexedImage, PngOnlyEncoder, StandardEncoder,
    GIF_FALLBACK_CODE, GIF_MAX_COLORS,
};
