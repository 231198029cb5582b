//! memecut - Grid image splitter
//!
//! Cuts a single image into an N x M grid of stickers. Grid lines are kept
//! as percentages with undo/redo, cells are composited onto a canvas with
//! per-cell margins, offset, square padding, background and output size,
//! and every cell is encoded as PNG or palette GIF.

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod output;
pub mod render;
pub mod report;
pub mod session;
pub mod types;

pub use config::{CellOverride, CutConfig, PaddingConfig, CONFIG_FILENAME};
pub use error::{CutError, Result};
pub use grid::{
    generate_uniform_positions, partition, partition_positions, Axis, Direction, GridEditor,
    GridModel, HistoryEntry, HistoryStack, LineRef,
};
pub use render::{
    compose_cell, encode_cell, split_image, Encoded, Encoder, SplitBatch, SplitResult,
    SplitSettings, StandardEncoder,
};
pub use report::{Diagnostic, Report};
pub use session::{CellEditSession, EditMode, EditState, SessionDefaults};
pub use types::{Background, CellAdjustment, Margins, Offset, OutputFormat, OutputSize, Rect};
