//! Split-and-encode batches.
//!
//! A split partitions the source with the current grid, composes every cell
//! with a neutral adjustment and encodes it, strictly in ascending id order.
//! Any compose or PNG failure aborts the whole batch; a GIF failure only
//! downgrades that cell to PNG and records a warning.

use image::RgbaImage;
use serde::Serialize;

use crate::error::{CutError, Result};
use crate::grid::{partition, GridModel};
use crate::report::{Diagnostic, Report};
use crate::types::{Background, CellAdjustment, OutputFormat, OutputSize, Rect};

use super::{compose_cell, encode_cell, Encoder};

/// Batch-wide export settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SplitSettings {
    pub format: OutputFormat,
    pub background: Background,
    pub output_size: OutputSize,
}

impl SplitSettings {
    /// The adjustment every cell starts with.
    pub fn adjustment(&self) -> CellAdjustment {
        CellAdjustment::neutral(self.background, self.output_size)
    }
}

/// One encoded cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Row-major index, stable for the life of the batch.
    pub id: usize,
    pub rect: Rect,
    pub adjustment: CellAdjustment,
    pub encoded: Vec<u8>,
    /// Format actually written.
    pub format: OutputFormat,
    /// True once the cell has been saved from a fine-tune session; its
    /// background and square flag are then explicit choices.
    pub tuned: bool,
}

impl SplitResult {
    /// Archive-friendly name: `split_{id+1}.{ext}`.
    pub fn file_name(&self) -> String {
        format!("split_{}.{}", self.id + 1, self.format.extension())
    }
}

/// All results of one split, in id order.
#[derive(Debug, Clone)]
pub struct SplitBatch {
    settings: SplitSettings,
    results: Vec<SplitResult>,
    report: Report,
}

impl SplitBatch {
    pub fn settings(&self) -> &SplitSettings {
        &self.settings
    }

    pub fn results(&self) -> &[SplitResult] {
        &self.results
    }

    pub fn get(&self, id: usize) -> Option<&SplitResult> {
        self.results.get(id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Warnings gathered while encoding and editing.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.report.push(diagnostic);
    }

    /// Replace the result with the same id.
    pub fn replace(&mut self, result: SplitResult) -> Result<()> {
        let id = result.id;
        let Some(slot) = self.results.get_mut(id) else {
            return Err(CutError::Edit {
                message: format!("No result with id {} (batch has {})", id, self.len()),
                help: None,
            });
        };
        *slot = result;
        Ok(())
    }

    pub fn into_results(self) -> Vec<SplitResult> {
        self.results
    }
}

/// Compose and encode one cell.
///
/// Returns the result plus any GIF fallback warning, already tagged with
/// the cell id.
pub fn render_cell<E: Encoder + ?Sized>(
    source: &RgbaImage,
    id: usize,
    rect: Rect,
    adjustment: CellAdjustment,
    format: OutputFormat,
    encoder: &E,
) -> Result<(SplitResult, Option<Diagnostic>)> {
    let canvas = compose_cell(source, &rect, &adjustment)?;
    let encoded = encode_cell(encoder, &canvas, format, adjustment.background)?;

    let result = SplitResult {
        id,
        rect,
        adjustment,
        encoded: encoded.bytes,
        format: encoded.format,
        tuned: false,
    };
    Ok((result, encoded.warning.map(|w| w.for_cell(id))))
}

/// Split `source` along `grid` and encode every cell.
pub fn split_image<E: Encoder + ?Sized>(
    source: &RgbaImage,
    grid: &GridModel,
    settings: &SplitSettings,
    encoder: &E,
) -> Result<SplitBatch> {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 {
        return Err(CutError::Compose {
            message: format!("Image has zero dimensions ({}x{})", w, h),
            help: Some("Input image must have non-zero width and height".to_string()),
        });
    }

    let rects = partition(grid, w, h);
    let adjustment = settings.adjustment();

    let mut batch = SplitBatch {
        settings: *settings,
        results: Vec::with_capacity(rects.len()),
        report: Report::new(),
    };

    // Sequential on purpose: ids are encoded and stored in ascending order
    for (id, rect) in rects.into_iter().enumerate() {
        let (result, warning) = render_cell(source, id, rect, adjustment, settings.format, encoder)?;
        batch.results.push(result);
        batch.report.extend(warning);
    }

    Ok(batch)
}
