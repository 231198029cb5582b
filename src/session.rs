//! Per-cell fine-tuning.
//!
//! A `CellEditSession` edits one result of a `SplitBatch` at a time. Edits
//! change a working copy of the cell's rectangle and adjustment; `save`
//! re-composes and re-encodes the cell and replaces it in the batch under
//! the same id. Moving to another cell saves pending edits first.
//!
//! Two edit modes share the arrow keys:
//! - crop mode moves the source rectangle,
//! - canvas mode moves the content on its canvas (the offset when the
//!   canvas is square, otherwise the left/top margins).
//!
//! Background and square choices also become the session defaults, which
//! are applied to cells that have never been saved from a session.

use image::RgbaImage;

use crate::error::{CutError, Result};
use crate::grid::Direction;
use crate::render::{compose_cell, render_cell, Encoder, SplitBatch, SplitSettings};
use crate::report::Diagnostic;
use crate::types::{Background, CellAdjustment, Margins, Offset, OutputSize, Rect};

/// Arrow-key step in pixels.
pub const NUDGE_STEP: i32 = 1;

/// Arrow-key step in pixels while Shift is held.
pub const NUDGE_FAST_STEP: i32 = 10;

/// Preferences carried from cell to cell within one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionDefaults {
    pub background: Background,
    pub square: bool,
}

impl SessionDefaults {
    pub fn from_settings(settings: &SplitSettings) -> Self {
        Self {
            background: settings.background,
            square: false,
        }
    }
}

/// What the arrow keys and drags move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Move the source rectangle.
    Crop,
    /// Move the content on its canvas.
    #[default]
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Working copy matches the stored result.
    Viewing,
    /// Working copy has unsaved edits.
    Dirty,
}

/// Fine-tune state for one cell of a batch at a time.
pub struct CellEditSession<'a, E: Encoder + ?Sized> {
    source: &'a RgbaImage,
    batch: &'a mut SplitBatch,
    encoder: &'a E,
    defaults: &'a mut SessionDefaults,
    id: usize,
    rect: Rect,
    adjustment: CellAdjustment,
    mode: EditMode,
    state: EditState,
}

impl<'a, E: Encoder + ?Sized> CellEditSession<'a, E> {
    /// Open the cell with `id`.
    pub fn open(
        source: &'a RgbaImage,
        batch: &'a mut SplitBatch,
        encoder: &'a E,
        defaults: &'a mut SessionDefaults,
        id: usize,
    ) -> Result<Self> {
        let Some(result) = batch.get(id) else {
            return Err(out_of_range(id, batch.len()));
        };
        let (rect, adjustment) = (result.rect, result.adjustment);

        let mut session = Self {
            source,
            batch,
            encoder,
            defaults,
            id,
            rect,
            adjustment,
            mode: EditMode::default(),
            state: EditState::Viewing,
        };
        session.load(id)?;
        Ok(session)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn adjustment(&self) -> CellAdjustment {
        self.adjustment
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == EditState::Dirty
    }

    pub fn defaults(&self) -> SessionDefaults {
        *self.defaults
    }

    /// Whether the square flag can currently be turned off.
    pub fn square_locked(&self) -> bool {
        self.adjustment.output_size.is_fixed()
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Arrow-key move: 1px, or 10px with Shift.
    pub fn nudge(&mut self, direction: Direction, fast: bool) {
        let step = if fast { NUDGE_FAST_STEP } else { NUDGE_STEP };
        let (dx, dy) = direction.unit();
        self.drag(dx * step, dy * step);
    }

    /// Pointer drag by a pixel delta, interpreted by the edit mode.
    pub fn drag(&mut self, dx: i32, dy: i32) {
        match self.mode {
            EditMode::Crop => {
                let mut rect = self.rect;
                rect.translate(dx as i64, dy as i64);
                rect.x = rect.x.min(self.source.width().saturating_sub(1));
                rect.y = rect.y.min(self.source.height().saturating_sub(1));
                self.update_rect(rect);
            }
            EditMode::Canvas if self.adjustment.is_square => {
                let offset = Offset::new(
                    self.adjustment.offset.x.saturating_add(dx),
                    self.adjustment.offset.y.saturating_add(dy),
                );
                self.set_offset(offset);
            }
            EditMode::Canvas => {
                // Right/bottom margins follow from centring
                let margins = Margins {
                    left: shift(self.adjustment.margins.left, dx),
                    top: shift(self.adjustment.margins.top, dy),
                    ..self.adjustment.margins
                };
                self.set_margins(margins);
            }
        }
    }

    /// Set the crop size; each side floors at 1 pixel.
    pub fn set_crop_size(&mut self, w: u32, h: u32) {
        let mut rect = self.rect;
        rect.resize(w, h);
        self.update_rect(rect);
    }

    pub fn set_crop(&mut self, rect: Rect) {
        self.update_rect(Rect::new(rect.x, rect.y, rect.w, rect.h));
    }

    pub fn set_margins(&mut self, margins: Margins) {
        let mut adjustment = self.adjustment;
        adjustment.margins = margins;
        self.update_adjustment(adjustment);
    }

    pub fn set_offset(&mut self, offset: Offset) {
        let mut adjustment = self.adjustment;
        adjustment.offset = offset;
        self.update_adjustment(adjustment);
    }

    /// Set the background; it also becomes the session default.
    pub fn set_background(&mut self, background: Background) {
        self.defaults.background = background;
        let mut adjustment = self.adjustment;
        adjustment.background = background;
        self.update_adjustment(adjustment);
    }

    /// Toggle the square canvas; it also becomes the session default.
    ///
    /// Turning it off is rejected while a fixed output size is set.
    pub fn set_square(&mut self, square: bool) -> Result<()> {
        if !square && self.square_locked() {
            return Err(CutError::Edit {
                message: format!(
                    "Square canvas is required while the output size is {}px",
                    self.adjustment.output_size
                ),
                help: Some("Set the output size to auto first".to_string()),
            });
        }

        self.defaults.square = square;
        let mut adjustment = self.adjustment;
        adjustment.is_square = square;
        self.update_adjustment(adjustment);
        Ok(())
    }

    /// Set the output size. A fixed size forces the square canvas on.
    pub fn set_output_size(&mut self, output_size: OutputSize) {
        let mut adjustment = self.adjustment;
        adjustment.output_size = output_size;
        if output_size.is_fixed() {
            adjustment.is_square = true;
        }
        self.update_adjustment(adjustment);
    }

    /// Render the working copy without encoding it.
    pub fn preview(&self) -> Result<RgbaImage> {
        compose_cell(self.source, &self.rect, &self.adjustment)
    }

    /// Re-render the working copy and replace the cell in the batch.
    ///
    /// Returns the GIF fallback warning, if one was raised; it is also
    /// recorded in the batch report.
    pub fn save(&mut self) -> Result<Option<Diagnostic>> {
        let format = self.batch.settings().format;
        let (mut result, warning) = render_cell(
            self.source,
            self.id,
            self.rect,
            self.adjustment,
            format,
            self.encoder,
        )?;
        result.tuned = true;
        self.batch.replace(result)?;

        if let Some(warning) = &warning {
            self.batch.record(warning.clone());
        }
        self.state = EditState::Viewing;
        Ok(warning)
    }

    /// Save pending edits and open the next cell. False at the last cell.
    pub fn next(&mut self) -> Result<bool> {
        if self.id + 1 >= self.batch.len() {
            return Ok(false);
        }
        self.go_to(self.id + 1)?;
        Ok(true)
    }

    /// Save pending edits and open the previous cell. False at the first cell.
    pub fn previous(&mut self) -> Result<bool> {
        if self.id == 0 {
            return Ok(false);
        }
        self.go_to(self.id - 1)?;
        Ok(true)
    }

    /// Save pending edits and open the cell with `id`.
    pub fn go_to(&mut self, id: usize) -> Result<()> {
        if id >= self.batch.len() {
            return Err(out_of_range(id, self.batch.len()));
        }
        if self.is_dirty() {
            self.save()?;
        }
        self.load(id)
    }

    /// Save pending edits and end the session.
    pub fn finish(mut self) -> Result<()> {
        if self.is_dirty() {
            self.save()?;
        }
        Ok(())
    }

    /// End the session, discarding unsaved edits.
    pub fn close(self) {}

    fn load(&mut self, id: usize) -> Result<()> {
        let Some(result) = self.batch.get(id) else {
            return Err(out_of_range(id, self.batch.len()));
        };

        let (rect, stored, tuned) = (result.rect, result.adjustment, result.tuned);

        let mut adjustment = stored;
        if !tuned {
            adjustment.background = self.defaults.background;
            adjustment.is_square = self.defaults.square;
        }
        if adjustment.output_size.is_fixed() {
            adjustment.is_square = true;
        }

        self.id = id;
        self.rect = rect;
        self.adjustment = adjustment;
        self.state = if adjustment == stored {
            EditState::Viewing
        } else {
            EditState::Dirty
        };
        Ok(())
    }

    fn update_rect(&mut self, rect: Rect) {
        if rect != self.rect {
            self.rect = rect;
            self.state = EditState::Dirty;
        }
    }

    fn update_adjustment(&mut self, adjustment: CellAdjustment) {
        if adjustment != self.adjustment {
            self.adjustment = adjustment;
            self.state = EditState::Dirty;
        }
    }
}

fn shift(value: u32, delta: i32) -> u32 {
    (value as i64 + delta as i64).clamp(0, u32::MAX as i64) as u32
}

fn out_of_range(id: usize, len: usize) -> CutError {
    CutError::Edit {
        message: format!("Cell {} does not exist (batch has {})", id + 1, len),
        help: None,
    }
}
