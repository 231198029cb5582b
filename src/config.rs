//! Project config (cut.yaml) parsing.
//!
//! The config holds the grid layout, export settings and optional
//! per-cell overrides for `memecut split`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{CutError, Result};
use crate::grid::{Axis, GridModel, MAX_COUNT, MIN_COUNT};
use crate::render::{Encoder, SplitBatch, SplitSettings};
use crate::report::{Diagnostic, Report};
use crate::session::{CellEditSession, SessionDefaults};
use crate::types::{Background, Margins, Offset, OutputFormat, OutputSize, Rect};

/// Config file name.
pub const CONFIG_FILENAME: &str = "cut.yaml";

const POSITIONS_CODE: &str = "memecut::config::positions";
const COUNT_CODE: &str = "memecut::config::count";
const CELL_CODE: &str = "memecut::config::cell";

/// Project config loaded from cut.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutConfig {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns.
    pub cols: usize,

    /// Custom row line percentages (rows + 1 values, 0 to 100).
    pub row_positions: Option<Vec<f64>>,

    /// Custom column line percentages (cols + 1 values, 0 to 100).
    pub col_positions: Option<Vec<f64>>,

    pub padding: PaddingConfig,

    pub format: OutputFormat,

    /// `auto` or an edge length in pixels.
    pub size: OutputSize,

    pub background: Background,

    /// Output directory for split images.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Per-cell overrides keyed by cell number (1-based, as in file names).
    pub cells: BTreeMap<usize, CellOverride>,
}

/// Grid padding in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    pub x: u32,
    pub y: u32,
    /// Keep both axes equal (y follows x).
    pub linked: bool,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            linked: true,
        }
    }
}

/// Fine-tune values for a single cell. Unset fields keep the batch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CellOverride {
    pub crop: Option<Rect>,
    pub margins: Option<Margins>,
    pub offset: Option<Offset>,
    pub square: Option<bool>,
    pub background: Option<Background>,
    pub size: Option<OutputSize>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            row_positions: None,
            col_positions: None,
            padding: PaddingConfig::default(),
            format: OutputFormat::default(),
            size: OutputSize::default(),
            background: Background::default(),
            output: default_output(),
            cells: BTreeMap::new(),
        }
    }
}

impl CutConfig {
    /// Load config from a cut.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse config from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty or comment-only file is the default config
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| CutError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `cut.yaml` from `dir` if present, otherwise the default config.
    pub fn find(dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            Ok((Self::load(&path)?, Some(path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Build the grid described by this config.
    ///
    /// Out-of-range counts are clamped and invalid custom positions fall
    /// back to uniform lines; both are reported as warnings.
    pub fn grid(&self) -> (GridModel, Report) {
        let mut report = Report::new();
        let mut grid = GridModel::new(self.rows, self.cols);

        for (axis, requested) in [(Axis::Row, self.rows), (Axis::Col, self.cols)] {
            let count = grid.count(axis);
            if count != requested {
                report.push(
                    Diagnostic::warning(
                        COUNT_CODE,
                        format!("{} count {} clamped to {}", axis, requested, count),
                    )
                    .with_help(format!("Use {} to {} lines per axis", MIN_COUNT, MAX_COUNT)),
                );
            }
        }

        for (axis, positions) in [
            (Axis::Row, &self.row_positions),
            (Axis::Col, &self.col_positions),
        ] {
            let Some(positions) = positions else {
                continue;
            };
            match check_positions(positions, grid.count(axis)) {
                Ok(()) => grid.set_positions(axis, positions),
                Err(reason) => report.push(
                    Diagnostic::warning(
                        POSITIONS_CODE,
                        format!("Ignoring {}_positions: {}", axis, reason),
                    )
                    .with_help("Using evenly spaced lines instead"),
                ),
            }
        }

        grid.set_link_padding(false);
        grid.set_padding(Axis::Col, self.padding.x);
        grid.set_padding(Axis::Row, self.padding.y);
        grid.set_link_padding(self.padding.linked);

        (grid, report)
    }

    /// Batch-wide export settings.
    pub fn settings(&self) -> SplitSettings {
        SplitSettings {
            format: self.format,
            background: self.background,
            output_size: self.size,
        }
    }

    /// Apply `cells` overrides to a finished batch.
    ///
    /// Each overridden cell is opened in its own fine-tune session and saved,
    /// so one cell's background or square choice never carries to another.
    /// Overrides for cells that do not exist are reported and skipped.
    pub fn apply_overrides<E: Encoder + ?Sized>(
        &self,
        source: &RgbaImage,
        batch: &mut SplitBatch,
        encoder: &E,
    ) -> Result<Report> {
        let mut report = Report::new();

        for (&number, cell) in &self.cells {
            if number == 0 || number > batch.len() {
                report.push(
                    Diagnostic::warning(
                        CELL_CODE,
                        format!("Override for cell {} does not match any cell", number),
                    )
                    .with_help(format!("Cells are numbered 1 to {}", batch.len())),
                );
                continue;
            }

            let mut defaults = SessionDefaults::from_settings(batch.settings());
            let mut session = CellEditSession::open(source, batch, encoder, &mut defaults, number - 1)?;
            cell.apply(&mut session)?;
            session.finish()?;
        }

        Ok(report)
    }
}

impl CellOverride {
    /// Apply the set fields to an open session.
    ///
    /// Size is applied before the square flag so `size: auto` together with
    /// `square: false` is accepted.
    pub fn apply<E: Encoder + ?Sized>(&self, session: &mut CellEditSession<'_, E>) -> Result<()> {
        if let Some(rect) = self.crop {
            session.set_crop(rect);
        }
        if let Some(margins) = self.margins {
            session.set_margins(margins);
        }
        if let Some(offset) = self.offset {
            session.set_offset(offset);
        }
        if let Some(background) = self.background {
            session.set_background(background);
        }
        if let Some(size) = self.size {
            session.set_output_size(size);
        }
        if let Some(square) = self.square {
            session.set_square(square)?;
        }
        Ok(())
    }
}

fn check_positions(positions: &[f64], count: usize) -> std::result::Result<(), String> {
    if positions.len() != count + 1 {
        return Err(format!(
            "expected {} values for {} cells, got {}",
            count + 1,
            count,
            positions.len()
        ));
    }
    if let Some(bad) = positions
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 100.0)
    {
        return Err(format!("{} is outside 0-100", bad));
    }

    let min = positions.iter().copied().fold(f64::INFINITY, f64::min);
    let max = positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min != 0.0 || max != 100.0 {
        return Err("lines must start at 0 and end at 100".to_string());
    }
    Ok(())
}
