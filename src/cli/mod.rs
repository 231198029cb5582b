pub mod completions;
pub mod grid;
pub mod init;
pub mod split;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::CutConfig;
use crate::error::{CutError, Result};

/// memecut - Split an image into a grid of stickers
#[derive(Parser, Debug)]
#[command(name = "memecut")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split an image into cells and write them as PNG or GIF
    Split(split::SplitArgs),

    /// Print grid lines and cell rectangles for an image
    Grid(grid::GridArgs),

    /// Create a cut.yaml with default settings
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Grid layout flags shared by `split` and `grid`.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Config file (default: cut.yaml next to the input image)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of rows (1-20)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns (1-20)
    #[arg(long)]
    pub cols: Option<usize>,

    /// Padding on both axes, in pixels (0-50)
    #[arg(long, conflicts_with_all = ["padding_x", "padding_y"])]
    pub padding: Option<u32>,

    /// Horizontal padding, in pixels (0-50)
    #[arg(long)]
    pub padding_x: Option<u32>,

    /// Vertical padding, in pixels (0-50)
    #[arg(long)]
    pub padding_y: Option<u32>,
}

impl LayoutArgs {
    /// Load the config for `input` and apply these flags on top.
    ///
    /// Returns the config and the file it came from, if any.
    pub fn resolve(&self, input: &Path) -> Result<(CutConfig, Option<PathBuf>)> {
        let (mut config, path) = match &self.config {
            Some(path) => {
                if !path.is_file() {
                    return Err(CutError::Io {
                        path: path.clone(),
                        message: format!("{} not found", path.display()),
                    });
                }
                (CutConfig::load(path)?, Some(path.clone()))
            }
            None => {
                let dir = input.parent().unwrap_or_else(|| Path::new("."));
                let dir = if dir.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    dir
                };
                CutConfig::find(dir)?
            }
        };

        self.apply(&mut config);
        Ok((config, path))
    }

    /// Override config values with the flags that were given.
    ///
    /// A count flag drops that axis' custom positions, which would no
    /// longer match.
    pub fn apply(&self, config: &mut CutConfig) {
        if let Some(rows) = self.rows {
            if rows != config.rows {
                config.row_positions = None;
            }
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            if cols != config.cols {
                config.col_positions = None;
            }
            config.cols = cols;
        }

        if let Some(padding) = self.padding {
            config.padding.x = padding;
            config.padding.y = padding;
            config.padding.linked = true;
        }
        if self.padding_x.is_some() || self.padding_y.is_some() {
            config.padding.linked = false;
            if let Some(x) = self.padding_x {
                config.padding.x = x;
            }
            if let Some(y) = self.padding_y {
                config.padding.y = y;
            }
        }
    }
}

/// Error for an input image that does not exist.
pub(crate) fn missing_input(path: &Path) -> CutError {
    CutError::Io {
        path: path.to_path_buf(),
        message: format!("File not found: {}", crate::output::display_path(path)),
    }
}
