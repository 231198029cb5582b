//! Grid command implementation.
//!
//! Prints the grid lines and the pixel rectangle of every cell for an
//! image, as text or JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{CutError, Result};
use crate::grid::{partition, GridModel};
use crate::output::{display_path, Printer};
use crate::types::Rect;

use super::{missing_input, LayoutArgs};

/// Print grid lines and cell rectangles for an image
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Image to measure
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Grid and cell rectangles for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout {
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub cols: usize,
    pub row_positions: Vec<f64>,
    pub col_positions: Vec<f64>,
    pub padding_x: u32,
    pub padding_y: u32,
    pub link_padding: bool,
    pub cells: Vec<CellLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellLayout {
    /// 1-based, as in output file names.
    pub cell: usize,
    pub row: usize,
    pub col: usize,
    #[serde(flatten)]
    pub rect: Rect,
}

impl GridLayout {
    pub fn new(grid: &GridModel, width: u32, height: u32) -> Self {
        let cols = grid.cols();
        let cells = partition(grid, width, height)
            .into_iter()
            .enumerate()
            .map(|(id, rect)| CellLayout {
                cell: id + 1,
                row: id / cols,
                col: id % cols,
                rect,
            })
            .collect();

        Self {
            width,
            height,
            rows: grid.rows(),
            cols,
            row_positions: grid.row_positions().to_vec(),
            col_positions: grid.col_positions().to_vec(),
            padding_x: grid.padding_x(),
            padding_y: grid.padding_y(),
            link_padding: grid.link_padding(),
            cells,
        }
    }

    /// Plain-text rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("image    {}x{}\n", self.width, self.height));
        out.push_str(&format!(
            "rows     {}  {}\n",
            self.rows,
            join_positions(&self.row_positions)
        ));
        out.push_str(&format!(
            "cols     {}  {}\n",
            self.cols,
            join_positions(&self.col_positions)
        ));
        out.push_str(&format!(
            "padding  {}x{}{}\n",
            self.padding_x,
            self.padding_y,
            if self.link_padding { " (linked)" } else { "" }
        ));
        for cell in &self.cells {
            out.push_str(&format!(
                "cell {:<3} r{} c{}  {}\n",
                cell.cell, cell.row, cell.col, cell.rect
            ));
        }
        out
    }
}

fn join_positions(positions: &[f64]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run(args: GridArgs, printer: &Printer) -> Result<GridLayout> {
    let path = &args.input;
    if !path.exists() {
        return Err(missing_input(path));
    }

    let (config, _) = args.layout.resolve(path)?;

    // Only the header is needed for the dimensions
    let (width, height) = image::image_dimensions(path).map_err(|e| CutError::Io {
        path: path.clone(),
        message: format!("Failed to read image: {}", e),
    })?;
    printer.status("Measured", &format!("{} ({}x{})", display_path(path), width, height));

    let (grid, report) = config.grid();
    printer.report(&report);

    let layout = GridLayout::new(&grid, width, height);
    if args.json {
        let json = serde_json::to_string_pretty(&layout).map_err(|e| CutError::Parse {
            message: format!("Failed to serialize grid: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        print!("{}", layout.to_text());
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Axis;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_layout_text() {
        let grid = GridModel::new(2, 2);
        let layout = GridLayout::new(&grid, 100, 60);

        insta::assert_snapshot!(layout.to_text().trim_end(), @r"
        image    100x60
        rows     2  0 50 100
        cols     2  0 50 100
        padding  0x0 (linked)
        cell 1   r0 c0  50x30+0+0
        cell 2   r0 c1  50x30+50+0
        cell 3   r1 c0  50x30+0+30
        cell 4   r1 c1  50x30+50+30
        ");
    }

    #[test]
    fn test_layout_unlinked_padding() {
        let mut grid = GridModel::new(1, 2);
        grid.set_link_padding(false);
        grid.set_padding(Axis::Col, 5);

        let layout = GridLayout::new(&grid, 100, 60);
        assert!(layout.to_text().contains("padding  5x0\n"));
        assert_eq!(layout.cells[1].rect, Rect::new(55, 0, 40, 60));
    }

    #[test]
    fn test_layout_json() {
        let grid = GridModel::new(1, 2);
        let layout = GridLayout::new(&grid, 10, 10);
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["cols"], 2);
        assert_eq!(json["cells"][1]["cell"], 2);
        assert_eq!(json["cells"][1]["x"], 5);
        assert_eq!(json["cells"][1]["w"], 5);
    }

    #[test]
    fn test_run_reads_dimensions() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("meme.png");
        RgbaImage::from_pixel(90, 30, Rgba([1, 2, 3, 255]))
            .save(&input)
            .unwrap();

        let mut layout_args = LayoutArgs::default();
        layout_args.cols = Some(3);
        let layout = run(
            GridArgs {
                input,
                layout: layout_args,
                json: false,
            },
            &Printer::plain(),
        )
        .unwrap();

        assert_eq!((layout.width, layout.height), (90, 30));
        assert_eq!(layout.cells.len(), 6);
        assert_eq!(layout.cells[2].rect, Rect::new(60, 0, 30, 15));
    }
}
