//! Split command implementation.
//!
//! Cuts an image along the configured grid, applies per-cell overrides
//! from cut.yaml and writes `split_N.png` / `split_N.gif` files.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{CutError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{split_image, StandardEncoder};
use crate::report::Report;
use crate::types::{Background, OutputFormat, OutputSize};

use super::{missing_input, LayoutArgs};

/// Split an image into grid cells
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Image to split (PNG, JPEG, GIF, WebP, ...)
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output format: png or gif
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Output edge length: auto, or 16-2048 (presets: 128, 240, 512)
    #[arg(long)]
    pub size: Option<OutputSize>,

    /// Canvas background: transparent or white
    #[arg(long)]
    pub background: Option<Background>,

    /// Output directory (default: from cut.yaml, else dist)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: SplitArgs, printer: &Printer) -> Result<Vec<PathBuf>> {
    let path = &args.input;
    if !path.exists() {
        return Err(missing_input(path));
    }

    let (mut config, config_path) = args.layout.resolve(path)?;
    if let Some(config_path) = &config_path {
        printer.info("Config", &display_path(config_path));
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(background) = args.background {
        config.background = background;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }

    printer.status("Loading", &display_path(path));
    let source = image::open(path)
        .map_err(|e| CutError::Io {
            path: path.clone(),
            message: format!("Failed to load image: {}", e),
        })?
        .to_rgba8();

    let (grid, grid_report) = config.grid();
    printer.report(&grid_report);

    let settings = config.settings();
    printer.status(
        "Splitting",
        &format!(
            "{}x{} image into {}x{} grid ({}, size {}, {} background)",
            source.width(),
            source.height(),
            grid.rows(),
            grid.cols(),
            settings.format,
            settings.output_size,
            settings.background
        ),
    );

    let encoder = StandardEncoder;
    let mut batch = split_image(&source, &grid, &settings, &encoder)?;

    let mut report = Report::new();
    if !config.cells.is_empty() {
        report = config.apply_overrides(&source, &mut batch, &encoder)?;
        let tuned = batch.results().iter().filter(|r| r.tuned).count();
        if tuned > 0 {
            printer.info("Adjusted", &plural(tuned, "cell", "cells"));
        }
    }
    report.merge(batch.report().clone());
    printer.report(&report);

    fs::create_dir_all(&config.output).map_err(|e| CutError::Io {
        path: config.output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let mut written = Vec::with_capacity(batch.len());
    for result in batch.results() {
        let out = config.output.join(result.file_name());
        fs::write(&out, &result.encoded).map_err(|e| CutError::Io {
            path: out.clone(),
            message: format!("Failed to write image: {}", e),
        })?;
        written.push(out);
    }

    printer.status(
        "Finished",
        &format!(
            "{} in {}{}",
            plural(written.len(), "cell", "cells"),
            printer.cyan(&display_path(&config.output)),
            match report.warning_count() {
                0 => String::new(),
                n => format!(" ({})", plural(n, "warning", "warnings")),
            }
        ),
    );

    Ok(written)
}
