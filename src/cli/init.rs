//! Init command implementation.
//!
//! Writes a commented `cut.yaml` with the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::CONFIG_FILENAME;
use crate::error::{CutError, Result};
use crate::output::{display_path, Printer};

const TEMPLATE: &str = "\
# memecut settings
rows: 2
cols: 2

# Custom line positions in percent (rows + 1 / cols + 1 values, 0 to 100)
# row_positions: [0, 40, 100]
# col_positions: [0, 50, 100]

# Pixels trimmed from every cell edge (0-50); linked keeps y equal to x
padding:
  x: 0
  y: 0
  linked: true

format: png          # png or gif
size: auto           # auto, or 16-2048 (presets: 128, 240, 512)
background: transparent  # transparent or white
output: dist

# Per-cell fine-tuning, keyed by cell number
# cells:
#   1:
#     margins: { top: 10, bottom: 10, left: 0, right: 0 }
#     offset: { x: 0, y: -4 }
#     square: true
#     background: white
#     size: 240
";

/// Create a cut.yaml with default settings
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write cut.yaml into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing cut.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<PathBuf> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(CutError::Io {
            path: config_path,
            message: format!("{} already exists", CONFIG_FILENAME),
        });
    }

    fs::write(&config_path, TEMPLATE).map_err(|e| CutError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&config_path));
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CutConfig;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_config() {
        let dir = tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };

        let path = run(args, &Printer::plain()).unwrap();
        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("output: dist"));
    }

    #[test]
    fn test_template_parses_to_default() {
        assert_eq!(CutConfig::parse(TEMPLATE).unwrap(), CutConfig::default());
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "rows: 3").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        assert!(run(args, &Printer::plain()).is_err());

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(content, "rows: 3");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "rows: 3").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("rows: 2"));
    }
}
