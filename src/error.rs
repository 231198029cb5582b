use miette::Diagnostic;
use thiserror::Error;

use crate::types::OutputFormat;

/// Main error type for memecut operations
#[derive(Error, Diagnostic, Debug)]
pub enum CutError {
    #[error("IO error: {0}")]
    #[diagnostic(code(memecut::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(memecut::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(memecut::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Compose error: {message}")]
    #[diagnostic(code(memecut::compose))]
    Compose {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to encode {format}: {message}")]
    #[diagnostic(code(memecut::encode))]
    Encode {
        format: OutputFormat,
        message: String,
    },

    #[error("Edit rejected: {message}")]
    #[diagnostic(code(memecut::edit))]
    Edit {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, CutError>;
