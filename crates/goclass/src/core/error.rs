//! Core error types for package extraction
//!
//! This module defines the failures that can stop a run before a model is
//! produced: the package cannot be found, a file cannot be read, or a file
//! does not parse.

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for package extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Resolution error: cannot find package {import_path} from {}", .base_dir.display())]
    ResolutionError {
        import_path: String,
        base_dir: PathBuf,
    },

    #[error("Syntax error: {message} at {}:{line}:{column}", .file.display())]
    SyntaxError {
        file: PathBuf,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Create a new resolution error
    pub fn resolution_error(import_path: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self::ResolutionError {
            import_path: import_path.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Create a new syntax error
    pub fn syntax_error(
        file: impl Into<PathBuf>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::SyntaxError {
            file: file.into(),
            message: message.into(),
            line,
            column,
        }
    }

    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::ResolutionError { .. })
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Self::SyntaxError { .. })
    }
}
