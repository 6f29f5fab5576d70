//! Emitters for the derived outputs of a contact analysis: figures, the
//! per-frame series export, and the plain-text summary. All output names are
//! deterministic from the caller-supplied prefix.

pub mod figures;
pub mod series;
pub mod summary;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to render figure '{path}': {message}", path = path.display())]
    Figure { path: PathBuf, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
