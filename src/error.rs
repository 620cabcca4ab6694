//! Error handling for ctxpack
//!
//! Per-file problems (unreadable files, bad encodings, symlink cycles)
//! never show up here; they are folded into skip counts on
//! [`crate::types::PackStats`] at the point of occurrence. Only root
//! validation and the final output write can fail a whole run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a packing run
#[derive(Error, Debug)]
pub enum PackError {
    /// The scan root does not exist or is not a directory
    #[error("invalid root: {0} does not exist or is not a directory")]
    InvalidRoot(PathBuf),

    /// The final document could not be written
    #[error("failed to write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Other file system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for ctxpack operations
pub type Result<T> = std::result::Result<T, PackError>;
