//! Error types for llms-routing.
//!
//! Discovery and file reads return these instead of swallowing failures, so
//! each caller decides whether a failure means "pass through" (dev server) or
//! "abort the emission pass" (build).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning, reading, or emitting llms files.
#[derive(Error, Debug)]
pub enum LlmsError {
    /// The directory walk hit an unreadable entry or a symlink loop.
    #[error("failed to walk llms directory: {0}")]
    Walk(#[source] walkdir::Error),

    /// A file whose path is not valid UTF-8 and so has no route.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// A manifest or markdown file could not be read.
    #[error("failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output asset could not be written.
    #[error("failed to write asset {file_name}: {source}")]
    WriteAsset {
        file_name: String,
        #[source]
        source: io::Error,
    },

    /// The build output directory could not be created.
    #[error("failed to prepare output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An asset name that is empty, absolute, or climbs out of the output root.
    #[error("invalid asset path: {0}")]
    InvalidAssetPath(String),

    /// A request path or file that resolves outside the llms directory.
    #[error("path escapes the llms directory: {0}")]
    OutsideRoot(String),

    /// The working directory needed to resolve the llms directory is unavailable.
    #[error("failed to resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

impl LlmsError {
    /// Whether the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ReadFile { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::Walk(e) => e
                .io_error()
                .is_some_and(|io| io.kind() == io::ErrorKind::NotFound),
            _ => false,
        }
    }
}
