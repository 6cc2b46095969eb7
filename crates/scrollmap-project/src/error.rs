//! Error types for bundle writing.

use thiserror::Error;

/// Error type for building and writing project bundles.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// File I/O error (temporary file, rename, write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive error.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// `project.json` serialization error.
    #[error("project.json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bundle needs at least one tile.
    #[error("bundle has no tiles")]
    EmptyBundle,

    /// Two tiles share an id.
    #[error("duplicate tile id: {0}")]
    DuplicateTile(String),

    /// Camera bounds are inverted or the start lies outside them.
    #[error("invalid camera setup: {0}")]
    InvalidCamera(String),
}

/// Result type for bundle operations.
pub type ProjectResult<T> = Result<T, ProjectError>;
