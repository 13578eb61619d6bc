//! Result and Error types for ftools-facies

use std::path::PathBuf;

/// Type alias for `Result<T, facies::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `ftools-facies`
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failed CSV read or write
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    /// Number of facies codes does not match the grid dimensions
    #[error("{source_name}: expected {expected} facies codes for the grid, found {found}")]
    ShapeMismatch {
        source_name: String,
        expected: usize,
        found: usize,
    },

    /// Slice index outside of the 1-indexed bounds of the volume
    #[error("slice index {index} outside of the volume bounds [{min}, {max}]")]
    IndexOutOfRange {
        index: usize,
        min: usize,
        max: usize,
    },

    /// File content is not a numeric table after the header
    #[error("{path}: {reason}")]
    FileFormat { path: PathBuf, reason: String },

    /// Batch target is missing or not a directory
    #[error("directory \"{0}\" not found")]
    DirectoryNotFound(PathBuf),

    /// Failure in a post-processing step applied to a parsed file
    #[error("post-processing failed for {case_id}")]
    PostProcess {
        case_id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Short name of the error kind for reports and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "Io",
            Error::Csv(_) => "Csv",
            Error::Json(_) => "Json",
            Error::ShapeMismatch { .. } => "ShapeMismatch",
            Error::IndexOutOfRange { .. } => "IndexOutOfRange",
            Error::FileFormat { .. } => "FileFormat",
            Error::DirectoryNotFound(_) => "DirectoryNotFound",
            Error::PostProcess { .. } => "PostProcess",
        }
    }
}
