//! Error types for the LAS / drillhole conversion library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when reading, writing or reconciling well data.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LAS text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The LAS file has no depth index under either recognized alias
    #[error(
        "In order to import data to a drillhole, .las files must contain a depth curve named 'DEPTH' or 'DEPT'."
    )]
    MissingDepthCurve,

    /// A named curve required for the operation is absent
    #[error("Missing curve '{curve}' in {context}")]
    MissingCurve { curve: String, context: String },

    /// Survey file could not be interpreted
    #[error("Invalid survey file {}: {message}", .path.display())]
    Survey { path: PathBuf, message: String },

    /// Delimited-text reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Data does not share the sampling axis of the requested property group
    #[error("Data '{data}' does not match the sampling of property group '{group}'")]
    AxisMismatch { data: String, group: String },

    /// Values and sampling axis lengths differ
    #[error("Data '{data}' has {values} values but its sampling axis has {axis}")]
    LengthMismatch {
        data: String,
        values: usize,
        axis: usize,
    },

    /// Drillhole has nothing to export
    #[error("Drillhole '{0}' doesn't have any associated data.")]
    NoData(String),

    /// Entity lookup failed
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Workspace or configuration JSON failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file is missing a field or holds an invalid value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
