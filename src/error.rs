//! Error type shared by the dataset and chart modules.
//!
//! Failures from the table layer, the file system and the rendering backend
//! are carried through unchanged; the remaining variants cover argument
//! checks done by this crate before handing off to those layers.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by `macro_lab` operations
#[derive(Debug, Error)]
pub enum LabError {
    /// Table layer failure (missing column, failed cast, shape mismatch)
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// File system failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Settings file could not be encoded or decoded
    #[error(transparent)]
    Settings(#[from] serde_json::Error),

    /// Image encoding failure (unsupported output format)
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Rendering backend failure
    #[error("drawing error: {0}")]
    Drawing(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Color specification not understood by the chart palette
    #[error("invalid color specification: {0:?}")]
    InvalidColor(String),

    /// Argument outside its accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Bundled font could not be registered with the rendering backend
    #[error("font error: {0}")]
    Font(String),

    /// Native window could not be opened
    #[error("display error: {0}")]
    Display(String),
}

/// Result alias used across the crate
pub type LabResult<T> = Result<T, LabError>;

impl LabError {
    /// Whether the error came from a missing table column
    pub fn is_missing_column(&self) -> bool {
        matches!(self, LabError::Polars(PolarsError::ColumnNotFound(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_detection() {
        let err: LabError = PolarsError::ColumnNotFound("inpc".into()).into();
        assert!(err.is_missing_column());

        let err = LabError::InvalidArgument("xticks_every must be positive".to_string());
        assert!(!err.is_missing_column());
    }

    #[test]
    fn test_display_messages() {
        let err = LabError::InvalidColor("C42".to_string());
        assert_eq!(err.to_string(), "invalid color specification: \"C42\"");

        let err = LabError::Drawing("backend failed".into());
        assert_eq!(err.to_string(), "drawing error: backend failed");
    }

    #[test]
    fn test_drawing_error_keeps_source() {
        use std::error::Error;

        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = LabError::Drawing(Box::new(inner));
        let source = err.source().expect("source kept");
        let io = source.downcast_ref::<std::io::Error>().expect("io error");
        assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_image_io_failure_is_transparent() {
        let err: LabError = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such directory",
        ))
        .into();
        assert_eq!(err.to_string(), "no such directory");
    }
}
