//! Error taxonomy for loading, reducing and charting benchmark results.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, VizError>;

/// Everything that can abort the processing of a single input file.
#[derive(Debug, Error)]
pub enum VizError {
    /// The JSON is malformed or lacks a required key.
    #[error("invalid benchmark data: {0}")]
    DataFormat(String),

    /// A record or benchmark type carried zero job results.
    #[error("cannot aggregate an empty set of job results")]
    EmptyInput,

    /// A parameter needed for a derived metric or the sweep axis is absent.
    #[error("missing parameter `{name}`")]
    MissingParameter { name: String },

    /// Throughput was requested for a non-positive mean duration.
    #[error("mean duration must be positive to derive throughput, got {duration}")]
    DivisionByZero { duration: f64 },

    /// The sweep axis holds a value that cannot be ordered numerically.
    #[error("sweep parameter `{axis}` has non-numeric value {value}")]
    IncomparableValues { axis: String, value: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The chart backend failed to draw or encode an image.
    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl VizError {
    pub fn io(action: &str, path: &Path, source: io::Error) -> Self {
        VizError::Io {
            context: format!("failed to {action} {}", path.display()),
            source,
        }
    }

    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        VizError::Render(err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::DataFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = VizError::io(
            "read",
            Path::new("/tmp/missing.json"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("failed to read /tmp/missing.json"), "{msg}");
    }

    #[test]
    fn json_errors_become_data_format() {
        let err: VizError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, VizError::DataFormat(_)));
    }
}
