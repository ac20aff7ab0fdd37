//! Error type shared by the model builder, the decoder and the file loaders.

use std::fmt;

/// Errors raised while building models, decoding samples or loading files.
#[derive(Debug, Clone, PartialEq)]
pub enum VrpError {
    /// A variable key is not three underscore-separated integers.
    InvalidKey {
        key: String,
        reason: String,
    },
    /// A key component lies outside the declared vehicle/vertex/step range.
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        bound: usize,
    },
    /// Matrix side (or row length) differs from what the caller declared.
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
    /// Negative or non-finite distance entry.
    InvalidDistance {
        row: usize,
        col: usize,
        value: f64,
    },
    InvalidParameter(String),
    Io(String),
    Format(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VrpError>;

impl fmt::Display for VrpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VrpError::InvalidKey { key, reason } => {
                write!(f, "Invalid variable key '{}': {}", key, reason)
            }
            VrpError::IndexOutOfRange { what, index, bound } => {
                write!(f, "{} index {} out of range (must be < {})", what, index, bound)
            }
            VrpError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found)
            }
            VrpError::InvalidDistance { row, col, value } => {
                write!(f, "Invalid distance {} at [{}][{}]", value, row, col)
            }
            VrpError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            VrpError::Io(msg) => write!(f, "I/O error: {}", msg),
            VrpError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for VrpError {}

impl From<std::io::Error> for VrpError {
    fn from(value: std::io::Error) -> Self {
        VrpError::Io(value.to_string())
    }
}

impl From<csv::Error> for VrpError {
    fn from(value: csv::Error) -> Self {
        VrpError::Format(format!("CSV: {}", value))
    }
}

impl From<serde_json::Error> for VrpError {
    fn from(value: serde_json::Error) -> Self {
        VrpError::Format(format!("JSON: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VrpError::IndexOutOfRange { what: "vehicle", index: 3, bound: 2 };
        assert_eq!(err.to_string(), "vehicle index 3 out of range (must be < 2)");

        let err = VrpError::DimensionMismatch { expected: 3, found: 4 };
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: VrpError = io.into();
        assert!(matches!(err, VrpError::Io(_)));
    }
}
