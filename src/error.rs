//! Error types for the interpretation engine

use thiserror::Error;

/// Result type alias for interpretation operations
pub type Result<T> = std::result::Result<T, InterpretError>;

/// Main error type for the interpretation engine
#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("Unrecognized model type: {0}")]
    UnrecognizedModelType(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for InterpretError {
    fn from(err: serde_json::Error) -> Self {
        // Data errors come from a well-formed document with the wrong shape
        if err.is_data() {
            InterpretError::MalformedInput(err.to_string())
        } else {
            InterpretError::SerializationError(err.to_string())
        }
    }
}

impl From<ndarray::ShapeError> for InterpretError {
    fn from(err: ndarray::ShapeError) -> Self {
        InterpretError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InterpretError::UnrecognizedModelType("no markers".to_string());
        assert_eq!(err.to_string(), "Unrecognized model type: no markers");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InterpretError = io_err.into();
        assert!(matches!(err, InterpretError::IoError(_)));
    }

    #[test]
    fn test_error_from_json_data_error() {
        let json_err = serde_json::from_str::<f64>("\"abc\"").unwrap_err();
        let err: InterpretError = json_err.into();
        assert!(matches!(err, InterpretError::MalformedInput(_)));
    }

    #[test]
    fn test_error_from_json_syntax_error() {
        let json_err = serde_json::from_str::<f64>("1.2.3").unwrap_err();
        let err: InterpretError = json_err.into();
        assert!(matches!(err, InterpretError::SerializationError(_)));
    }
}
