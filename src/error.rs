//! Error type shared by the whole crate.

use thiserror::Error;

/// Errors reported by instance generation, tour construction and result I/O.
#[derive(Debug, Error)]
pub enum TspError {
    /// A parameter is outside its accepted domain (zero point count,
    /// empty count range, zero-sized region, start index out of range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A tour was requested over a point set with no points.
    #[error("empty input: cannot build a tour over zero points")]
    EmptyInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed instance file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TspError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TspError::InvalidArgument(message.into())
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        TspError::Parse { line, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TspError::invalid("count must be at least 1");
        assert_eq!(err.to_string(), "invalid argument: count must be at least 1");

        let err = TspError::parse(7, "Invalid x coordinate");
        assert_eq!(err.to_string(), "parse error at line 7: Invalid x coordinate");

        assert!(TspError::EmptyInput.to_string().contains("zero points"));
    }

    #[test]
    fn test_io_conversion() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.tsp")?)
        }
        assert!(matches!(open_missing(), Err(TspError::Io(_))));
    }
}
