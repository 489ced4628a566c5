//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl Error {
    /// True when the error was caused by the caller's input rather than the system
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::InvalidDimensions(_) | Error::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors() {
        assert!(Error::Validation("bad".to_string()).is_caller_error());
        assert!(Error::InvalidDimensions("0x0".to_string()).is_caller_error());
        assert!(!Error::Database("locked".to_string()).is_caller_error());
        assert!(!Error::Serialization("truncated".to_string()).is_caller_error());
    }

    #[test]
    fn test_serde_json_conversion() {
        let err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
