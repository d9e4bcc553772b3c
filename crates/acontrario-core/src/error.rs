//! Error types for a-contrario histogram analysis
//!
//! Provides a unified error type for all acontrario crates.

use thiserror::Error;

/// Core error type for mode detection and its I/O collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scratch storage could not be allocated
    #[error("Resource exhausted: could not allocate {requested} cells for {context}")]
    ResourceExhausted { requested: usize, context: String },

    /// A textual value could not be parsed
    #[error("Parse error at position {position}: {token:?}")]
    Parse { position: usize, token: String },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an empty histogram
    pub fn empty_input(context: &str) -> Self {
        Self::InvalidInput(format!("{context} must contain at least one bin"))
    }

    /// Create an error for a non-positive or non-finite epsilon
    pub fn invalid_epsilon(eps: f64) -> Self {
        Self::InvalidParameter(format!("epsilon {eps} must be finite and > 0"))
    }

    /// Create an error for a negative bin count
    pub fn negative_count(bin: usize, value: f64) -> Self {
        Self::InvalidInput(format!("bin {bin} has negative count {value}"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a histogram whose bins sum to zero
    pub fn zero_mass() -> Self {
        Self::InvalidInput("histogram total mass must be > 0".to_string())
    }

    /// Create an error for a failed or overflowing table allocation
    pub fn allocation_failed(requested: usize, context: &str) -> Self {
        Self::ResourceExhausted {
            requested,
            context: context.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("epsilon must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: epsilon must be positive");

        let err = Error::InvalidInput("histogram is empty".to_string());
        assert_eq!(err.to_string(), "Invalid input: histogram is empty");

        let err = Error::ResourceExhausted {
            requested: 100,
            context: "entropy table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Resource exhausted: could not allocate 100 cells for entropy table"
        );

        let err = Error::Parse {
            position: 3,
            token: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Parse error at position 3: \"abc\"");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_epsilon(0.0);
        assert_eq!(err.to_string(), "Invalid parameter: epsilon 0 must be finite and > 0");

        let err = Error::negative_count(2, -1.5);
        assert_eq!(err.to_string(), "Invalid input: bin 2 has negative count -1.5");

        let err = Error::non_finite("histogram");
        assert_eq!(
            err.to_string(),
            "Invalid input: histogram contains NaN or infinite values"
        );

        match Error::allocation_failed(usize::MAX, "mode table") {
            Error::ResourceExhausted { requested, context } => {
                assert_eq!(requested, usize::MAX);
                assert_eq!(context, "mode table");
            }
            _ => panic!("Wrong error type"),
        }

        assert!(matches!(Error::empty_input("histogram"), Error::InvalidInput(_)));
        assert!(matches!(Error::zero_mass(), Error::InvalidInput(_)));
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {
                assert!(err.to_string().contains("file not found"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_patterns() {
        fn validate_epsilon(eps: f64) -> Result<()> {
            if !(eps.is_finite() && eps > 0.0) {
                return Err(Error::invalid_epsilon(eps));
            }
            Ok(())
        }

        assert!(validate_epsilon(1.0).is_ok());
        assert!(validate_epsilon(0.0).is_err());
        assert!(validate_epsilon(-1.0).is_err());
        assert!(validate_epsilon(f64::NAN).is_err());
        assert!(validate_epsilon(f64::INFINITY).is_err());
    }
}
