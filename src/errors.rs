//! Centralized error handling for fre2esmf
//!
//! This module provides structured error types so that grid assembly and
//! weight generation report failures with context instead of a generic
//! `Box<dyn Error>`.

use std::fmt;

/// Main error type for fre2esmf operations
#[derive(Debug)]
pub enum Fre2EsmfError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Variable not found in a NetCDF file
    VariableNotFound { var: String },

    /// A grid array does not have the shape its role requires
    ShapeMismatch {
        what: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A corner coordinate vector is not monotonic
    NonMonotonicCorners { axis: String },

    /// Dimension rename refers to a label the array does not carry
    UnknownDimension { dim: String },

    /// Weight generation errors
    WeightError(String),

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Generic error
    Generic(String),
}

impl fmt::Display for Fre2EsmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fre2EsmfError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            Fre2EsmfError::IoError(e) => write!(f, "I/O error: {}", e),
            Fre2EsmfError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            Fre2EsmfError::ShapeMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch for {}: expected {:?}, found {:?}",
                what, expected, found
            ),
            Fre2EsmfError::NonMonotonicCorners { axis } => {
                write!(f, "Corner coordinates along '{}' are not monotonic", axis)
            }
            Fre2EsmfError::UnknownDimension { dim } => {
                write!(f, "Dimension '{}' not present on array", dim)
            }
            Fre2EsmfError::WeightError(msg) => write!(f, "Weight generation error: {}", msg),
            Fre2EsmfError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            Fre2EsmfError::ArrayError(e) => write!(f, "Array error: {}", e),
            Fre2EsmfError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Fre2EsmfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Fre2EsmfError::NetCDFError(e) => Some(e),
            Fre2EsmfError::IoError(e) => Some(e),
            Fre2EsmfError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for Fre2EsmfError {
    fn from(error: netcdf::Error) -> Self {
        Fre2EsmfError::NetCDFError(error)
    }
}

impl From<std::io::Error> for Fre2EsmfError {
    fn from(error: std::io::Error) -> Self {
        Fre2EsmfError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for Fre2EsmfError {
    fn from(error: ndarray::ShapeError) -> Self {
        Fre2EsmfError::ArrayError(error)
    }
}

impl From<String> for Fre2EsmfError {
    fn from(error: String) -> Self {
        Fre2EsmfError::Generic(error)
    }
}

impl From<&str> for Fre2EsmfError {
    fn from(error: &str) -> Self {
        Fre2EsmfError::Generic(error.to_string())
    }
}

/// Result type alias for fre2esmf operations
pub type Result<T> = std::result::Result<T, Fre2EsmfError>;
