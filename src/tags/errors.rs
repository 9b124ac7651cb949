//! Custom error types for tag analysis

use std::fmt;
use std::io;

/// Photo tag analysis error types
#[derive(Debug)]
pub enum PhotoError {
    /// I/O error
    IoError(io::Error),
    /// The tag catalog could not be loaded at all
    CatalogLoad {
        message: String,
        diagnostics: Vec<String>,
    },
    /// Analysis or output was requested before a catalog was initialized
    NotInitialized,
    /// The image does not contain a readable tag container
    InvalidImage(String),
    /// A raw tag declares more bytes than its buffer holds
    MalformedTag {
        id: u32,
        declared: usize,
        available: usize,
    },
    /// Failure while writing the result document
    Output(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::IoError(e) => write!(f, "I/O error: {}", e),
            PhotoError::CatalogLoad { message, diagnostics } => {
                write!(f, "{}", message)?;
                if !diagnostics.is_empty() {
                    writeln!(f)?;
                    for diagnostic in diagnostics {
                        write!(f, "\n{}", diagnostic)?;
                    }
                }
                Ok(())
            }
            PhotoError::NotInitialized => write!(f, "PhotoProperties was not initialized"),
            PhotoError::InvalidImage(msg) => write!(f, "Invalid image: {}", msg),
            PhotoError::MalformedTag { id, declared, available } => write!(
                f,
                "Malformed tag {}: declared {} bytes but only {} available",
                id, declared, available
            ),
            PhotoError::Output(msg) => write!(f, "Output error: {}", msg),
            PhotoError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PhotoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhotoError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PhotoError {
    fn from(error: io::Error) -> Self {
        PhotoError::IoError(error)
    }
}

impl From<String> for PhotoError {
    fn from(msg: String) -> Self {
        PhotoError::GenericError(msg)
    }
}

/// Result type for tag analysis operations
pub type PhotoResult<T> = Result<T, PhotoError>;
