//! Error types for Quill geometry

use thiserror::Error;

/// Errors raised by geometry values and path builders
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed call arity or unusable numeric input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Mathematically undefined operation (e.g. division by zero)
    #[error("domain error: {0}")]
    Domain(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        Error::Domain(msg.into())
    }
}

/// Result alias used across the Quill crates
pub type Result<T> = std::result::Result<T, Error>;
