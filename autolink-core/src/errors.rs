//! errors.rs - Custom error types for the autolink-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `autolink-core` library.
///
/// Detectors themselves never fail; these errors surface from configuration,
/// construction and the small utilities with preconditions (e.g. truncation).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AutolinkError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Failed to compile pattern '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Invalid autolink configuration: {0}")]
    Config(String),
}

impl AutolinkError {
    /// Shorthand for an [`AutolinkError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AutolinkError::InvalidArgument(message.into())
    }
}
