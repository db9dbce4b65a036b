//! Error types for HomebaseTweaks
//!
//! This module defines all error types used throughout the library.
//! A rejected recording is not an error: see [`crate::recorder::RecordResponse`].

use thiserror::Error;

/// Error type for homebase operations
#[derive(Error, Debug)]
pub enum HomebaseError {
    /// HTTP request failed (transport error, fatal to the current operation)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Login response did not carry the success marker
    #[error("Could not log on (username={username})")]
    Authentication { username: String },

    /// Failed to parse a guide fragment or page
    #[error("Failed to parse: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Requested resource was not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration missing or malformed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for homebase operations
pub type Result<T> = std::result::Result<T, HomebaseError>;
