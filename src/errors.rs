/*!
 * Error types for the readflow engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a speech synthesis service
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Error when making an API request fails
    #[error("Synthesis request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse synthesis response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("Synthesis API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The text span submitted for synthesis was empty
    #[error("Empty text submitted for synthesis")]
    EmptyText,
}

/// Errors that can occur while ingesting a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The source file could not be read
    #[error("Failed to read document source: {0}")]
    Unreadable(String),

    /// The decoder produced no usable text at all
    #[error("No text content extracted from {0}")]
    NoContent(String),
}

/// Errors that can occur when mutating playback state
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// A numeric argument was NaN, infinite, or negative where it must not be.
    /// The playback state is left unchanged when this is returned.
    #[error("Invalid playback argument: {0}")]
    InvalidArgument(String),

    /// An operation required a loaded document but none is active
    #[error("No document loaded")]
    NoDocument,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the synthesis provider
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Error from document ingestion
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from playback state handling
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
