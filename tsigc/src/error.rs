//! Error handling module for the tsigc CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the tsigc CLI application.
///
/// This enum represents all possible errors that can occur
/// during the execution of tsigc commands.
#[derive(Error, Debug)]
pub enum TsigcError {
    /// Error when a required configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error when file operations fail or a path argument is invalid.
    #[error("file operation failed: {0}")]
    FileOperation(String),

    /// Error when a lexical or syntactic parse of a signature fails.
    #[error(transparent)]
    Parse(#[from] tsig_par::ParseError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using TsigcError.
pub type Result<T> = std::result::Result<T, TsigcError>;
