//! Common types and utilities for tsigc commands.
//!
//! This module provides shared types, constants, and utility functions
//! used across all command implementations to ensure consistency.

use std::path::{Path, PathBuf};

use crate::error::{Result, TsigcError};

// ============================================================================
// Path Utilities
// ============================================================================

/// Sanitize a user-provided path to prevent path traversal attacks.
///
/// Ensures the resolved path is within the current working directory
/// or an allowed base directory.
///
/// # Arguments
/// * `path` - The user-provided path to sanitize
/// * `base_dir` - The allowed base directory (defaults to current dir)
///
/// # Returns
/// * `Result<PathBuf>` - The sanitized path or an error if traversal detected
#[allow(dead_code)]
pub fn sanitize_path(path: &Path, base_dir: Option<&Path>) -> Result<PathBuf> {
    let base = base_dir.unwrap_or_else(|| Path::new("."));
    let base_canonical = base
        .canonicalize()
        .map_err(|e| TsigcError::FileOperation(format!("invalid base directory: {}", e)))?;

    let path_canonical = path
        .canonicalize()
        .unwrap_or_else(|_| base.join(path).to_path_buf());

    if !path_canonical.starts_with(&base_canonical) {
        return Err(TsigcError::FileOperation(
            "path traversal detected: path must be within current directory".to_string(),
        ));
    }

    Ok(path_canonical)
}

// ============================================================================
// Output Messages
// ============================================================================

/// Prefixes used for verbose/diagnostic output across all commands.
pub mod output_messages {
    pub const OK: &str = "ok";
    pub const INFO: &str = "info:";
    pub const WARNING: &str = "warning:";
    pub const ERROR: &str = "error:";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn sanitize_path_accepts_a_path_within_the_base() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("sig.rbs");
        fs::write(&file, "FOO: Integer\n").unwrap();

        let result = sanitize_path(&file, Some(dir.path()));
        assert!(result.is_ok());
    }

    #[test]
    fn sanitize_path_rejects_traversal_outside_the_base() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let escape = dir.path().join("..").join(
            outside
                .path()
                .file_name()
                .unwrap(),
        );

        let result = sanitize_path(&escape, Some(dir.path()));
        assert!(result.is_err());
    }
}
