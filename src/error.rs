//! Error types for the Zed Windows CLI.
//!
//! Install treats registry failures as fatal; uninstall never produces one
//! (absent keys and values are consumed inside [`crate::registry::KeyStore`]).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all CLI operations.
#[derive(Error, Debug)]
pub enum ZedCliError {
    /// The config file is missing or could not be read.
    #[error("config file unavailable at {}: {source}", .path.display())]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but is not valid JSON for this schema.
    #[error("config file is malformed: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    /// The configured executable no longer exists on disk.
    #[error("executable not found at path: {}", .0.display())]
    ExecutablePathInvalid(PathBuf),

    /// An `%VAR%` reference in a path could not be expanded.
    #[error("unable to resolve path: {0}")]
    PathResolution(String),

    /// A registry key or value write was rejected.
    #[error("registry write failed for {target} ({step}): {source}")]
    RegistryAccess {
        target: String,
        step: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The extension catalog could not be parsed.
    #[error("invalid extension catalog: {0}")]
    Catalog(String),

    /// The executable could not be started.
    #[error("unable to start Zed: {0}")]
    Launch(#[source] std::io::Error),

    /// Registry integration was requested on a platform without a registry.
    #[error("shell integration is only available on Windows")]
    UnsupportedPlatform,

    /// I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to persist temporary file.
    #[error("failed to persist temporary file: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
}

impl ZedCliError {
    /// Wraps a rejected registry write with the entry and step it belongs to.
    pub fn registry(target: impl Into<String>, step: &'static str, source: std::io::Error) -> Self {
        ZedCliError::RegistryAccess {
            target: target.into(),
            step,
            source,
        }
    }
}

/// Type alias for Results using ZedCliError.
pub type Result<T> = std::result::Result<T, ZedCliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_registry_error_names_target_and_step() {
        let err = ZedCliError::registry(
            "Zed.md",
            "shell\\open\\command",
            Error::new(ErrorKind::PermissionDenied, "access denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("Zed.md"));
        assert!(msg.contains("shell\\open\\command"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "file not found");
        let err: ZedCliError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_executable_path_error_display() {
        let err = ZedCliError::ExecutablePathInvalid(PathBuf::from("C:\\Zed\\zed.exe"));
        assert_eq!(err.to_string(), "executable not found at path: C:\\Zed\\zed.exe");
    }
}
