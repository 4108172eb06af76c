//! Atomic file writes.
//!
//! The config file is rewritten after every install and uninstall; writing
//! through a temporary file in the same directory means a crash leaves
//! either the old or the new contents, never half of each.

use crate::error::{Result, ZedCliError};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

/// Writes `data` to `path` atomically.
pub fn write_file_atomic(path: &Path, data: &[u8]) -> Result<()> {
    write_atomically(path, |file| file.write_all(data))
}

/// Performs an atomic file write operation using a closure.
///
/// Creates a temporary file next to the target, lets `write_fn` fill it,
/// then renames it over the target.
pub fn write_atomically<F>(path: &Path, write_fn: F) -> Result<()>
where
    F: FnOnce(&mut File) -> std::result::Result<(), std::io::Error>,
{
    let output_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        Some(_) => Path::new("."),
        None => {
            return Err(ZedCliError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            )))
        }
    };

    let mut temp_file = Builder::new()
        .prefix(".zed-cli")
        .suffix(".tmp")
        .tempfile_in(output_dir)?;

    write_fn(temp_file.as_file_mut())?;
    temp_file.as_file_mut().sync_all()?;

    temp_file.persist(path)?;
    Ok(())
}
