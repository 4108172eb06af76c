//! Executable path resolution and validation.
//!
//! Paths handed to `zed config set` may start with a Windows-style
//! environment reference such as `%LOCALAPPDATA%\Programs\Zed\Zed.exe`.

use crate::error::{Result, ZedCliError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Expands the first `%NAME%` reference in `input` from the process
/// environment.
///
/// Inputs without `%` are returned unchanged.
///
/// # Errors
///
/// Returns [`ZedCliError::PathResolution`] if the reference is unterminated
/// or the variable is unset or empty.
pub fn resolve_path(input: &str) -> Result<PathBuf> {
    resolve_path_with(input, |name| std::env::var(name).ok())
}

/// [`resolve_path`] with an explicit variable lookup.
pub fn resolve_path_with<F>(input: &str, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(start) = input.find('%') else {
        debug!(path = input, "no environment variable used");
        return Ok(PathBuf::from(input));
    };

    let after = &input[start + 1..];
    let end = after.find('%').ok_or_else(|| {
        ZedCliError::PathResolution(format!("unterminated environment variable in '{}'", input))
    })?;
    let name = &after[..end];

    let value = lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            ZedCliError::PathResolution(format!("environment variable '{}' is not set", name))
        })?;

    let rest = after[end + 1..].trim_start_matches(['\\', '/']);
    let base = PathBuf::from(format!("{}{}", &input[..start], value));
    let resolved = if rest.is_empty() { base } else { base.join(rest) };

    debug!(path = %resolved.display(), "using resolved path");
    Ok(resolved)
}

/// Returns true if `path` exists.
pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

/// Resolves `input` and requires the result to be an existing file.
///
/// # Errors
///
/// Returns [`ZedCliError::PathResolution`] if expansion fails and
/// [`ZedCliError::ExecutablePathInvalid`] if nothing is there.
pub fn validate_executable(input: &str) -> Result<PathBuf> {
    let resolved = resolve_path(input)?;
    ensure_executable(&resolved)?;
    Ok(resolved)
}

/// Fails with [`ZedCliError::ExecutablePathInvalid`] unless `path` is a file.
pub fn ensure_executable(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ZedCliError::ExecutablePathInvalid(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "LOCALAPPDATA" => Some("/users/me/AppData/Local".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn test_plain_path_is_unchanged() {
        let path = resolve_path_with("/opt/zed/zed", env).unwrap();
        assert_eq!(path, PathBuf::from("/opt/zed/zed"));
    }

    #[test]
    fn test_leading_variable_is_expanded() {
        let path = resolve_path_with("%LOCALAPPDATA%/Programs/Zed/zed.exe", env).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/users/me/AppData/Local").join("Programs/Zed/zed.exe")
        );
    }

    #[test]
    fn test_variable_alone() {
        let path = resolve_path_with("%LOCALAPPDATA%", env).unwrap();
        assert_eq!(path, PathBuf::from("/users/me/AppData/Local"));
    }

    #[test]
    fn test_unset_or_empty_variable_fails() {
        assert!(matches!(
            resolve_path_with("%MISSING%/zed.exe", env),
            Err(ZedCliError::PathResolution(_))
        ));
        assert!(matches!(
            resolve_path_with("%EMPTY%/zed.exe", env),
            Err(ZedCliError::PathResolution(_))
        ));
    }

    #[test]
    fn test_unterminated_variable_fails() {
        assert!(resolve_path_with("%LOCALAPPDATA/zed.exe", env).is_err());
    }

    #[test]
    fn test_validate_executable() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("zed.exe");
        std::fs::write(&exe, b"").unwrap();

        assert_eq!(validate_executable(exe.to_str().unwrap()).unwrap(), exe);
        assert!(matches!(
            validate_executable(dir.path().join("missing.exe").to_str().unwrap()),
            Err(ZedCliError::ExecutablePathInvalid(_))
        ));
        // A directory is not an executable.
        assert!(ensure_executable(dir.path()).is_err());
    }
}
