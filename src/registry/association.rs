//! Links an extension to its ProgID through `OpenWithProgids`.

use super::classes_path;
use super::store::KeyStore;
use crate::error::{Result, ZedCliError};
use tracing::debug;

/// `Software\Classes\<ext>\OpenWithProgids`
pub fn open_with_path(ext: &str) -> String {
    classes_path(&[ext, "OpenWithProgids"])
}

/// Adds `prog_id` to the "Open with" list of `ext`.
///
/// The extension's default handler is left untouched.
pub fn associate_extension<S: KeyStore>(store: &S, ext: &str, prog_id: &str) -> Result<()> {
    let (list, _) = store
        .ensure_key(&open_with_path(ext))
        .map_err(|e| ZedCliError::registry(ext, "OpenWithProgids key", e))?;
    store
        .set_value(&list, prog_id, "")
        .map_err(|e| ZedCliError::registry(ext, "OpenWithProgids value", e))?;

    debug!(ext, prog_id, "file type associated");
    Ok(())
}
