//! Install pass over the context menu and the extension catalog.

use super::store::KeyStore;
use super::{associate_extension, install_context_menu, register_prog_id, RegistryConfig};
use crate::error::Result;
use tracing::{debug, info, warn};

/// What an install pass did with each catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// ProgIDs written, in catalog order.
    pub registered: Vec<String>,
    /// Entries rejected by [`is_extension_like`].
    pub skipped: Vec<String>,
}

/// Filter for malformed catalog entries.
///
/// Accepts anything that starts with or merely contains a dot, so `a.b`
/// passes even though it is not a dotted extension.
pub fn is_extension_like(ext: &str) -> bool {
    ext.starts_with('.') || ext.contains('.')
}

/// Installs the context menu, then a ProgID and association per extension.
///
/// Extensions are processed one at a time. The first registry failure stops
/// the pass and is returned; entries written before it stay in place.
pub fn install_all<S: KeyStore>(store: &S, config: &RegistryConfig) -> Result<InstallSummary> {
    install_context_menu(store, config)?;
    info!("context menu entries installed");

    let mut summary = InstallSummary::default();
    for ext in &config.file_extensions {
        if !is_extension_like(ext) {
            warn!(ext = ext.as_str(), "skipping invalid file type");
            summary.skipped.push(ext.clone());
            continue;
        }
        if !ext.starts_with('.') {
            debug!(ext = ext.as_str(), "registering entry without a leading dot");
        }

        let prog_id = register_prog_id(store, config, ext)?;
        associate_extension(store, ext, &prog_id)?;
        summary.registered.push(prog_id);
    }

    info!(
        registered = summary.registered.len(),
        skipped = summary.skipped.len(),
        "file associations installed"
    );
    Ok(summary)
}
