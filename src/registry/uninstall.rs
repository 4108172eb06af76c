//! Best-effort teardown of everything the install pass writes.

use super::association::open_with_path;
use super::store::KeyStore;
use super::{classes_path, remove_context_menu, RegistryConfig};
use tracing::{debug, info};

/// Removes the context menu, every association and every ProgID.
///
/// Catalog entries are not filtered: deleting something that was never
/// written is a no-op. Nothing here fails; problems are only logged.
pub fn uninstall_all<S: KeyStore>(store: &S, config: &RegistryConfig) {
    remove_context_menu(store, config);
    info!("context menu entries removed");

    for ext in &config.file_extensions {
        // An empty entry would address Software\Classes\<app> itself.
        if ext.is_empty() {
            debug!("skipping empty catalog entry");
            continue;
        }
        let prog_id = config.prog_id(ext);
        store.delete_value_silently(&open_with_path(ext), &prog_id);
        store.delete_key_recursively(&classes_path(&[prog_id.as_str()]));
    }

    info!(
        extensions = config.file_extensions.len(),
        "file associations removed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{install_all, MemoryRegistry};

    #[test]
    fn test_uninstall_removes_install() {
        let store = MemoryRegistry::new();
        let config = RegistryConfig::new(r"C:\Zed\zed.exe", vec![".md".into(), ".rs".into()]);
        install_all(&store, &config).unwrap();

        uninstall_all(&store, &RegistryConfig::new("", config.file_extensions.clone()));

        assert!(!store.key_exists(r"Software\Classes\Zed.md"));
        assert!(!store.key_exists(r"Software\Classes\Zed.rs"));
        assert!(!store.key_exists(r"Software\Classes\*\shell\Zed"));
        assert_eq!(store.value(r"Software\Classes\.md\OpenWithProgids", "Zed.md"), None);
        // The extension key itself belongs to the system.
        assert!(store.key_exists(r"Software\Classes\.md\OpenWithProgids"));
    }

    #[test]
    fn test_uninstall_on_partial_state() {
        let store = MemoryRegistry::new();
        store.ensure_key(r"Software\Classes\Zed.md\DefaultIcon").unwrap();
        let config = RegistryConfig::new("", vec![".md".into(), ".rs".into(), "".into()]);

        uninstall_all(&store, &config);
        uninstall_all(&store, &config);

        assert!(!store.key_exists(r"Software\Classes\Zed.md"));
        assert!(store.key_exists(r"Software\Classes"));
    }

    #[test]
    fn test_uninstall_keeps_other_handlers() {
        let store = MemoryRegistry::new();
        let (list, _) = store
            .ensure_key(r"Software\Classes\.md\OpenWithProgids")
            .unwrap();
        store.set_value(&list, "Zed.md", "").unwrap();
        store.set_value(&list, "VSCode.md", "").unwrap();

        uninstall_all(&store, &RegistryConfig::new("", vec![".md".into()]));

        assert_eq!(
            store.value_names(r"Software\Classes\.md\OpenWithProgids"),
            vec!["VSCode.md"]
        );
    }
}
