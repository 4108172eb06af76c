//! Per-extension file type identity (ProgID), e.g. `Software\Classes\Zed.md`.

use super::store::KeyStore;
use super::{classes_path, RegistryConfig, SELECTED_ITEM_PLACEHOLDER};
use crate::error::{Result, ZedCliError};

/// Writes the ProgID subtree for `ext` and returns the ProgID.
///
/// Layout:
///
/// ```text
/// Zed.md                  (default) = "MD Source File (Zed)", AppUserModelID = <exe>
/// Zed.md\DefaultIcon      (default) = "<exe>"
/// Zed.md\shell\open       Icon      = "<exe>"
/// Zed.md\shell\open\command (default) = "<exe>" "%1"
/// ```
///
/// Keys created before a failing step are left in place; uninstall cleans
/// them up.
pub fn register_prog_id<S: KeyStore>(
    store: &S,
    config: &RegistryConfig,
    ext: &str,
) -> Result<String> {
    let prog_id = config.prog_id(ext);
    let root_path = classes_path(&[prog_id.as_str()]);
    let icon = config.quoted_executable();
    let fail = |step: &'static str| {
        let prog_id = prog_id.clone();
        move |e: std::io::Error| ZedCliError::registry(prog_id, step, e)
    };

    {
        let (root, _) = store.ensure_key(&root_path).map_err(fail("ProgID key"))?;
        store
            .set_value(&root, "", &config.describe(ext))
            .map_err(fail("description"))?;
        store
            .set_value(&root, "AppUserModelID", &config.app_user_model_id)
            .map_err(fail("AppUserModelID"))?;
    }

    {
        let (default_icon, _) = store
            .ensure_key(&format!("{}\\DefaultIcon", root_path))
            .map_err(fail("DefaultIcon key"))?;
        store
            .set_value(&default_icon, "", &icon)
            .map_err(fail("DefaultIcon value"))?;
    }

    let open_path = format!("{}\\shell\\open", root_path);
    {
        let (open, _) = store.ensure_key(&open_path).map_err(fail("shell\\open key"))?;
        store
            .set_value(&open, "Icon", &icon)
            .map_err(fail("shell\\open icon"))?;
    }

    let (command, _) = store
        .ensure_key(&format!("{}\\command", open_path))
        .map_err(fail("shell\\open\\command key"))?;
    store
        .set_value(&command, "", &config.command_line(SELECTED_ITEM_PLACEHOLDER))
        .map_err(fail("shell\\open\\command value"))?;

    Ok(prog_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    #[test]
    fn test_register_writes_full_subtree() {
        let store = MemoryRegistry::new();
        let config = RegistryConfig::new(r"C:\Zed\zed.exe", Vec::new());

        let prog_id = register_prog_id(&store, &config, ".py").unwrap();
        assert_eq!(prog_id, "Zed.py");

        let root = r"Software\Classes\Zed.py";
        assert_eq!(store.value(root, "").as_deref(), Some("PY Source File (Zed)"));
        assert_eq!(store.value(root, "AppUserModelID").as_deref(), Some(r"C:\Zed\zed.exe"));
        assert_eq!(
            store.value(&format!("{}\\DefaultIcon", root), "").as_deref(),
            Some(r#""C:\Zed\zed.exe""#)
        );
        assert_eq!(
            store.value(&format!("{}\\shell\\open", root), "Icon").as_deref(),
            Some(r#""C:\Zed\zed.exe""#)
        );
        assert_eq!(
            store.value(&format!("{}\\shell\\open\\command", root), "").as_deref(),
            Some(r#""C:\Zed\zed.exe" "%1""#)
        );
    }

    #[test]
    fn test_register_is_repeatable() {
        let store = MemoryRegistry::new();
        let config = RegistryConfig::new(r"C:\Zed\zed.exe", Vec::new());
        register_prog_id(&store, &config, ".md").unwrap();
        let keys = store.key_count();
        register_prog_id(&store, &config, ".md").unwrap();
        assert_eq!(store.key_count(), keys);
    }

    #[test]
    fn test_failure_names_prog_id_and_keeps_parents() {
        let store = MemoryRegistry::new();
        store.deny_writes(r"Software\Classes\Zed.rs\shell");
        let config = RegistryConfig::new(r"C:\Zed\zed.exe", Vec::new());

        let err = register_prog_id(&store, &config, ".rs").unwrap_err();
        match err {
            ZedCliError::RegistryAccess { target, step, .. } => {
                assert_eq!(target, "Zed.rs");
                assert_eq!(step, "shell\\open key");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.key_exists(r"Software\Classes\Zed.rs\DefaultIcon"));
    }
}
