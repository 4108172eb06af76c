//! Generic "Open with Zed" verbs shown for every file, every folder and the
//! empty area of an open folder.

use super::store::KeyStore;
use super::{
    classes_path, RegistryConfig, CURRENT_FOLDER_PLACEHOLDER, SELECTED_ITEM_PLACEHOLDER,
};
use crate::error::{Result, ZedCliError};
use tracing::{debug, warn};

/// Where a context menu verb is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScope {
    /// Right-click on any file (`*`).
    AllFiles,
    /// Right-click on a folder.
    Directory,
    /// Right-click on the background of an open folder.
    DirectoryBackground,
}

impl MenuScope {
    pub const ALL: [MenuScope; 3] = [
        MenuScope::AllFiles,
        MenuScope::Directory,
        MenuScope::DirectoryBackground,
    ];

    /// Class key the verb lives under.
    pub fn class(self) -> &'static str {
        match self {
            MenuScope::AllFiles => "*",
            MenuScope::Directory => "Directory",
            MenuScope::DirectoryBackground => r"Directory\Background",
        }
    }

    /// Argument Explorer substitutes into the command.
    ///
    /// `%1` is empty when the menu is opened on a folder background, so that
    /// scope must use `%V` (the folder being shown).
    pub fn placeholder(self) -> &'static str {
        match self {
            MenuScope::AllFiles | MenuScope::Directory => SELECTED_ITEM_PLACEHOLDER,
            MenuScope::DirectoryBackground => CURRENT_FOLDER_PLACEHOLDER,
        }
    }

    /// `Software\Classes\<scope>\shell\<app>`
    pub fn verb_path(self, app_name: &str) -> String {
        classes_path(&[self.class(), "shell", app_name])
    }

    fn label(self) -> &'static str {
        match self {
            MenuScope::AllFiles => "all files",
            MenuScope::Directory => "directories",
            MenuScope::DirectoryBackground => "directory background",
        }
    }
}

/// Creates the verb for all three scopes, stopping at the first failure.
pub fn install_context_menu<S: KeyStore>(store: &S, config: &RegistryConfig) -> Result<()> {
    for scope in MenuScope::ALL {
        install_scope(store, config, scope)?;
        debug!(scope = scope.label(), "context menu entry created");
    }
    Ok(())
}

fn install_scope<S: KeyStore>(store: &S, config: &RegistryConfig, scope: MenuScope) -> Result<()> {
    let target = format!("context menu for {}", scope.label());
    let verb_path = scope.verb_path(&config.app_name);

    {
        let (verb, _) = store
            .ensure_key(&verb_path)
            .map_err(|e| ZedCliError::registry(&target, "shell key", e))?;
        store
            .set_value(&verb, "", &config.generic_menu_text)
            .map_err(|e| ZedCliError::registry(&target, "menu text", e))?;

        if let Err(e) = store.set_value(&verb, "Icon", &config.quoted_executable()) {
            warn!(scope = scope.label(), error = %e, "failed to set context menu icon");
        }
    }

    let (command, _) = store
        .ensure_key(&format!("{}\\command", verb_path))
        .map_err(|e| ZedCliError::registry(&target, "command key", e))?;
    store
        .set_value(&command, "", &config.command_line(scope.placeholder()))
        .map_err(|e| ZedCliError::registry(&target, "command value", e))?;

    Ok(())
}

/// Removes the verb from all three scopes. Missing entries are ignored.
pub fn remove_context_menu<S: KeyStore>(store: &S, config: &RegistryConfig) {
    for scope in MenuScope::ALL {
        store.delete_key_recursively(&scope.verb_path(&config.app_name));
    }
}
