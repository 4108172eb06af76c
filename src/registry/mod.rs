//! Explorer shell integration under `HKEY_CURRENT_USER\Software\Classes`.
//!
//! Three kinds of entries are managed:
//!
//! - generic "Open with Zed" verbs for all files, directories and the
//!   directory background ([`context_menu`]),
//! - one ProgID per file extension, e.g. `Zed.md` ([`progid`]),
//! - an `OpenWithProgids` value linking each extension to its ProgID
//!   ([`association`]).
//!
//! Every operation goes through a [`KeyStore`], so the same code drives the
//! real registry on Windows and [`MemoryRegistry`] everywhere else.

pub mod association;
pub mod context_menu;
pub mod install;
pub mod memory;
pub mod progid;
pub mod store;
pub mod uninstall;

#[cfg(windows)]
pub mod windows;

pub use association::associate_extension;
pub use context_menu::{install_context_menu, remove_context_menu, MenuScope};
pub use install::{install_all, is_extension_like, InstallSummary};
pub use memory::{MemoryKey, MemoryRegistry};
pub use progid::register_prog_id;
pub use store::KeyStore;
pub use uninstall::uninstall_all;

#[cfg(windows)]
pub use self::windows::WinRegistry;

/// Root of per-user class registrations, relative to `HKEY_CURRENT_USER`.
pub const CLASSES_ROOT: &str = r"Software\Classes";

/// Display name and key prefix for every entry.
pub const APP_NAME: &str = "Zed";

/// Context menu label; `&` marks the accelerator key.
pub const GENERIC_MENU_TEXT: &str = "Open w&ith Zed";

/// Per-ProgID description; `%s` receives the uppercased extension.
pub const FILE_TYPE_DESCRIPTION: &str = "%s Source File (Zed)";

/// Placeholder Explorer replaces with the clicked file or folder.
pub const SELECTED_ITEM_PLACEHOLDER: &str = "%1";

/// Placeholder Explorer replaces with the folder being viewed.
pub const CURRENT_FOLDER_PLACEHOLDER: &str = "%V";

/// Everything needed to write or remove the registry entries for one run.
///
/// Built fresh for each install or uninstall from the configured executable
/// path and the extension catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub app_name: String,
    pub executable_path: String,
    pub app_user_model_id: String,
    pub generic_menu_text: String,
    pub file_extensions: Vec<String>,
    pub per_file_type_description: String,
}

impl RegistryConfig {
    /// Creates the standard Zed configuration.
    ///
    /// Uninstall passes an empty executable path; nothing it does reads it.
    pub fn new(executable_path: impl Into<String>, file_extensions: Vec<String>) -> Self {
        let executable_path = executable_path.into();
        Self {
            app_name: APP_NAME.to_string(),
            app_user_model_id: executable_path.clone(),
            executable_path,
            generic_menu_text: GENERIC_MENU_TEXT.to_string(),
            file_extensions,
            per_file_type_description: FILE_TYPE_DESCRIPTION.to_string(),
        }
    }

    /// ProgID for an extension: the app name followed by the dotted extension.
    pub fn prog_id(&self, ext: &str) -> String {
        format!("{}{}", self.app_name, ext)
    }

    /// Executable path wrapped in double quotes, used for icons.
    pub fn quoted_executable(&self) -> String {
        format!("\"{}\"", self.executable_path)
    }

    /// Shell command line launching the executable with `placeholder`.
    pub fn command_line(&self, placeholder: &str) -> String {
        format!("\"{}\" \"{}\"", self.executable_path, placeholder)
    }

    /// File type description shown by Explorer, e.g. `PY Source File (Zed)`.
    pub fn describe(&self, ext: &str) -> String {
        let label = ext.strip_prefix('.').unwrap_or(ext).to_uppercase();
        self.per_file_type_description.replacen("%s", &label, 1)
    }
}

/// Joins path components below [`CLASSES_ROOT`].
pub fn classes_path(components: &[&str]) -> String {
    let mut path = String::from(CLASSES_ROOT);
    for component in components {
        path.push('\\');
        path.push_str(component);
    }
    path
}
