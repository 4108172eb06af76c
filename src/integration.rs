//! Install and uninstall of the Explorer integration, tied to the persisted
//! installed flag.
//!
//! ```text
//!   NotInstalled --install ok--> Installed
//!   NotInstalled --install err-> NotInstalled   (flag untouched)
//!   Installed    --uninstall---> NotInstalled   (always)
//!   NotInstalled --uninstall---> NotInstalled   (no registry access unless forced)
//! ```

use crate::catalog::ExtensionCatalog;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::registry::{install_all, uninstall_all, InstallSummary, KeyStore, RegistryConfig};
use crate::validation::ensure_executable;
use tracing::info;

/// Installed flag as persisted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    NotInstalled,
    Installed,
}

/// Result of an uninstall request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The teardown ran and the flag is now cleared.
    Removed,
    /// The flag said nothing was installed; the registry was not touched.
    NothingToRemove,
}

/// Drives install and uninstall against one registry and one config file.
pub struct ShellIntegration<'a, S: KeyStore> {
    store: &'a S,
    config: &'a ConfigStore,
    catalog: ExtensionCatalog,
}

impl<'a, S: KeyStore> ShellIntegration<'a, S> {
    pub fn new(store: &'a S, config: &'a ConfigStore, catalog: ExtensionCatalog) -> Self {
        Self {
            store,
            config,
            catalog,
        }
    }

    /// Current value of the persisted flag.
    pub fn state(&self) -> Result<InstallState> {
        let config = self.config.load()?;
        Ok(if config.context_menu_enabled {
            InstallState::Installed
        } else {
            InstallState::NotInstalled
        })
    }

    /// Writes every entry and marks the integration installed.
    ///
    /// # Errors
    ///
    /// Config and executable problems are reported before the registry is
    /// touched. A registry failure stops the pass and leaves the flag as it
    /// was.
    pub fn install(&self) -> Result<InstallSummary> {
        let mut config = self.config.load()?;
        ensure_executable(config.zed_path())?;

        let registry_config =
            RegistryConfig::new(config.zed_path.clone(), self.catalog.extensions().to_vec());
        info!(
            executable = %config.zed_path,
            extensions = self.catalog.len(),
            catalog_version = self.catalog.version(),
            "installing shell integration"
        );
        let summary = install_all(self.store, &registry_config)?;

        config.context_menu_enabled = true;
        self.config.save(&config)?;
        Ok(summary)
    }

    /// Removes every entry and marks the integration not installed.
    ///
    /// Without `force`, a cleared flag short-circuits with
    /// [`UninstallOutcome::NothingToRemove`]. With it, the teardown runs
    /// regardless, which also cleans up after a failed install or manual
    /// registry edits. The executable path is not needed.
    pub fn uninstall(&self, force: bool) -> Result<UninstallOutcome> {
        let mut config = self.config.load()?;
        if !config.context_menu_enabled && !force {
            info!("shell integration not installed, nothing to remove");
            return Ok(UninstallOutcome::NothingToRemove);
        }

        let registry_config = RegistryConfig::new("", self.catalog.extensions().to_vec());
        info!(
            extensions = self.catalog.len(),
            force, "removing shell integration"
        );
        uninstall_all(self.store, &registry_config);

        config.context_menu_enabled = false;
        self.config.save(&config)?;
        Ok(UninstallOutcome::Removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::error::ZedCliError;
    use crate::registry::MemoryRegistry;
    use std::path::Path;

    fn setup(dir: &Path, exe_exists: bool) -> ConfigStore {
        let exe = dir.join("zed.exe");
        if exe_exists {
            std::fs::write(&exe, b"").unwrap();
        }
        let store = ConfigStore::at(dir.join("config.json"));
        store
            .save(&CliConfig::new(exe.to_string_lossy().into_owned()))
            .unwrap();
        store
    }

    fn catalog() -> ExtensionCatalog {
        ExtensionCatalog::from_entries(1, [".md", ".rs"])
    }

    #[test]
    fn test_install_sets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), true);
        let registry = MemoryRegistry::new();
        let shell = ShellIntegration::new(&registry, &config, catalog());

        assert_eq!(shell.state().unwrap(), InstallState::NotInstalled);
        let summary = shell.install().unwrap();
        assert_eq!(summary.registered, vec!["Zed.md", "Zed.rs"]);
        assert_eq!(shell.state().unwrap(), InstallState::Installed);
    }

    #[test]
    fn test_missing_executable_aborts_before_registry() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), false);
        let registry = MemoryRegistry::new();
        let shell = ShellIntegration::new(&registry, &config, catalog());

        assert!(matches!(
            shell.install(),
            Err(ZedCliError::ExecutablePathInvalid(_))
        ));
        assert_eq!(registry.operation_count(), 0);
        assert_eq!(shell.state().unwrap(), InstallState::NotInstalled);
    }

    #[test]
    fn test_failed_install_keeps_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), true);
        let registry = MemoryRegistry::new();
        registry.deny_writes(r"Software\Classes\Zed.rs");
        let shell = ShellIntegration::new(&registry, &config, catalog());

        assert!(shell.install().is_err());
        assert_eq!(shell.state().unwrap(), InstallState::NotInstalled);
    }

    #[test]
    fn test_uninstall_short_circuits_when_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), true);
        let registry = MemoryRegistry::new();
        let shell = ShellIntegration::new(&registry, &config, catalog());

        assert_eq!(shell.uninstall(false).unwrap(), UninstallOutcome::NothingToRemove);
        assert_eq!(registry.operation_count(), 0);
    }

    #[test]
    fn test_forced_uninstall_cleans_partial_install() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), true);
        let registry = MemoryRegistry::new();
        registry.deny_writes(r"Software\Classes\.rs");
        let shell = ShellIntegration::new(&registry, &config, catalog());
        assert!(shell.install().is_err());
        assert!(registry.key_exists(r"Software\Classes\Zed.md"));

        assert_eq!(shell.uninstall(true).unwrap(), UninstallOutcome::Removed);
        assert!(!registry.key_exists(r"Software\Classes\Zed.md"));
        assert!(!registry.key_exists(r"Software\Classes\Zed.rs"));
        assert_eq!(shell.state().unwrap(), InstallState::NotInstalled);
    }

    #[test]
    fn test_uninstall_does_not_need_executable() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path(), true);
        let registry = MemoryRegistry::new();
        let shell = ShellIntegration::new(&registry, &config, catalog());
        shell.install().unwrap();
        std::fs::remove_file(dir.path().join("zed.exe")).unwrap();

        assert_eq!(shell.uninstall(false).unwrap(), UninstallOutcome::Removed);
        assert!(!registry.key_exists(r"Software\Classes\*\shell\Zed"));
    }
}
