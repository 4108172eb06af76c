//! Persisted CLI settings.
//!
//! Stored as JSON at `<config dir>/zed-cli-win-unofficial/config.json`,
//! which is `%APPDATA%\zed-cli-win-unofficial\config.json` on Windows:
//!
//! ```json
//! { "zedPath": "C:\\...\\Zed.exe", "contextMenuEnabled": true }
//! ```

use crate::error::{Result, ZedCliError};
use crate::storage::write_file_atomic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name below the platform config dir.
pub const CONFIG_DIR_NAME: &str = "zed-cli-win-unofficial";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Absolute path to the Zed executable.
    pub zed_path: String,
    /// Whether the shell integration is believed to be installed.
    ///
    /// Written at the end of each successful install or uninstall and never
    /// checked against the registry.
    #[serde(default)]
    pub context_menu_enabled: bool,
}

impl CliConfig {
    pub fn new(zed_path: impl Into<String>) -> Self {
        Self {
            zed_path: zed_path.into(),
            context_menu_enabled: false,
        }
    }

    pub fn zed_path(&self) -> &Path {
        Path::new(&self.zed_path)
    }
}

/// Location of the config file plus load/save.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at the platform default location.
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME);
        Self { path }
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file.
    ///
    /// # Errors
    ///
    /// [`ZedCliError::ConfigUnavailable`] if the file is missing or
    /// unreadable, [`ZedCliError::ConfigFormat`] if it is not valid JSON.
    pub fn load(&self) -> Result<CliConfig> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| ZedCliError::ConfigUnavailable {
                path: self.path.clone(),
                source,
            })?;
        let config = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), "config loaded");
        Ok(config)
    }

    /// Writes the config file, creating its directory if needed.
    pub fn save(&self, config: &CliConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(config)?;
        write_file_atomic(&self.path, contents.as_bytes())?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Loads, updates the installed flag, saves.
    pub fn set_context_menu_enabled(&self, enabled: bool) -> Result<CliConfig> {
        let mut config = self.load()?;
        config.context_menu_enabled = enabled;
        self.save(&config)?;
        Ok(config)
    }

    /// Records a validated executable path and saves.
    ///
    /// The installed flag is kept, so a later uninstall still runs; a new
    /// config starts with it cleared. A config that cannot be parsed is
    /// replaced.
    pub fn set_executable(&self, resolved: &Path) -> Result<CliConfig> {
        let mut config = match self.load() {
            Ok(config) => config,
            Err(ZedCliError::ConfigUnavailable { .. }) => CliConfig::default(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "config file unreadable, replacing it"
                );
                CliConfig::default()
            }
        };
        config.zed_path = resolved.to_string_lossy().into_owned();
        self.save(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema() {
        let config = CliConfig {
            zed_path: r"C:\Zed\zed.exe".to_string(),
            context_menu_enabled: true,
        };
        let json: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(json["zedPath"], r"C:\Zed\zed.exe");
        assert_eq!(json["contextMenuEnabled"], true);
    }

    #[test]
    fn test_missing_flag_defaults_to_false() {
        let config: CliConfig = serde_json::from_str(r#"{"zedPath": "zed.exe"}"#).unwrap();
        assert!(!config.context_menu_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested").join(CONFIG_FILE_NAME));

        store.save(&CliConfig::new("/opt/zed/zed")).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, CliConfig::new("/opt/zed/zed"));

        let updated = store.set_context_menu_enabled(true).unwrap();
        assert!(updated.context_menu_enabled);
        assert!(store.load().unwrap().context_menu_enabled);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(CONFIG_FILE_NAME));
        assert!(matches!(
            store.load(),
            Err(ZedCliError::ConfigUnavailable { .. })
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ConfigStore::at(path).load(),
            Err(ZedCliError::ConfigFormat(_))
        ));
    }

    #[test]
    fn test_set_executable_keeps_installed_flag() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join(CONFIG_FILE_NAME));
        store.save(&CliConfig::new("/old/zed")).unwrap();
        store.set_context_menu_enabled(true).unwrap();

        let updated = store.set_executable(Path::new("/new/zed")).unwrap();
        assert_eq!(updated.zed_path, "/new/zed");
        assert!(updated.context_menu_enabled);
        assert_eq!(store.load().unwrap(), updated);
    }

    #[test]
    fn test_set_executable_creates_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested").join(CONFIG_FILE_NAME));

        let created = store.set_executable(Path::new("/opt/zed/zed")).unwrap();
        assert_eq!(created, CliConfig::new("/opt/zed/zed"));
        assert!(!store.load().unwrap().context_menu_enabled);
    }

    #[test]
    fn test_set_executable_replaces_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        let store = ConfigStore::at(path);

        store.set_executable(Path::new("/opt/zed/zed")).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.zed_path, "/opt/zed/zed");
        assert!(!loaded.context_menu_enabled);
    }

    #[test]
    fn test_default_location_file_name() {
        let store = ConfigStore::default_location();
        assert!(store.path().ends_with(Path::new(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)));
    }
}
