//! Unofficial Windows command line for the Zed editor.
//!
//! Besides launching Zed and remembering where it is installed, the crate
//! manages Zed's File Explorer integration for the current user:
//!
//! - "Open with Zed" on files, folders and folder backgrounds,
//! - a ProgID per source file extension (`Zed.rs`, `Zed.md`, ...),
//! - the matching `OpenWithProgids` entries.
//!
//! All registry access goes through [`registry::KeyStore`], implemented by
//! [`registry::WinRegistry`] on Windows and by the in-memory
//! [`registry::MemoryRegistry`] used in tests.
//!
//! # Example
//!
//! ```no_run
//! use zed_win::{ConfigStore, ExtensionCatalog, MemoryRegistry, ShellIntegration};
//!
//! let config = ConfigStore::default_location();
//! let registry = MemoryRegistry::new();
//! let shell = ShellIntegration::new(&registry, &config, ExtensionCatalog::builtin()?);
//! shell.install()?;
//! # Ok::<(), zed_win::ZedCliError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod integration;
pub mod launcher;
pub mod logging;
pub mod registry;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use catalog::ExtensionCatalog;
pub use config::{CliConfig, ConfigStore};
pub use error::{Result, ZedCliError};
pub use integration::{InstallState, ShellIntegration, UninstallOutcome};
pub use registry::{InstallSummary, KeyStore, MemoryRegistry, RegistryConfig};
#[cfg(windows)]
pub use registry::WinRegistry;
