// Zed's unofficial Windows CLI
//
// Usage:
//   zed [PATH]                 - Open Zed, optionally on a file or folder
//   zed config set <PATH>      - Remember where zed.exe lives
//   zed config get             - Show the remembered path
//   zed context install        - Add "Open with Zed" and file associations
//   zed context uninstall      - Remove them again
//
// Every command exits with status 0; failures are reported on the console.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zed_win::integration::{ShellIntegration, UninstallOutcome};
use zed_win::launcher::launch;
use zed_win::validation::{ensure_executable, validate_executable};
use zed_win::{logging, CliConfig, ConfigStore, ExtensionCatalog, KeyStore, ZedCliError};

#[derive(Parser, Debug)]
#[command(
    name = "zed",
    author,
    version,
    about = "Zed's Unofficial Windows CLI",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Print diagnostic output to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// File or folder to open; missing folders are created
    path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure the CLI's path and settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Configure "Open with Zed" in the Explorer context menu
    Context {
        #[command(subcommand)]
        command: ContextCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Set the path to the Zed executable (may start with %VAR%)
    Set {
        /// Path to zed.exe
        path: Option<String>,
    },
    /// Show the configured path to the Zed executable
    Get,
}

#[derive(Subcommand, Debug)]
enum ContextCommand {
    /// Install "Open with Zed" and the file associations
    Install {
        /// Extension catalog to use instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Remove "Open with Zed" and the file associations
    Uninstall {
        /// Extension catalog to use instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Run the removal even if the config says nothing is installed
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return;
        }
    };

    logging::init(cli.verbose);
    let config = ConfigStore::default_location();

    match cli.command {
        Some(Commands::Config { command }) => config_command(command, &config),
        Some(Commands::Context { command }) => context_command(command, &config),
        None => open_command(cli.path, &config),
    }
}

fn open_command(path: Option<PathBuf>, config: &ConfigStore) {
    let settings = match load_with_executable(config) {
        Ok(settings) => settings,
        Err(e) => return report(&e),
    };

    match launch(settings.zed_path(), path.as_deref()) {
        Ok(outcome) => {
            if let (true, Some(path)) = (outcome.created_project_dir, path.as_deref()) {
                println!("Created new folder: {}", path.display());
            }
            println!("✓ Zed opened successfully");
        }
        Err(e) => report(&e),
    }
}

fn config_command(command: ConfigCommand, config: &ConfigStore) {
    match command {
        ConfigCommand::Set { path: None } => {
            eprintln!("Error: No path provided.");
            println!("Usage: zed config set <path-to-zed.exe>");
        }
        ConfigCommand::Set { path: Some(path) } => {
            let resolved = match validate_executable(&path) {
                Ok(resolved) => resolved,
                Err(e) => return report(&e),
            };

            if let Err(e) = config.set_executable(&resolved) {
                return report(&e);
            }

            println!("✓ Zed path configured: {}", resolved.display());
            println!("Config saved at: {}", config.path().display());
            println!("You may want to run `zed context install` to set up or update context menus.");
        }
        ConfigCommand::Get => match load_with_executable(config) {
            Ok(settings) => println!("✓ Zed is configured at: {}", settings.zed_path),
            Err(e) => report(&e),
        },
    }
}

#[cfg(windows)]
fn context_command(command: ContextCommand, config: &ConfigStore) {
    let registry = zed_win::WinRegistry::current_user();
    run_context(command, &registry, config);
}

#[cfg(not(windows))]
fn context_command(_command: ContextCommand, _config: &ConfigStore) {
    report(&ZedCliError::UnsupportedPlatform);
}

#[cfg_attr(not(windows), allow(dead_code))]
fn run_context<S: KeyStore>(command: ContextCommand, registry: &S, config: &ConfigStore) {
    match command {
        ContextCommand::Install { catalog } => {
            let catalog = match load_catalog(catalog) {
                Ok(catalog) => catalog,
                Err(e) => return report(&e),
            };
            println!("Setting up Zed context menu and file associations...");

            match ShellIntegration::new(registry, config, catalog).install() {
                Ok(summary) => {
                    println!("✓ Zed context menu and file associations setup complete!");
                    println!("  - {} file types registered", summary.registered.len());
                    if !summary.skipped.is_empty() {
                        println!("  - {} invalid entries skipped", summary.skipped.len());
                    }
                    println!("Optional: Restart Explorer (rarely necessary for current user changes).");
                    println!("To remove these entries, run: zed context uninstall");
                }
                Err(e) => report(&e),
            }
        }
        ContextCommand::Uninstall { catalog, force } => {
            let catalog = match load_catalog(catalog) {
                Ok(catalog) => catalog,
                Err(e) => return report(&e),
            };

            match ShellIntegration::new(registry, config, catalog).uninstall(force) {
                Ok(UninstallOutcome::Removed) => {
                    println!("✓ Zed context menu and file associations removed successfully.");
                }
                Ok(UninstallOutcome::NothingToRemove) => {
                    println!("Zed context menu is not installed. Nothing to remove.");
                    println!("Use `zed context uninstall --force` to clean up anyway.");
                }
                Err(e) => report(&e),
            }
        }
    }
}

fn load_with_executable(config: &ConfigStore) -> zed_win::Result<CliConfig> {
    let settings = config.load()?;
    ensure_executable(settings.zed_path())?;
    Ok(settings)
}

#[cfg_attr(not(windows), allow(dead_code))]
fn load_catalog(path: Option<PathBuf>) -> zed_win::Result<ExtensionCatalog> {
    match path {
        Some(path) => ExtensionCatalog::load(&path),
        None => ExtensionCatalog::builtin(),
    }
}

/// Prints an error with a hint for the ones the user can fix.
fn report(error: &ZedCliError) {
    eprintln!("Error: {}", error);
    match error {
        ZedCliError::ConfigUnavailable { .. } | ZedCliError::ConfigFormat(_) => {
            println!("Tip: Run `zed config set <path>` to configure the Zed executable path.");
        }
        ZedCliError::ExecutablePathInvalid(_) | ZedCliError::PathResolution(_) => {
            println!("Tip: Run `zed config set <path>` to update the path.");
        }
        _ => {}
    }
}
