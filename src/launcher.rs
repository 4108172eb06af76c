//! Starts Zed, optionally on a project folder.

use crate::error::{Result, ZedCliError};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// What [`launch`] did before spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    /// The project folder did not exist and was created.
    pub created_project_dir: bool,
}

/// Spawns `executable` with `project` as its only argument, if given.
///
/// A project path that does not exist yet is created as a folder first, so
/// `zed new-project` opens an empty workspace. The child is not waited on.
pub fn launch(executable: &Path, project: Option<&Path>) -> Result<LaunchReport> {
    let mut created_project_dir = false;
    let mut command = Command::new(executable);

    if let Some(project) = project {
        if !project.exists() {
            std::fs::create_dir_all(project)?;
            created_project_dir = true;
            debug!(path = %project.display(), "created project folder");
        }
        command.arg(project);
    }

    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!(executable = %executable.display(), "starting Zed");
    command.spawn().map_err(ZedCliError::Launch)?;

    Ok(LaunchReport {
        created_project_dir,
    })
}
