use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;

use crate::error::{ReleaseError, Result};
use crate::git::{CommandOutput, CommandRunner, GitOperation};

/// Runs operations through the system `git` binary.
///
/// Shelling out keeps the user's git config, SSH agent and credential helpers
/// in play for the pushes.
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Discover the repository containing `path` and run commands at its root
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| ReleaseError::config("repository is bare, a working tree is required"))?
            .to_path_buf();

        tracing::debug!(workdir = %workdir.display(), "discovered git repository");
        Ok(GitCli { workdir })
    }

    /// Run commands in `workdir` without checking that it is a repository
    #[cfg(test)]
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl CommandRunner for GitCli {
    fn run(&self, operation: &GitOperation) -> Result<CommandOutput> {
        if operation.is_mutating() {
            tracing::info!(command = %operation, "running");
        } else {
            tracing::debug!(command = %operation, "running");
        }

        let output = Command::new("git")
            .args(operation.args())
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| ReleaseError::Spawn {
                operation: operation.name().to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(command = %operation, status = ?result.status, "finished");
        Ok(result)
    }
}
