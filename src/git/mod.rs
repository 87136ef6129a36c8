//! Git command abstraction layer
//!
//! Every interaction with version control goes through the [CommandRunner]
//! trait: one call runs one [GitOperation] and hands back its status and
//! captured output. Implementations:
//!
//! - [cli::GitCli]: shells out to the system `git` binary
//! - [mock::MockRunner]: scripted responses for tests
//!
//! ```rust
//! # use git_release_rc::git::{CommandRunner, GitOperation};
//! # fn example<R: CommandRunner>(runner: &R) -> git_release_rc::Result<()> {
//! let output = runner.run(&GitOperation::ListTags)?;
//! if output.success() {
//!     println!("{}", output.stdout);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockRunner;

use std::fmt;

use crate::error::{ReleaseError, Result};

/// A single git invocation used by the release cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GitOperation {
    /// `git --no-pager tag -l`
    ListTags,
    /// `git checkout <branch>`
    Checkout { branch: String },
    /// `git checkout -b <branch>`
    CreateBranch { branch: String },
    /// `git push <remote> <refname>`
    Push { remote: String, refname: String },
    /// `git tag <tag>` (lightweight, at HEAD)
    CreateTag { tag: String },
}

impl GitOperation {
    /// Arguments passed to `git`
    pub fn args(&self) -> Vec<String> {
        match self {
            GitOperation::ListTags => vec!["--no-pager".into(), "tag".into(), "-l".into()],
            GitOperation::Checkout { branch } => vec!["checkout".into(), branch.clone()],
            GitOperation::CreateBranch { branch } => {
                vec!["checkout".into(), "-b".into(), branch.clone()]
            }
            GitOperation::Push { remote, refname } => {
                vec!["push".into(), remote.clone(), refname.clone()]
            }
            GitOperation::CreateTag { tag } => vec!["tag".into(), tag.clone()],
        }
    }

    /// Short label used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            GitOperation::ListTags => "tag -l",
            GitOperation::Checkout { .. } => "checkout",
            GitOperation::CreateBranch { .. } => "checkout -b",
            GitOperation::Push { .. } => "push",
            GitOperation::CreateTag { .. } => "tag",
        }
    }

    /// Whether running this operation changes local or remote state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, GitOperation::ListTags)
    }
}

impl fmt::Display for GitOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args().join(" "))
    }
}

/// Completion status and captured streams of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero-status result with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        CommandOutput {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given status and stderr
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero status into [ReleaseError::CommandFailed].
    ///
    /// Signal termination has no status of its own and is reported as 1.
    pub fn into_result(self, operation: &GitOperation) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }

        Err(ReleaseError::CommandFailed {
            operation: operation.name().to_string(),
            code: self.status.filter(|code| *code != 0).unwrap_or(1),
            stderr: self.stderr.trim().to_string(),
        })
    }
}

/// Capability to run git operations.
///
/// Implementations return `Err` only when the command could not be started at
/// all; a command that ran and exited non-zero is an `Ok` with that status, so
/// callers decide how to treat it.
pub trait CommandRunner {
    fn run(&self, operation: &GitOperation) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, operation: &GitOperation) -> Result<CommandOutput> {
        (**self).run(operation)
    }
}
