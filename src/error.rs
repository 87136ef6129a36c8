use thiserror::Error;

/// Unified error type for git-release-rc operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No new version found: {0}")]
    NoVersion(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("git {operation} failed with exit code {code}: {stderr}")]
    CommandFailed {
        operation: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release-rc
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a "no version could be resolved" error with context
    pub fn no_version(msg: impl Into<String>) -> Self {
        ReleaseError::NoVersion(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        ReleaseError::Template(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// A failed git command propagates its own status; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}
