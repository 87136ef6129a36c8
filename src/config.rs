use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::NameTemplate;
use crate::error::{ReleaseError, Result};

/// Environment variable that points at a configuration file.
pub const CONFIG_ENV_VAR: &str = "GIT_RELEASE_RC_CONFIG";

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "release-rc.toml";

/// Name of the per-user configuration file inside the config directory.
pub const USER_CONFIG_FILE: &str = "git-release-rc.toml";

/// Represents the complete configuration for git-release-rc.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_main_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_max_patch() -> u64 {
    40
}

fn default_max_minor() -> u64 {
    30
}

fn default_branch_template() -> String {
    "release-{version}".to_string()
}

fn default_tag_template() -> String {
    "{version}-rc.0".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("/tmp/latest_tag_version")
}

/// Release cycle settings.
///
/// Controls where the release branch is cut from, where it is pushed, the
/// rollover ceilings and the names given to the branch and candidate tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Patch number at which the next release rolls over to a new minor
    #[serde(default = "default_max_patch")]
    pub max_patch: u64,

    /// Minor number at which the next release rolls over to a new major
    #[serde(default = "default_max_minor")]
    pub max_minor: u64,

    #[serde(default = "default_branch_template")]
    pub branch_template: String,

    #[serde(default = "default_tag_template")]
    pub tag_template: String,

    /// File that receives the candidate tag name after a successful run
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            main_branch: default_main_branch(),
            remote: default_remote(),
            max_patch: default_max_patch(),
            max_minor: default_max_minor(),
            branch_template: default_branch_template(),
            tag_template: default_tag_template(),
            output_path: default_output_path(),
        }
    }
}

impl Config {
    /// Checks values that deserialize fine but cannot drive a release.
    pub fn validate(&self) -> Result<()> {
        let release = &self.release;

        if release.max_patch == 0 {
            return Err(ReleaseError::config("max_patch must be greater than 0"));
        }
        if release.max_minor == 0 {
            return Err(ReleaseError::config("max_minor must be greater than 0"));
        }
        if release.main_branch.trim().is_empty() {
            return Err(ReleaseError::config("main_branch must not be empty"));
        }
        if release.remote.trim().is_empty() {
            return Err(ReleaseError::config("remote must not be empty"));
        }

        NameTemplate::new(release.branch_template.as_str())?;
        NameTemplate::new(release.tag_template.as_str())?;

        Ok(())
    }
}

/// Values supplied on the command line, layered over the loaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub main_branch: Option<String>,
    pub remote: Option<String>,
    pub output_path: Option<PathBuf>,
    pub max_patch: Option<u64>,
    pub max_minor: Option<u64>,
}

impl ConfigOverrides {
    /// Replace every configured value that has an override
    pub fn apply(&self, config: &mut Config) {
        let release = &mut config.release;
        if let Some(branch) = &self.main_branch {
            release.main_branch = branch.clone();
        }
        if let Some(remote) = &self.remote {
            release.remote = remote.clone();
        }
        if let Some(output) = &self.output_path {
            release.output_path = output.clone();
        }
        if let Some(max_patch) = self.max_patch {
            release.max_patch = max_patch;
        }
        if let Some(max_minor) = self.max_minor {
            release.max_minor = max_minor;
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// The result is not validated; call [Config::validate] once any
/// [ConfigOverrides] have been applied.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path named by the `GIT_RELEASE_RC_CONFIG` environment variable
/// 3. `release-rc.toml` in current directory
/// 4. `git-release-rc.toml` in the user config directory
/// 5. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_path(),
    };

    let Some(path) = path else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;

    parse_config(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parses a TOML document into a configuration.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))
}

fn discover_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let local = PathBuf::from(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
