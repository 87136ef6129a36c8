use std::sync::OnceLock;

use regex::Regex;

use crate::config::ReleaseConfig;
use crate::domain::Version;
use crate::error::{ReleaseError, Result};

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{(major|minor|patch|version)\}").expect("placeholder regex is valid")
    })
}

/// Naming pattern for a release ref (e.g. "release-{version}", "{major}.{minor}.x")
///
/// Recognised placeholders are `{major}`, `{minor}`, `{patch}` and
/// `{version}` (shorthand for `{major}.{minor}.{patch}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    pub pattern: String,
}

impl NameTemplate {
    /// Create a template, rejecting patterns without any placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !placeholder_regex().is_match(&pattern) {
            return Err(ReleaseError::template(format!(
                "'{}' must contain one of {{major}}, {{minor}}, {{patch}} or {{version}}",
                pattern
            )));
        }
        Ok(NameTemplate { pattern })
    }

    /// Substitute the version components into the pattern
    pub fn render(&self, version: &Version) -> String {
        placeholder_regex()
            .replace_all(&self.pattern, |caps: &regex::Captures<'_>| match &caps[1] {
                "major" => version.major.to_string(),
                "minor" => version.minor.to_string(),
                "patch" => version.patch.to_string(),
                _ => version.to_string(),
            })
            .into_owned()
    }
}

/// Branch and tag names for one release cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    pub version: Version,
    pub branch: String,
    pub tag: String,
}

impl ReleaseDescriptor {
    /// Names using the stock `release-X.Y.Z` / `X.Y.Z-rc.0` layout
    #[cfg(test)]
    pub fn new(version: Version) -> Self {
        ReleaseDescriptor {
            version,
            branch: format!("release-{}", version),
            tag: format!("{}-rc.0", version),
        }
    }

    /// Names rendered from the configured templates
    pub fn from_config(version: Version, config: &ReleaseConfig) -> Result<Self> {
        let branch = NameTemplate::new(config.branch_template.as_str())?.render(&version);
        let tag = NameTemplate::new(config.tag_template.as_str())?.render(&version);

        Ok(ReleaseDescriptor {
            version,
            branch,
            tag,
        })
    }
}
