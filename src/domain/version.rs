use std::cmp::Ordering;
use std::fmt;

use crate::config::ReleaseConfig;

/// Semantic version triple.
///
/// Ordered lexicographically over (major, minor, patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<&semver::Version> for Version {
    fn from(v: &semver::Version) -> Self {
        Version::new(v.major, v.minor, v.patch)
    }
}

/// A repository tag that parsed as a semantic version.
///
/// Keeps the original tag text next to the parsed value so it can be reported
/// back to the operator unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVersion {
    pub tag: String,
    pub semver: semver::Version,
}

impl TagVersion {
    /// Parse a tag as `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
    ///
    /// Returns `None` for anything else (`v1.2.3`, `1.2`, `release-1`, ...);
    /// callers drop those tags rather than treating them as errors.
    pub fn parse(tag: &str) -> Option<Self> {
        let semver = semver::Version::parse(tag.trim()).ok()?;
        Some(TagVersion {
            tag: tag.trim().to_string(),
            semver,
        })
    }

    /// The numeric triple, without pre-release or build metadata.
    pub fn version(&self) -> Version {
        Version::from(&self.semver)
    }
}

impl PartialOrd for TagVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagVersion {
    /// Semver precedence: pre-releases sort below their release, build
    /// metadata only breaks ties.
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver
            .cmp_precedence(&other.semver)
            .then_with(|| self.semver.build.cmp(&other.semver.build))
    }
}

/// Ceilings that decide when a patch bump cascades into minor or major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverPolicy {
    pub max_patch: u64,
    pub max_minor: u64,
}

impl Default for RolloverPolicy {
    fn default() -> Self {
        RolloverPolicy {
            max_patch: 40,
            max_minor: 30,
        }
    }
}

impl From<&ReleaseConfig> for RolloverPolicy {
    fn from(config: &ReleaseConfig) -> Self {
        RolloverPolicy {
            max_patch: config.max_patch,
            max_minor: config.max_minor,
        }
    }
}

impl RolloverPolicy {
    pub fn new(max_patch: u64, max_minor: u64) -> Self {
        RolloverPolicy {
            max_patch,
            max_minor,
        }
    }

    /// Compute the version that follows `current`.
    ///
    /// The ceilings are compared against the current values, patch first:
    /// - `patch >= max_patch`: minor + 1, patch reset
    /// - `minor >= max_minor`: major + 1, minor and patch reset
    /// - otherwise: patch + 1
    ///
    /// Returns `None` only if a component would overflow.
    pub fn next(&self, current: Version) -> Option<Version> {
        if current.patch >= self.max_patch {
            Some(Version::new(current.major, current.minor.checked_add(1)?, 0))
        } else if current.minor >= self.max_minor {
            Some(Version::new(current.major.checked_add(1)?, 0, 0))
        } else {
            Some(Version::new(
                current.major,
                current.minor,
                current.patch.checked_add(1)?,
            ))
        }
    }
}
