use crate::domain::{RolloverPolicy, TagVersion, Version};
use crate::error::{ReleaseError, Result};
use crate::git::{CommandRunner, GitOperation};

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// Every tag the repository reported, in listing order
    pub tags: Vec<String>,
    /// Tags dropped because they are not semantic versions
    pub skipped: Vec<String>,
    /// Highest tag by semver precedence
    pub latest: TagVersion,
    /// Version the next release will carry
    pub next: Version,
}

/// Determines the next release version from the repository's tags
pub struct VersionResolver {
    policy: RolloverPolicy,
}

impl VersionResolver {
    /// Create a new version resolver
    pub fn new(policy: RolloverPolicy) -> Self {
        VersionResolver { policy }
    }

    /// List tags through `runner` and compute the next version.
    ///
    /// Every way of not finding a version (listing failed, no tags, no tag
    /// parses) is reported as [ReleaseError::NoVersion].
    pub fn resolve_next_version<R: CommandRunner>(&self, runner: &R) -> Result<ResolvedVersion> {
        let operation = GitOperation::ListTags;
        let output = runner.run(&operation)?;
        if !output.success() {
            return Err(ReleaseError::no_version(format!(
                "listing tags failed: {}",
                output.stderr.trim()
            )));
        }

        let tags: Vec<String> = output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        tracing::info!(?tags, "version tags");

        self.resolve_from_tags(tags)
    }

    /// Compute the next version from an already retrieved tag list
    pub fn resolve_from_tags(&self, tags: Vec<String>) -> Result<ResolvedVersion> {
        if tags.is_empty() {
            return Err(ReleaseError::no_version("got none of the tags"));
        }

        let mut skipped = Vec::new();
        let mut versions = Vec::with_capacity(tags.len());
        for tag in &tags {
            match TagVersion::parse(tag) {
                Some(version) => versions.push(version),
                None => {
                    tracing::debug!(tag = %tag, "skipping tag that is not a semantic version");
                    skipped.push(tag.clone());
                }
            }
        }

        let latest = versions
            .into_iter()
            .max()
            .ok_or_else(|| ReleaseError::no_version("none of the tags is a semantic version"))?;
        tracing::info!(latest = %latest.tag, "got latest version");

        let next = self.policy.next(latest.version()).ok_or_else(|| {
            ReleaseError::no_version(format!("cannot increment {} without overflow", latest.tag))
        })?;

        Ok(ResolvedVersion {
            tags,
            skipped,
            latest,
            next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRunner;

    fn resolver() -> VersionResolver {
        VersionResolver::new(RolloverPolicy::default())
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_picks_maximum_not_last() {
        let resolved = resolver()
            .resolve_from_tags(tags(&["1.10.0", "1.2.0", "1.9.7"]))
            .unwrap();
        assert_eq!(resolved.latest.tag, "1.10.0");
        assert_eq!(resolved.next, Version::new(1, 10, 1));
    }

    #[test]
    fn test_release_beats_its_candidate() {
        let resolved = resolver()
            .resolve_from_tags(tags(&["2.0.0", "2.0.0-rc.0", "1.99.0"]))
            .unwrap();
        assert_eq!(resolved.latest.tag, "2.0.0");
    }

    #[test]
    fn test_candidate_is_latest_when_newest() {
        let resolved = resolver()
            .resolve_from_tags(tags(&["0.9.39", "0.9.40-rc.0"]))
            .unwrap();
        assert_eq!(resolved.latest.tag, "0.9.40-rc.0");
        assert_eq!(resolved.next, Version::new(0, 10, 0));
    }

    #[test]
    fn test_skipped_tags_are_reported() {
        let resolved = resolver()
            .resolve_from_tags(tags(&["v1.0.0", "1.0.0", "nightly"]))
            .unwrap();
        assert_eq!(resolved.skipped, tags(&["v1.0.0", "nightly"]));
        assert_eq!(resolved.next, Version::new(1, 0, 1));
    }

    #[test]
    fn test_empty_tag_list() {
        let err = resolver()
            .resolve_from_tags(Vec::new())
            .unwrap_err();
        assert!(matches!(err, ReleaseError::NoVersion(_)));
    }

    #[test]
    fn test_all_tags_unparseable() {
        let err = resolver()
            .resolve_from_tags(tags(&["not-a-version", "v"]))
            .unwrap_err();
        assert!(matches!(err, ReleaseError::NoVersion(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_blank_listing_is_empty() {
        let runner = MockRunner::with_tags(["", "  "]);
        let err = resolver()
            .resolve_next_version(&runner)
            .unwrap_err();
        assert!(err.to_string().contains("got none of the tags"));
    }

    #[test]
    fn test_listing_failure_surfaces_stderr() {
        let mut runner = MockRunner::new();
        runner.fail(
            GitOperation::ListTags,
            128,
            "fatal: not a git repository\n",
        );

        let err = resolver()
            .resolve_next_version(&runner)
            .unwrap_err();
        assert!(matches!(err, ReleaseError::NoVersion(_)));
        assert!(err.to_string().contains("fatal: not a git repository"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_custom_policy_applies() {
        let resolved = VersionResolver::new(RolloverPolicy::new(5, 3))
            .resolve_from_tags(tags(&["0.2.5"]))
            .unwrap();
        assert_eq!(resolved.next, Version::new(0, 3, 0));
    }
}
