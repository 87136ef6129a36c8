//! Release workflow orchestration
//!
//! Resolves the next version, then publishes it: checkout main, create the
//! release branch, push it, tag the candidate, push the tag, and finally write
//! the tag name to the handoff file. The first failing step ends the run and
//! nothing already done is undone.

use std::fs;
use std::path::PathBuf;

use crate::analyzer::VersionResolver;
use crate::config::Config;
use crate::domain::{ReleaseDescriptor, RolloverPolicy};
use crate::error::Result;
use crate::git::{CommandRunner, GitOperation};
use crate::ui;

/// Arguments for the release workflow
///
/// Kept separate from the clap `Args` so the workflow can be driven
/// programmatically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Resolve and print the plan without running mutating commands
    pub dry_run: bool,
}

/// Result of a completed release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub release: ReleaseDescriptor,

    /// Operations that ran to completion, in order
    pub executed: Vec<GitOperation>,

    /// Where the candidate tag was recorded, `None` on a dry run
    pub handoff_path: Option<PathBuf>,
}

/// The publish sequence for `release`, in execution order
pub fn release_operations(release: &ReleaseDescriptor, config: &Config) -> Vec<GitOperation> {
    let remote = &config.release.remote;

    vec![
        GitOperation::Checkout {
            branch: config.release.main_branch.clone(),
        },
        GitOperation::CreateBranch {
            branch: release.branch.clone(),
        },
        GitOperation::Push {
            remote: remote.clone(),
            refname: release.branch.clone(),
        },
        GitOperation::CreateTag {
            tag: release.tag.clone(),
        },
        GitOperation::Push {
            remote: remote.clone(),
            refname: release.tag.clone(),
        },
    ]
}

/// Run one release cycle against `runner`.
///
/// # Returns
/// * `Ok(WorkflowResult)` - every step succeeded (or dry run completed)
/// * `Err(NoVersion)` - nothing to release from
/// * `Err(CommandFailed)` - a git step exited non-zero; later steps were skipped
pub fn run_release_workflow<R: CommandRunner>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    runner: &R,
) -> Result<WorkflowResult> {
    let resolver = VersionResolver::new(RolloverPolicy::from(&config.release));
    let resolved = resolver.resolve_next_version(runner)?;
    ui::display_resolution(&resolved);

    let release = ReleaseDescriptor::from_config(resolved.next, &config.release)?;
    ui::display_release(&release);

    let operations = release_operations(&release, config);

    if args.dry_run {
        ui::display_dry_run_plan(&operations);
        return Ok(WorkflowResult {
            release,
            executed: Vec::new(),
            handoff_path: None,
        });
    }

    let mut executed = Vec::with_capacity(operations.len());
    for operation in operations {
        ui::display_status(&operation.to_string());
        runner.run(&operation)?.into_result(&operation)?;
        tracing::info!(command = %operation, "completed");
        executed.push(operation);
    }

    let handoff_path = config.release.output_path.clone();
    fs::write(&handoff_path, &release.tag)?;
    tracing::debug!(path = %handoff_path.display(), tag = %release.tag, "wrote handoff file");

    ui::display_success(&format!("Published new tag {}", release.tag));

    Ok(WorkflowResult {
        release,
        executed,
        handoff_path: Some(handoff_path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;

    #[test]
    fn test_release_operations_order() {
        let config = Config::default();
        let release = ReleaseDescriptor::new(Version::new(0, 9, 40));

        let ops: Vec<String> = release_operations(&release, &config)
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            ops,
            vec![
                "git checkout main",
                "git checkout -b release-0.9.40",
                "git push origin release-0.9.40",
                "git tag 0.9.40-rc.0",
                "git push origin 0.9.40-rc.0",
            ]
        );
    }

    #[test]
    fn test_release_operations_use_configured_names() {
        let mut config = Config::default();
        config.release.main_branch = "trunk".to_string();
        config.release.remote = "upstream".to_string();
        let release = ReleaseDescriptor::new(Version::new(1, 0, 0));

        let ops = release_operations(&release, &config);
        assert_eq!(
            ops[0],
            GitOperation::Checkout {
                branch: "trunk".into()
            }
        );
        assert_eq!(
            ops[4],
            GitOperation::Push {
                remote: "upstream".into(),
                refname: "1.0.0-rc.0".into()
            }
        );
    }
}
