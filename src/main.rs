use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_release_rc::cli::{run_release_workflow, ReleaseWorkflowArgs};
use git_release_rc::config::{self, ConfigOverrides};
use git_release_rc::git::GitCli;
use git_release_rc::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-release-rc",
    version,
    about = "Cut a release branch and push its release-candidate tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Branch the release is cut from")]
    main_branch: Option<String>,

    #[arg(long, help = "Remote the branch and tag are pushed to")]
    remote: Option<String>,

    #[arg(long, help = "File that receives the new tag name")]
    output: Option<PathBuf>,

    #[arg(long, help = "Patch number that rolls over to the next minor")]
    max_patch: Option<u64>,

    #[arg(long, help = "Minor number that rolls over to the next major")]
    max_minor: Option<u64>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            main_branch: self.main_branch.clone(),
            remote: self.remote.clone(),
            output_path: self.output.clone(),
            max_patch: self.max_patch,
            max_minor: self.max_minor,
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    args.overrides().apply(&mut config);
    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let runner = match GitCli::discover(".") {
        Ok(runner) => runner,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let workflow_args = ReleaseWorkflowArgs {
        dry_run: args.dry_run,
    };

    match run_release_workflow(&workflow_args, &config, &runner) {
        Ok(_) => Ok(()),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
