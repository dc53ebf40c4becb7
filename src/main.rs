use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use create_release::cli::{ReleaseOrchestrator, ReleaseSettings};
use create_release::config;
use create_release::git::{repository, SystemCommandRunner};
use create_release::ui::{self, LinePrompter};
use create_release::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "create-release",
    version,
    about = "Tag and push the next minor release of the current repository"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Remote to pull tags from and push the new tag to")]
    remote: Option<String>,

    #[arg(short, long, help = "Branch to check out and pull before tagging")]
    branch: Option<String>,

    #[arg(short = 'y', long = "yes", help = "Publish without asking for confirmation")]
    yes: bool,

    #[arg(
        long,
        help = "Show the commands a release would run without syncing, tagging or pushing"
    )]
    dry_run: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<(), ReleaseError> {
    let root = repository::discover_root(".")?;
    let mut config = config::load_config(args.config.as_deref(), &root)?;
    if let Some(remote) = args.remote {
        config.remote = remote;
    }
    if let Some(branch) = args.branch {
        config.branch = Some(branch);
    }

    let resolved_branch = match config.branch {
        Some(_) => None,
        None => repository::resolve_default_branch(&root, &config.remote)?,
    };

    let settings = ReleaseSettings {
        dry_run: args.dry_run,
        assume_yes: args.yes,
        ..ReleaseSettings::from_config(&config, resolved_branch)
    };
    let runner = SystemCommandRunner::new(root);
    log::info!(
        "Releasing {}/{} from {}",
        settings.remote,
        settings.branch,
        runner.work_dir().display()
    );

    let mut orchestrator = ReleaseOrchestrator::new(runner, LinePrompter::stdio(), settings);
    let outcome = orchestrator.run()?;
    log::info!("Release finished: {:?}", outcome);

    Ok(())
}
