//! Release workflow orchestration
//!
//! [ReleaseOrchestrator] runs the release as a fixed sequence:
//!
//! `Start → Synced → TagRead → VersionComputed → {Confirmed → Published | Declined}`
//!
//! Every step must succeed before the next one starts. There is no retry and
//! no rollback: a failure leaves the repository as the last successful
//! command left it.

use crate::config::{Config, FALLBACK_BRANCH};
use crate::error::{ReleaseError, Result};
use crate::git::{CommandOutput, CommandRunner, GitCommand};
use crate::ui::{self, Prompter, PUBLISH_QUESTION};
use crate::version;

/// Inputs to one release run.
///
/// Decoupled from the CLI so the workflow can be driven without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSettings {
    /// Remote to pull tags from and push the new tag to
    pub remote: String,

    /// Branch to check out and pull before reading tags
    pub branch: String,

    /// Annotation message template, `{version}` is substituted
    pub message_template: String,

    /// Only read the latest tag; show the sync, tag and push commands
    /// instead of running them
    pub dry_run: bool,

    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

impl ReleaseSettings {
    /// Settings from a loaded config. `branch` is the already-resolved branch
    /// when the config leaves it unset.
    pub fn from_config(config: &Config, resolved_branch: Option<String>) -> Self {
        let branch = config
            .branch
            .clone()
            .or(resolved_branch)
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string());

        ReleaseSettings {
            remote: config.remote.clone(),
            branch,
            message_template: config.message.clone(),
            dry_run: false,
            assume_yes: false,
        }
    }

    pub fn tag_message(&self, version: &str) -> String {
        self.message_template.replace("{version}", version)
    }
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        ReleaseSettings::from_config(&Config::default(), None)
    }
}

/// How a release run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The tag was created and pushed
    Published { latest: String, version: String },

    /// The operator declined; nothing was created
    Declined { latest: String, version: String },

    /// Dry run; nothing was created
    DryRun { latest: String, version: String },
}

impl ReleaseOutcome {
    /// The version computed during the run.
    pub fn version(&self) -> &str {
        match self {
            ReleaseOutcome::Published { version, .. }
            | ReleaseOutcome::Declined { version, .. }
            | ReleaseOutcome::DryRun { version, .. } => version,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, ReleaseOutcome::Published { .. })
    }
}

/// Drives one release through an injected [CommandRunner] and [Prompter].
pub struct ReleaseOrchestrator<R, P> {
    runner: R,
    prompter: P,
    settings: ReleaseSettings,
}

impl<R: CommandRunner, P: Prompter> ReleaseOrchestrator<R, P> {
    pub fn new(runner: R, prompter: P, settings: ReleaseSettings) -> Self {
        ReleaseOrchestrator {
            runner,
            prompter,
            settings,
        }
    }

    pub fn settings(&self) -> &ReleaseSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Runs the full release sequence.
    ///
    /// Declining the prompt is a normal outcome, not an error.
    pub fn run(&mut self) -> Result<ReleaseOutcome> {
        if self.settings.dry_run {
            ui::display_status("Dry run, no changes will be made:");
            for command in self.sync_commands() {
                ui::display_planned_command(&command);
            }
        } else {
            self.sync_tags()?;
            log::debug!("state: synced");
        }

        let latest = self.get_latest_tag()?;
        ui::display_latest_tag(&latest);
        log::debug!("state: tag read ({})", latest);

        let version = self.calculate_new_version(&latest)?;
        ui::display_new_version(&version);
        log::debug!("state: version computed ({})", version);

        if self.settings.dry_run {
            ui::display_planned_command(&self.tag_command(&version));
            ui::display_planned_command(&self.push_command(&version));
            return Ok(ReleaseOutcome::DryRun { latest, version });
        }

        if !self.confirm()? {
            log::info!("Release of {} declined", version);
            ui::display_abort_notice();
            return Ok(ReleaseOutcome::Declined { latest, version });
        }
        log::debug!("state: confirmed");

        self.publish(&version)?;
        log::debug!("state: published");
        ui::display_success(&format!(
            "Published {} to {}",
            version, self.settings.remote
        ));

        Ok(ReleaseOutcome::Published { latest, version })
    }

    /// Checks out the release branch and pulls it, with tags, from the remote.
    pub fn sync_tags(&self) -> Result<()> {
        ui::display_status(&format!(
            "Syncing {} from {}",
            self.settings.branch, self.settings.remote
        ));
        for command in self.sync_commands() {
            self.run_checked(&command)?;
        }
        Ok(())
    }

    /// Returns the nearest tag reachable from HEAD.
    ///
    /// A repository without tags makes `git describe` fail, which surfaces
    /// as a command failure like any other.
    pub fn get_latest_tag(&self) -> Result<String> {
        let output = self.run_checked(&GitCommand::describe_latest_tag())?;
        Ok(output.stdout.trim().to_string())
    }

    /// Next version for `latest_tag` under the fixed minor-bump policy.
    pub fn calculate_new_version(&self, latest_tag: &str) -> Result<String> {
        version::calculate_new_version(latest_tag)
    }

    /// Asks whether to publish. Always true with `assume_yes`.
    pub fn confirm(&mut self) -> Result<bool> {
        if self.settings.assume_yes {
            log::info!("Confirmation skipped");
            return Ok(true);
        }
        self.prompter.confirm(PUBLISH_QUESTION)
    }

    /// Creates the annotated tag, then pushes it. The push only runs if the
    /// tag was created.
    pub fn publish(&self, version: &str) -> Result<()> {
        ui::display_status(&format!("Creating tag {}", version));
        self.run_checked(&self.tag_command(version))?;

        ui::display_status(&format!(
            "Pushing {} to {}",
            version, self.settings.remote
        ));
        self.run_checked(&self.push_command(version))?;
        Ok(())
    }

    fn sync_commands(&self) -> [GitCommand; 2] {
        [
            GitCommand::checkout(&self.settings.branch),
            GitCommand::pull(&self.settings.remote, &self.settings.branch),
        ]
    }

    fn tag_command(&self, version: &str) -> GitCommand {
        GitCommand::create_annotated_tag(version, &self.settings.tag_message(version))
    }

    fn push_command(&self, version: &str) -> GitCommand {
        GitCommand::push_tag(&self.settings.remote, version)
    }

    fn run_checked(&self, command: &GitCommand) -> Result<CommandOutput> {
        let output = self.runner.run(command)?;
        if !output.is_success() {
            return Err(ReleaseError::command_failed(
                command.to_string(),
                output.code,
                &output.stderr,
            ));
        }
        Ok(output)
    }
}
