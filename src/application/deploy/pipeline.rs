//! Deploy Pipeline
//!
//! Runs the deployment stages in order:
//! 1. Validate the plan and credentials
//! 2. Add the remote, set the commit identity and install SSH material
//! 3. Wait for the front-end build
//! 4. Remove files that must not ship
//! 5. Commit the build on the source branch
//! 6. Merge it into the deploy branch, keeping the source branch's tree
//! 7. Push
//!
//! Every stage before the push aborts the deployment on failure. The push
//! result is returned as-is.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::sanitize::SanitizeScan;
use crate::application::frontend::{wait_for_deploy_dependencies, FrontEndSentinels};
use crate::config::ProjectConfig;
use crate::domain::entities::{
    CommandSpec, DeployCredentials, Operation, ResolvedDeployPlan, Task, TaskSequence,
};
use crate::domain::ports::{
    DeployEvent, DeployEventSink, FileSystem, PollProgress, TaskExecutor,
};
use crate::domain::services::ReadinessPoller;
use crate::domain::value_objects::{DeployStage, ExecutionResult};
use crate::error::{BallastError, BallastResult};

/// Scratch branch used while rewriting the merge commit.
const TEMP_BRANCH: &str = "branch-temp";

const DEPLOY_GITIGNORE: &str = "setup/deploy-gitignore";

/// Paths the pipeline reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployLayout {
    pub project_root: PathBuf,
    pub app_root: PathBuf,
    pub ssh_dir: PathBuf,
    pub sentinels: FrontEndSentinels,
}

impl DeployLayout {
    /// Layout for `config`, with SSH material under `home/.ssh`.
    ///
    /// Fails when no theme is configured, since the build cannot be followed.
    pub fn from_config(config: &ProjectConfig, home: &Path) -> BallastResult<Self> {
        Ok(Self {
            project_root: config.project_root().to_path_buf(),
            app_root: config.app_root().to_path_buf(),
            ssh_dir: home.join(".ssh"),
            sentinels: FrontEndSentinels::from_config(config)?,
        })
    }

    pub fn with_ssh_dir(mut self, ssh_dir: impl Into<PathBuf>) -> Self {
        self.ssh_dir = ssh_dir.into();
        self
    }
}

/// The staged deployment of one resolved plan.
pub struct DeployPipeline<'a> {
    executor: &'a dyn TaskExecutor,
    fs: &'a dyn FileSystem,
    poller: ReadinessPoller<'a>,
    events: &'a dyn DeployEventSink,
    layout: DeployLayout,
}

impl<'a> DeployPipeline<'a> {
    pub fn new(
        executor: &'a dyn TaskExecutor,
        fs: &'a dyn FileSystem,
        poller: ReadinessPoller<'a>,
        events: &'a dyn DeployEventSink,
        layout: DeployLayout,
    ) -> Self {
        Self {
            executor,
            fs,
            poller,
            events,
            layout,
        }
    }

    /// Run every stage and return the push result.
    pub fn run(
        &self,
        plan: &ResolvedDeployPlan,
        credentials: &DeployCredentials,
        progress: &mut dyn PollProgress,
    ) -> BallastResult<ExecutionResult> {
        self.events.on_event(DeployEvent::Started {
            branch: plan.branch().to_string(),
            remote_url: plan.remote_url().to_string(),
            deploy_branch: plan.deploy_branch().to_string(),
            tag: plan.tag().map(str::to_string),
        });

        let (known_host, _) = self.stage(DeployStage::Validate, || credentials.ssh_material())?;
        self.stage(DeployStage::VersionControl, || {
            self.configure_version_control(plan, credentials, known_host)
        })?;
        self.stage(DeployStage::Dependencies, || self.wait_for_build(progress))?;
        self.stage(DeployStage::Sanitize, || self.sanitize())?;
        self.stage(DeployStage::Commit, || self.commit(plan))?;
        self.stage(DeployStage::Merge, || self.merge(plan))?;

        self.events.on_event(DeployEvent::StageStarted {
            stage: DeployStage::Push,
        });
        let pushed = self.push(plan)?;
        if pushed.is_success() {
            self.events.on_event(DeployEvent::StageCompleted {
                stage: DeployStage::Push,
            });
        } else {
            warn!(message = pushed.message().trim(), "push failed");
        }
        self.events.on_event(DeployEvent::Finished {
            success: pushed.is_success(),
        });
        Ok(pushed)
    }

    fn stage<T>(
        &self,
        stage: DeployStage,
        body: impl FnOnce() -> BallastResult<T>,
    ) -> BallastResult<T> {
        info!(stage = stage.key(), "stage {}/{}", stage.number(), DeployStage::ALL.len());
        self.events.on_event(DeployEvent::StageStarted { stage });
        let value = body()?;
        self.events.on_event(DeployEvent::StageCompleted { stage });
        Ok(value)
    }

    fn note(&self, stage: DeployStage, message: impl Into<String>) {
        self.events.on_event(DeployEvent::Note {
            stage,
            message: message.into(),
        });
    }

    fn git<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new("git")
            .args(args)
            .dir(&self.layout.project_root)
            .debug_only()
    }

    /// Run `sequence`, turning a failure into a stage error.
    fn run_stage(
        &self,
        stage: DeployStage,
        sequence: &TaskSequence,
        summary: &str,
    ) -> BallastResult<ExecutionResult> {
        let result = sequence.run(self.executor)?;
        if result.is_success() {
            return Ok(result);
        }
        let output = result.message().trim();
        let message = if output.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{output}")
        };
        Err(BallastError::Stage { stage, message })
    }

    fn configure_version_control(
        &self,
        plan: &ResolvedDeployPlan,
        credentials: &DeployCredentials,
        known_host: &str,
    ) -> BallastResult<()> {
        let stage = DeployStage::VersionControl;
        self.note(
            stage,
            format!(
                "Will push to git remote {} at {}",
                plan.remote_name(),
                plan.remote_url()
            ),
        );

        let mut git = TaskSequence::new();
        git.add(Task::exec(self.git([
            "remote",
            "add",
            plan.remote_name(),
            plan.remote_url(),
        ])));
        git.add(Task::exec(self.git([
            "config",
            "--global",
            "user.email",
            credentials.git_email.as_str(),
        ])));
        git.add(Task::exec(self.git([
            "config",
            "--global",
            "user.name",
            credentials.git_name.as_str(),
        ])));
        self.run_stage(stage, &git, "Git config failed to set.")?;

        let ssh_dir = &self.layout.ssh_dir;
        let known_hosts = ssh_dir.join("known_hosts");
        let key_file = ssh_dir.join("id_rsa");
        let key = credentials.expanded_private_key().unwrap_or_default();

        let mut ssh = TaskSequence::new();
        ssh.add(Task::new("create ssh dir", Operation::CreateDir(ssh_dir.clone())));
        ssh.add(Task::new("touch known_hosts", Operation::Touch(known_hosts.clone())));
        ssh.add(Task::new(
            "add git host key",
            Operation::append(&known_hosts, format!("{known_host}\n")),
        ));
        ssh.add(Task::new("install private key", Operation::append(&key_file, key)));
        ssh.add(Task::new(
            "restrict private key",
            Operation::SetMode {
                path: key_file,
                mode: 0o600,
            },
        ));
        ssh.add(Task::new(
            "restrict ssh dir",
            Operation::SetMode {
                path: ssh_dir.clone(),
                mode: 0o700,
            },
        ));
        self.run_stage(stage, &ssh, "Unable to set git host key.")?;
        Ok(())
    }

    fn wait_for_build(&self, progress: &mut dyn PollProgress) -> BallastResult<()> {
        let stage = DeployStage::Dependencies;
        wait_for_deploy_dependencies(
            &self.poller,
            &self.layout.sentinels,
            self.fs,
            progress,
            &mut |message: &str| self.note(stage, message),
        )
    }

    fn sanitize(&self) -> BallastResult<()> {
        let stage = DeployStage::Sanitize;
        self.note(stage, "Sanitizing artifact...");
        let scan = SanitizeScan::run(&self.layout.project_root, &self.layout.app_root);
        self.note(stage, format!("{} .git directories found", scan.git_dirs.len()));
        self.note(
            stage,
            format!("{} CHANGELOG.txt files found", scan.changelogs.len()),
        );
        self.note(
            stage,
            format!(
                "{} .gitignore files found in themes",
                scan.theme_ignores.len()
            ),
        );

        let mut sequence = TaskSequence::new();
        let paths = scan.paths();
        if !paths.is_empty() {
            sequence.add(Task::new(
                "remove undeployable files",
                Operation::Remove(paths),
            ));
        }
        sequence.add(Task::new(
            "install deploy .gitignore",
            Operation::copy_overwrite(
                self.layout.project_root.join(DEPLOY_GITIGNORE),
                self.layout.project_root.join(".gitignore"),
            ),
        ));
        self.run_stage(stage, &sequence, "Unable to sanitize the build.")?;
        Ok(())
    }

    fn commit(&self, plan: &ResolvedDeployPlan) -> BallastResult<()> {
        let mut sequence = TaskSequence::new();
        sequence.add(Task::exec(self.git(["checkout", plan.branch()])));
        sequence.add(Task::exec(self.git(["add", "-A"])));
        sequence.add(Task::exec(self.git(["commit", "-m", plan.commit_msg()])));
        self.run_stage(DeployStage::Commit, &sequence, "Git commit failed.")?;
        Ok(())
    }

    /// Track the remote branch (or start a fresh one), then merge the source
    /// branch so the deploy branch keeps remote history but the source tree.
    /// The remote may be a separate artifact repository with its own root.
    fn merge(&self, plan: &ResolvedDeployPlan) -> BallastResult<()> {
        let stage = DeployStage::Merge;
        self.note(stage, "Move to a new branch that tracks the target repo.");

        let tracking = plan.tracking_ref();
        let mut track = TaskSequence::new();
        track.add(Task::exec(self.git(["fetch", plan.remote_name()])));
        track.add(Task::exec(self.git([
            "checkout",
            "-b",
            plan.deploy_branch(),
            tracking.as_str(),
        ])));
        let tracked = track.run(self.executor)?;
        if !tracked.is_success() {
            info!(tracking = %tracking, "remote branch unavailable, creating deploy branch");
            let mut create = TaskSequence::new();
            create.add(Task::exec(self.git(["checkout", "-b", plan.deploy_branch()])));
            self.run_stage(
                stage,
                &create,
                "Unable to checkout or create a deployment branch.",
            )?;
        }

        self.note(stage, "Merging changes into remote tracking branch");
        let message = plan.merge_message();
        let mut merge = TaskSequence::new();
        merge.add(Task::exec(self.git([
            "merge",
            "-s",
            "ours",
            "--allow-unrelated-histories",
            plan.branch(),
            "-m",
            message.as_str(),
        ])));
        merge.add(Task::exec(self.git(["branch", TEMP_BRANCH])));
        merge.add(Task::exec(self.git(["reset", "--hard", plan.branch()])));
        merge.add(Task::exec(self.git(["reset", "--soft", TEMP_BRANCH])));
        merge.add(Task::exec(self.git(["commit", "--amend", "-C", "HEAD"])));
        merge.add(Task::exec(self.git(["branch", "-D", TEMP_BRANCH])));
        if let Some(tag) = plan.tag() {
            merge.add(Task::exec(self.git(["tag", tag])));
        }
        self.run_stage(
            stage,
            &merge,
            "Failed to merge deployment into the remote branch.",
        )?;
        self.note(stage, "Code is ready to push");
        Ok(())
    }

    fn push(&self, plan: &ResolvedDeployPlan) -> BallastResult<ExecutionResult> {
        let refspec = plan.push_refspec();
        let mut args = vec!["push", plan.remote_name(), refspec.as_str()];
        if let Some(tag) = plan.tag() {
            args.push(tag);
        }
        let mut sequence = TaskSequence::new();
        sequence.add(Task::exec(self.git(args)));
        sequence.run(self.executor)
    }
}
