//! One-time developer machine and project setup

use tracing::debug;

use super::host::{missing_requirements, HostStrategy};
use super::Context;
use crate::domain::entities::{CommandSpec, Operation, Task, TaskSequence};
use crate::domain::ports::is_installed;
use crate::domain::value_objects::Platform;
use crate::error::{BallastError, BallastResult};

const ROLLED_BACK: &str = "Something went wrong.  Changes have been rolled back.";

/// Check for (and on macOS install) the software Ballast drives.
///
/// Returns whether the machine is ready.
pub fn prerequisites(ctx: &Context<'_>, host: &dyn HostStrategy) -> BallastResult<bool> {
    let (title, ready) = match host.platform() {
        Platform::Mac => (
            "Mac Setup for Ballast",
            "Your Mac has the required software to use Ballast.",
        ),
        Platform::Linux => (
            "Linux Setup for Ballast",
            "Your system has the required software to use Ballast.",
        ),
    };
    ctx.console.title(title);

    for prerequisite in host.prerequisites() {
        if !is_installed(ctx.runner, prerequisite.command)? {
            return Err(BallastError::Precondition(prerequisite.message.to_string()));
        }
    }

    let missing = missing_requirements(ctx, &host.requirements())?;
    if missing.is_empty() {
        ctx.console.success(ready);
        return Ok(true);
    }
    host.install_missing(ctx, &missing)
}

/// Create the container engine (a VM on macOS).
pub fn engine(ctx: &Context<'_>, host: &dyn HostStrategy) -> BallastResult<()> {
    host.setup_engine(ctx)
}

/// Per-developer project setup: git hooks, local settings, ahoy commands.
pub fn project(ctx: &Context<'_>, platform: Platform) -> BallastResult<()> {
    install_hooks(ctx)?;
    local_settings(ctx)?;
    ahoy_commands(ctx, platform)
}

/// `pre-commit install`, plus the JIRA commit-msg hook when a key is set.
fn install_hooks(ctx: &Context<'_>) -> BallastResult<()> {
    let root = ctx.config.project_root();
    if !ctx.fs.exists(&root.join(".git")) {
        return Err(BallastError::Precondition(
            "Git repository not found.  Pre-commit cannot be setup until this project is under version control."
                .to_string(),
        ));
    }

    ctx.console.section("Configuring pre-commit linting tool.");
    let mut sequence = TaskSequence::new();
    sequence.add_with_rollback(
        Task::exec(CommandSpec::new("pre-commit").arg("install").dir(root)),
        CommandSpec::new("pre-commit").arg("uninstall").dir(root),
    );

    let hook = root.join(".git").join("hooks").join("commit-msg");
    let key = ctx.config.settings().non_empty("jira_project_key");
    if let (false, Some(key)) = (ctx.fs.exists(&hook), key) {
        let template = root.join("scripts/git/commit-msg-template");
        let staged = root.join("scripts/git/commit-msg");
        sequence.add_with_rollback(
            Task::new("stage commit-msg hook", Operation::copy(&template, &staged)),
            Operation::remove(&staged),
        );
        sequence.add(Task::new(
            "set issue key",
            Operation::replace(&staged, "{key}", key),
        ));
        sequence.add(Task::new(
            "install commit-msg hook",
            Operation::rename(&staged, &hook, false),
        ));
    }

    let result = ctx.run(&sequence)?;
    if !result.is_success() {
        ctx.console.error(ROLLED_BACK);
        return Err(BallastError::aborted(
            "Installing git hooks failed.",
            result.message(),
        ));
    }
    ctx.console
        .success("Hooks for commit-msg and pre-commit linting have been installed.");
    Ok(())
}

fn local_settings(ctx: &Context<'_>) -> BallastResult<()> {
    if !ctx.console.confirm("Create a settings.local.php file?", true) {
        return Ok(());
    }
    let target = ctx
        .config
        .app_root()
        .join("sites/default/settings.local.php");
    let overwrite = if ctx.fs.exists(&target) {
        ctx.console
            .confirm("Overwrite the existing settings.local.php?", false)
    } else {
        true
    };
    if !overwrite {
        debug!("keeping existing settings.local.php");
        return Ok(());
    }

    let mut sequence = TaskSequence::new();
    sequence.add(Task::new(
        "copy settings.local.php",
        Operation::copy_overwrite(ctx.project_path("setup/drupal/settings.local.php"), &target),
    ));
    if let Some(origin) = ctx.config.settings().non_empty("site_proxy_origin_url") {
        sequence.add(Task::new(
            "set proxy origin",
            Operation::replace(&target, "{site_proxy_origin_url}", origin),
        ));
    }
    ctx.run_or_abort(&sequence, "Unable to create settings.local.php.")?;
    ctx.console.text("settings.local.php is in place.");
    Ok(())
}

fn ahoy_commands(ctx: &Context<'_>, platform: Platform) -> BallastResult<()> {
    if !is_installed(ctx.runner, "ahoy")? {
        ctx.console.note(
            "Ahoy not found. If you decide later to use our ahoy commands, install ahoy from \
             https://github.com/ahoy-cli/ahoy and then run `ballast setup project` again.",
        );
        return Ok(());
    }

    let source = ctx.project_path(format!("setup/ahoy/{}.ahoy.yml", platform.ahoy_name()));
    let destination = ctx.project_path(".ahoy.yml");
    let result = ctx
        .executor
        .execute(&Operation::copy_overwrite(&source, &destination))?;
    if result.is_success() {
        ctx.console.text("Ahoy commands prepared.");
        ctx.console.title("Next Steps");
        ctx.console.text(
            "We recommend using Ahoy to interact with our toolset from here.  \
             Enter `ahoy -h` to see the full list or check the README.",
        );
    } else {
        ctx.console.error("Unable to move ahoy.yml file into place.");
        ctx.console.text(result.message());
        ctx.console.warning(&format!(
            "You will need to copy and move this file yourself from {} to {}",
            source.display(),
            destination.display()
        ));
    }
    Ok(())
}
