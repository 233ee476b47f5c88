//! Rebuild the local site from a remote environment's database
//!
//! Four stages, each aborting the rebuild on failure: dump the remote
//! database with drush, load it into the `cli` container, run updates and
//! config import, rebuild the theme in the `front-end` container.

use std::path::Path;

use super::host::{with_flags, HostStrategy};
use super::Context;
use crate::domain::entities::{shell_quote, CommandSpec, Operation, Task, TaskSequence};
use crate::domain::value_objects::Verbosity;
use crate::error::{BallastError, BallastResult};

pub const DEFAULT_ENVIRONMENT: &str = "dev";

const DUMP_FILE: &str = "target.sql";

pub fn rebuild(ctx: &Context<'_>, host: &dyn HostStrategy, environment: &str) -> BallastResult<()> {
    let flags = host.docker_flags(ctx)?;
    let alias = ctx
        .config
        .settings()
        .non_empty("site_alias_name")
        .ok_or_else(|| {
            BallastError::Validation(
                "site_alias_name must be set in setup/config.yml to rebuild from a remote."
                    .to_string(),
            )
        })?;
    let target = format!("{alias}.{environment}");

    dump(ctx, &target)?;
    ctx.console.text("Remote database dumped.");
    import(ctx, &flags)?;
    update(ctx, &flags)?;
    theme(ctx, &flags)?;
    ctx.console
        .success(&format!("Local site rebuilt from {environment}"));
    Ok(())
}

fn compose(ctx: &Context<'_>, flags: &str, rest: &str) -> CommandSpec {
    CommandSpec::shell(with_flags("docker-compose", flags, rest)).dir(ctx.config.project_root())
}

fn dump_line(root: &Path, target: &str, dump_file: &Path) -> String {
    let quote = |path: &Path| shell_quote(&path.display().to_string());
    format!(
        "{} --alias-path={} {} sql-dump --result-file= > {}",
        quote(&root.join("vendor/bin/drush")),
        quote(&root.join("drush/sites")),
        shell_quote(&format!("@{target}")),
        quote(dump_file),
    )
}

/// `drush sql-dump` of `@target` into `target.sql`, minus SSH noise.
fn dump(ctx: &Context<'_>, target: &str) -> BallastResult<()> {
    ctx.console.text("Dumping remote database");
    let root = ctx.config.project_root();
    let dump_file = ctx.project_path(DUMP_FILE);

    let mut sequence = TaskSequence::new();
    sequence.add(Task::exec(
        CommandSpec::shell(dump_line(root, target, &dump_file))
            .dir(root)
            .debug_only(),
    ));
    // ssh prints this on the remote's stdout when the connection closes.
    sequence.add(Task::new(
        "scrub ssh messages",
        Operation::ReplaceLines {
            path: dump_file,
            prefix: "Connection to".to_string(),
            suffix: "closed.".to_string(),
            to: "--".to_string(),
        },
    ));
    ctx.run_or_abort(
        &sequence,
        "The db dump from the remote system failed to complete",
    )?;
    Ok(())
}

fn import(ctx: &Context<'_>, flags: &str) -> BallastResult<()> {
    ctx.console.text("Loading remote dump to local database.");
    let mut sequence = TaskSequence::new();
    sequence.add(
        Task::exec(compose(ctx, flags, "exec -T cli drush -y sql-drop").quiet().debug_only())
            .allow_failure(),
    );
    sequence.add(Task::exec(
        compose(
            ctx,
            flags,
            "exec -T cli drush sql-sync -y @self @self --no-dump --source-dump=/var/www/target.sql",
        )
        .quiet()
        .debug_only(),
    ));
    sequence.add(Task::exec(
        compose(
            ctx,
            flags,
            "exec -T cli drush sqlsan -y --sanitize-password=dp --sanitize-email=user-%uid@example.com",
        )
        .quiet()
        .debug_only(),
    ));
    let result = ctx.run(&sequence)?;
    if !result.is_success() {
        ctx.console
            .error("The db dump from the remote system failed to load.");
        return Err(BallastError::aborted(
            "The db dump from the remote system failed to load.",
            result.message(),
        ));
    }
    ctx.console.text("Remote database loaded.");
    Ok(())
}

/// Database updates and config import, with a cache rebuild after each.
///
/// Cache rebuild failures are tolerated; `updb` and `cim` failures are not,
/// but both always run.
fn update(ctx: &Context<'_>, flags: &str) -> BallastResult<()> {
    ctx.console
        .text("Running database updates and importing config.");
    let updb = ctx.exec(&compose(ctx, flags, "exec cli drush -y updb").threshold(Verbosity::Normal))?;

    ctx.console
        .text("Rebuilding cache before importing config to enable any overrides.");
    ctx.exec(&compose(ctx, flags, "exec -T cli drush -y cr").quiet().debug_only())?;

    let cim = ctx.exec(&compose(ctx, flags, "exec cli drush -y cim").threshold(Verbosity::Normal))?;

    ctx.console.text("Rebuilding cache after importing config.");
    ctx.exec(&compose(ctx, flags, "exec -T cli drush -y cr").quiet().debug_only())?;

    if !updb.is_success() || !cim.is_success() {
        let failed = if updb.is_success() { &cim } else { &updb };
        return Err(BallastError::aborted(
            "Database updates and/or config imports failed to load.",
            failed.message(),
        ));
    }
    Ok(())
}

fn theme(ctx: &Context<'_>, flags: &str) -> BallastResult<()> {
    ctx.console.text("Building the theme.");
    let result = ctx.exec(
        &compose(ctx, flags, "exec -T front-end node_modules/.bin/gulp build").debug_only(),
    )?;
    if !result.is_success() {
        return Err(BallastError::aborted(
            "The theme failed to compile.",
            result.message(),
        ));
    }
    ctx.console.text("Theme compiled");
    Ok(())
}
