//! Bringing the project's containers up and finding their services

use super::frontend::{wait_for_launch, FrontEndSentinels};
use super::host::{with_flags, HostStrategy};
use super::Context;
use crate::domain::entities::{CommandSpec, Operation, Task, TaskSequence};
use crate::domain::ports::PollProgress;
use crate::domain::services::ReadinessPoller;
use crate::error::{BallastError, BallastResult};

const COMPOSE_TEMPLATE: &str = "setup/docker/docker-compose-template";
const COMPOSE_STAGED: &str = "setup/docker/docker-compose.yml";
const COMPOSE_FILE: &str = "docker-compose.yml";

/// Render `docker-compose.yml`, start the stack and wait for the theme build.
///
/// Returns whether the front-end tools reported ready in time.
pub fn compose_up(
    ctx: &Context<'_>,
    host: &dyn HostStrategy,
    progress: &mut dyn PollProgress,
) -> BallastResult<bool> {
    let host_ip = host.compose_host_ip(ctx)?;
    let flags = host.docker_flags(ctx)?;
    let settings = ctx.config.settings();

    let staged = ctx.project_path(COMPOSE_STAGED);
    let mut sequence = TaskSequence::new();
    sequence.add_with_rollback(
        Task::new(
            "stage docker-compose.yml",
            Operation::copy_overwrite(ctx.project_path(COMPOSE_TEMPLATE), &staged),
        ),
        Operation::remove(&staged),
    );
    let placeholders = [
        ("{site_shortname}", ctx.setting("site_shortname")),
        ("{site_tld}", settings.site_tld()),
        ("{site_theme_name}", ctx.setting("site_theme_name")),
        ("{host_ip}", host_ip.as_str()),
    ];
    for (placeholder, value) in placeholders {
        sequence.add(Task::new(
            format!("set {placeholder}"),
            Operation::replace(&staged, placeholder, value),
        ));
    }
    sequence.add(Task::new(
        "install docker-compose.yml",
        Operation::rename(&staged, ctx.project_path(COMPOSE_FILE), true),
    ));
    ctx.run_or_abort(&sequence, "Unable to prepare docker-compose.yml.")?;

    let up = ctx.exec(
        &CommandSpec::shell(with_flags("docker-compose", &flags, "up -d"))
            .dir(ctx.config.project_root()),
    )?;
    if !up.is_success() {
        return Err(BallastError::aborted(
            "docker-compose was unable to start the containers.",
            up.message(),
        ));
    }

    let ready = match FrontEndSentinels::from_config(ctx.config) {
        Ok(sentinels) => {
            ctx.console
                .text("Please stand by while the front end tools initialize.");
            let poller = ReadinessPoller::new(ctx.pause);
            let ready = wait_for_launch(&poller, &sentinels, ctx.fs, progress);
            if ready {
                ctx.console.text("Front end tools are ready.");
            } else {
                ctx.console.warning(
                    "The wait timer expired waiting for front end tools to report readiness.",
                );
            }
            ready
        }
        Err(err) => {
            ctx.console.note(&err.to_string());
            false
        }
    };

    ctx.console.success(&format!(
        "The site can now be reached at {}",
        ctx.config.site_url()
    ));
    Ok(ready)
}

/// Print where the database container's MySQL port is published.
pub fn connect_sql(ctx: &Context<'_>, host: &dyn HostStrategy) -> BallastResult<()> {
    let flags = host.docker_flags(ctx)?;
    let ip = host.machine_ip(ctx)?.ok_or_else(|| {
        BallastError::Precondition("Unable to get an IP address for dp-docker machine.".to_string())
    })?;
    let output = ctx.runner.run(
        &CommandSpec::shell(with_flags("docker-compose", &flags, "port database 3306"))
            .dir(ctx.config.project_root())
            .quiet()
            .debug_only(),
    )?;
    let port = output
        .success()
        .then(|| published_port(&output.stdout))
        .flatten()
        .ok_or_else(|| {
            BallastError::Precondition(
                "The database container is not running. Start the site with `ballast docker compose-up`."
                    .to_string(),
            )
        })?;

    ctx.console.title("Database Info");
    ctx.console
        .text(&format!("The database may be reached at: {ip}:{port}"));
    ctx.console
        .text("Username, password, and database are all 'drupal'");
    Ok(())
}

/// Port part of `docker-compose port` output (`0.0.0.0:32768`).
fn published_port(output: &str) -> Option<String> {
    let line = output.lines().next()?.trim();
    let (_, port) = line.rsplit_once(':')?;
    let port = port.trim();
    (!port.is_empty()).then(|| port.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::host::LinuxHost;
    use crate::application::testing::Fixture;
    use crate::domain::ports::NoProgress;
    use crate::infrastructure::process::scripted::ScriptedRunner;
    use crate::infrastructure::HostExecutor;

    const TEMPLATE: &str = "services:\n  web:\n    hostname: {site_shortname}.{site_tld}\n    \
        extra_hosts:\n      - \"host:{host_ip}\"\n  front-end:\n    working_dir: /themes/{site_theme_name}\n";

    #[test]
    fn published_port_reads_after_colon() {
        assert_eq!(published_port("0.0.0.0:32768\n").as_deref(), Some("32768"));
        assert_eq!(published_port(":::32768").as_deref(), Some("32768"));
        assert_eq!(published_port("").as_deref(), None);
        assert_eq!(published_port("0.0.0.0:").as_deref(), None);
    }

    #[test]
    fn compose_up_renders_template_and_starts_stack() {
        let fixture = Fixture::new(&[
            ("site_shortname", "demo"),
            ("site_theme_name", "gesso"),
        ]);
        fixture.file(COMPOSE_TEMPLATE, TEMPLATE);
        fixture.file("docroot/themes/custom/gesso/INITIALIZED.txt", "");
        fixture.file("docroot/themes/custom/gesso/BUILDING.txt", "");
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        let ready = compose_up(&ctx, &LinuxHost, &mut NoProgress).unwrap();

        assert!(ready);
        let rendered = fixture.read(COMPOSE_FILE);
        assert!(rendered.contains("hostname: demo.dpulp"));
        assert!(rendered.contains("host:host.docker.internal"));
        assert!(rendered.contains("/themes/gesso"));
        assert!(!fixture.root().join(COMPOSE_STAGED).exists());
        assert_eq!(runner.commands(), vec!["docker-compose up -d"]);
        assert!(!fixture
            .root()
            .join("docroot/themes/custom/gesso/BUILDING.txt")
            .exists());
        assert!(fixture
            .console
            .has("success", "The site can now be reached at http://demo.dpulp/"));
    }

    #[test]
    fn compose_up_overwrites_existing_compose_file() {
        let fixture = Fixture::new(&[("site_shortname", "demo")]);
        fixture.file(COMPOSE_TEMPLATE, "name: {site_shortname}\n");
        fixture.file(COMPOSE_FILE, "stale\n");
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        let ready = compose_up(&ctx, &LinuxHost, &mut NoProgress).unwrap();

        assert!(!ready);
        assert_eq!(fixture.read(COMPOSE_FILE), "name: demo\n");
        assert!(fixture.console.has("note", "site_theme_name"));
    }

    #[test]
    fn compose_up_warns_when_front_end_never_reports() {
        let fixture = Fixture::new(&[("site_theme_name", "gesso")]);
        fixture.file(COMPOSE_TEMPLATE, "x\n");
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        let ready = compose_up(&ctx, &LinuxHost, &mut NoProgress).unwrap();

        assert!(!ready);
        assert_eq!(
            fixture.pause.count.get(),
            ReadinessPoller::DEFAULT_MAX_ITERATIONS
        );
        assert!(fixture.console.has("warning", "wait timer expired"));
    }

    #[test]
    fn compose_up_fails_without_template() {
        let fixture = Fixture::new(&[]);
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        let err = compose_up(&ctx, &LinuxHost, &mut NoProgress).unwrap_err();

        assert!(err.to_string().starts_with("Unable to prepare docker-compose.yml."));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn compose_up_reports_failed_start() {
        let fixture = Fixture::new(&[]);
        fixture.file(COMPOSE_TEMPLATE, "x\n");
        let runner = ScriptedRunner::new().fail("docker-compose up");
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        let err = compose_up(&ctx, &LinuxHost, &mut NoProgress).unwrap_err();
        assert!(matches!(err, BallastError::Aborted(_)));
    }

    #[test]
    fn connect_sql_prints_address() {
        let fixture = Fixture::new(&[]);
        let runner = ScriptedRunner::new().respond("docker-compose port database", "0.0.0.0:32771\n");
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        connect_sql(&ctx, &LinuxHost).unwrap();

        assert!(fixture
            .console
            .has("text", "The database may be reached at: 127.0.0.1:32771"));
    }

    #[test]
    fn connect_sql_requires_running_database() {
        let fixture = Fixture::new(&[]);
        let runner = ScriptedRunner::new().fail("docker-compose port");
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        assert!(connect_sql(&ctx, &LinuxHost).unwrap_err().is_precondition());
    }
}
