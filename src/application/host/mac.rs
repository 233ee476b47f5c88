//! macOS: docker inside the `dp-docker` docker-machine VM

use std::cell::OnceCell;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{with_flags, HostStrategy, Prerequisite, Requirement};
use crate::application::Context;
use crate::domain::entities::{CommandSpec, Operation, Task, TaskSequence};
use crate::domain::value_objects::Platform;
use crate::error::{BallastError, BallastResult};

pub const MACHINE_NAME: &str = "dp-docker";

const RESOLVER_DIR: &str = "/etc/resolver";
const DNSMASQ_IMAGE: &str = "andyshinn/dnsmasq:2.81";

const NOT_INSTALLED: &str =
    "You must run `composer install` followed by `ahoy harbor` before you run this Drupal site.";
const NOT_STARTED: &str = "You must start the docker service using `ahoy cast-off`";
const NO_IP: &str = "Unable to get an IP address for dp-docker machine.";

/// Finds the local address used to reach a peer (`net::local_ip_towards`).
pub type RouteProbe = fn(&str) -> BallastResult<IpAddr>;

const REQUIREMENTS: &[Requirement] = &[
    Requirement {
        command: "ddev",
        name: "DDEV Local",
        tap: Some("drud/ddev"),
        package: Some("ddev"),
        url: "https://github.com/drud/ddev",
    },
    Requirement {
        command: "docker",
        name: "Docker",
        tap: None,
        package: Some("homebrew/cask/docker"),
        url: "https://docs.docker.com/desktop/mac/install/",
    },
    Requirement {
        command: "docker-compose",
        name: "Docker Compose",
        tap: None,
        package: Some("homebrew/cask/docker"),
        url: "https://docs.docker.com/compose/install/",
    },
    Requirement {
        command: "pre-commit",
        name: "pre-commit by Yelp",
        tap: None,
        package: Some("pre-commit"),
        url: "https://pre-commit.com/#install",
    },
];

pub struct MacHost {
    machine: String,
    resolver_dir: PathBuf,
    probe: RouteProbe,
    flags: OnceCell<String>,
}

impl MacHost {
    pub fn new(probe: RouteProbe) -> Self {
        Self {
            machine: MACHINE_NAME.to_string(),
            resolver_dir: PathBuf::from(RESOLVER_DIR),
            probe,
            flags: OnceCell::new(),
        }
    }

    /// Install resolver files somewhere other than `/etc/resolver`.
    pub fn with_resolver_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resolver_dir = dir.into();
        self
    }

    fn machine_cmd(&self, verb: &str) -> CommandSpec {
        CommandSpec::new("docker-machine").args([verb, self.machine.as_str()])
    }

    /// docker-machine's state directory for the VM.
    fn machine_dir(&self, home: &Path) -> PathBuf {
        home.join(".docker")
            .join("machine")
            .join("machines")
            .join(&self.machine)
    }

    /// `docker-machine url`, empty while the VM is stopped.
    fn machine_url(&self, ctx: &Context<'_>) -> BallastResult<Option<String>> {
        let output = ctx.runner.run(&self.machine_cmd("url").quiet())?;
        let url = output.stdout.trim();
        Ok((output.success() && !url.is_empty()).then(|| url.to_string()))
    }

    /// Make sure a `dnsmasq` container answers for the site TLD.
    fn ensure_dnsmasq(&self, ctx: &Context<'_>, flags: &str, ip: &str) -> BallastResult<bool> {
        let inspect = ctx
            .runner
            .run(&CommandSpec::shell(with_flags("docker", flags, "inspect dnsmasq")).quiet())?;
        if inspect.success() {
            match container_running(&inspect.stdout) {
                Some(true) => {
                    ctx.console.note("DNS service is already running.");
                    return Ok(true);
                }
                Some(false) => {
                    // Recreated so it picks up the machine's current address.
                    ctx.console.text("Container exists but is stopped.");
                    ctx.runner
                        .run(&CommandSpec::shell(with_flags("docker", flags, "rm dnsmasq")).quiet())?;
                }
                None => debug!("dnsmasq inspection had no state"),
            }
        }

        let tld = ctx.config.settings().site_tld();
        let run = format!(
            "run -d --name dnsmasq --publish '53535:53/tcp' --publish '53535:53/udp' \
             --cap-add NET_ADMIN {DNSMASQ_IMAGE} --address=/{tld}/{ip}"
        );
        let output = ctx
            .runner
            .run(&CommandSpec::shell(with_flags("docker", flags, &run)).quiet())?;
        Ok(output.success())
    }

    /// Point the resolver for `*.<tld>` at the dnsmasq container.
    fn install_resolver(&self, ctx: &Context<'_>, ip: &str) -> BallastResult<()> {
        let tld = ctx.config.settings().site_tld();
        let installed = self.resolver_dir.join(tld);
        let current = ctx.fs.read(&installed).unwrap_or_default();
        if current.contains(ip) {
            debug!(path = %installed.display(), "resolver already points at the machine");
            return Ok(());
        }

        let template = ctx.project_path(format!("setup/dns/{tld}-template"));
        let staged = ctx.project_path(format!("setup/dns/{tld}"));
        let dir = self.resolver_dir.display().to_string();
        let installed_arg = installed.display().to_string();

        let mut sequence = TaskSequence::new();
        if ctx.fs.exists(&installed) {
            sequence.add(Task::exec(
                CommandSpec::new("sudo").args(["rm", installed_arg.as_str()]),
            ));
        }
        sequence.add_with_rollback(
            Task::new("stage resolver file", Operation::copy_overwrite(&template, &staged)),
            Operation::remove(&staged),
        );
        sequence.add(Task::new(
            "set resolver address",
            Operation::replace(&staged, "{docker-dp}", ip),
        ));
        if !ctx.fs.exists(&self.resolver_dir) {
            sequence.add(Task::exec(CommandSpec::new("sudo").args(["mkdir", dir.as_str()])));
        }
        sequence.add(Task::exec(CommandSpec::new("sudo").args([
            "mv".to_string(),
            staged.display().to_string(),
            dir.clone(),
        ])));
        sequence.add(Task::exec(
            CommandSpec::new("sudo").args(["chown", "root:wheel", installed_arg.as_str()]),
        ));
        ctx.run_or_abort(&sequence, "Unable to install the DNS resolver file.")?;
        Ok(())
    }
}

/// `[0].State.Running` of `docker inspect` output.
fn container_running(inspection: &str) -> Option<bool> {
    let value: serde_json::Value = serde_json::from_str(inspection).ok()?;
    value.get(0)?.get("State")?.get("Running")?.as_bool()
}

/// `docker-machine config` prints one flag per line; compose wants `--host`.
fn normalize_machine_flags(config: &str) -> String {
    config
        .replace(['\r', '\n'], " ")
        .replace("-H=", "--host ")
        .trim()
        .to_string()
}

impl HostStrategy for MacHost {
    fn platform(&self) -> Platform {
        Platform::Mac
    }

    fn prerequisites(&self) -> Vec<Prerequisite> {
        vec![Prerequisite {
            command: "brew",
            message: "Homebrew is not available.  Check the project README for installation instructions.",
        }]
    }

    fn requirements(&self) -> Vec<Requirement> {
        REQUIREMENTS.to_vec()
    }

    fn install_missing(&self, ctx: &Context<'_>, missing: &[Requirement]) -> BallastResult<bool> {
        ctx.console
            .warning("Your Mac is missing required software to use Ballast");
        ctx.console.text("The following packages need to be installed:");
        let names: Vec<String> = missing.iter().map(|r| r.name.to_string()).collect();
        ctx.console.listing(&names);

        let mut taps: Vec<&str> = Vec::new();
        let mut packages: Vec<&str> = Vec::new();
        let mut sequence = TaskSequence::new();
        for requirement in missing {
            if let Some(tap) = requirement.tap.filter(|t| !taps.contains(t)) {
                taps.push(tap);
                sequence.add_with_rollback(
                    Task::exec(CommandSpec::new("brew").args(["tap", tap])),
                    CommandSpec::new("brew").args(["untap", tap]),
                );
            }
            if let Some(package) = requirement.package.filter(|p| !packages.contains(p)) {
                packages.push(package);
                sequence.add_with_rollback(
                    Task::exec(CommandSpec::new("brew").args(["install", package])),
                    CommandSpec::new("brew").args(["uninstall", package]),
                );
            }
        }

        let result = ctx.run(&sequence)?;
        if result.is_success() {
            ctx.console.success("Prerequisites prepared for Ballast.");
            Ok(true)
        } else {
            ctx.console
                .error("Something went wrong.  Changes have been rolled back.");
            Err(BallastError::aborted(
                "Installing prerequisites failed.",
                result.message(),
            ))
        }
    }

    fn docker_flags(&self, ctx: &Context<'_>) -> BallastResult<String> {
        if let Some(flags) = self.flags.get() {
            return Ok(flags.clone());
        }
        let output = ctx.runner.run(&self.machine_cmd("config").quiet())?;
        if !output.success() {
            return Err(BallastError::Precondition(
                "Unable to connect to docker machine.".to_string(),
            ));
        }
        let flags = normalize_machine_flags(&output.stdout);
        Ok(self.flags.get_or_init(|| flags).clone())
    }

    fn machine_ip(&self, ctx: &Context<'_>) -> BallastResult<Option<String>> {
        let output = ctx
            .runner
            .run(&self.machine_cmd("ip").quiet().debug_only())?;
        let ip = output.stdout.trim();
        Ok((output.success() && !ip.is_empty()).then(|| ip.to_string()))
    }

    fn host_ip_for_containers(&self, ctx: &Context<'_>) -> BallastResult<String> {
        let machine_ip = self
            .machine_ip(ctx)?
            .ok_or_else(|| BallastError::Precondition(NOT_STARTED.to_string()))?;
        Ok((self.probe)(&machine_ip)?.to_string())
    }

    fn ensure_installed(&self, ctx: &Context<'_>) -> BallastResult<()> {
        let machine = ctx.fs.exists(&self.machine_dir(ctx.home));
        let core = ctx.fs.exists(&ctx.config.app_root().join("core"));
        if machine && core {
            Ok(())
        } else {
            Err(BallastError::Precondition(NOT_INSTALLED.to_string()))
        }
    }

    fn ensure_booted(&self, ctx: &Context<'_>) -> BallastResult<()> {
        self.ensure_installed(ctx)?;
        match self.machine_url(ctx)? {
            Some(_) => Ok(()),
            None => Err(BallastError::Precondition(NOT_STARTED.to_string())),
        }
    }

    fn setup_engine(&self, ctx: &Context<'_>) -> BallastResult<()> {
        let dir = self.machine_dir(ctx.home);
        if ctx.fs.exists(&dir) {
            ctx.console.success(&format!(
                "All set! Ballast Docker Machine config detected at {}",
                dir.display()
            ));
            return Ok(());
        }

        ctx.console.title("Build the dp-docker machine");
        let mut sequence = TaskSequence::new();
        sequence.add_with_rollback(
            Task::exec(CommandSpec::new("docker-machine").args([
                "create",
                "-d",
                "virtualbox",
                "--virtualbox-memory",
                "2048",
                "--virtualbox-no-share",
                self.machine.as_str(),
            ])),
            CommandSpec::new("docker-machine").args(["rm", "-y", self.machine.as_str()]),
        );
        let result = ctx.run(&sequence)?;
        if result.is_success() {
            ctx.console.success("Docker machine created.");
            Ok(())
        } else {
            ctx.console
                .error("Something went wrong.  Changes have been rolled back.");
            Err(BallastError::aborted(
                "Creating the docker machine failed.",
                result.message(),
            ))
        }
    }

    fn create_proxy(&self, ctx: &Context<'_>) -> BallastResult<()> {
        self.ensure_installed(ctx)?;
        let flags = self.docker_flags(ctx)?;
        if self.machine_ip(ctx)?.is_none() {
            return Err(BallastError::Precondition(NO_IP.to_string()));
        }

        ctx.console.title("Setup HTTP Proxy");
        let mut sequence = super::proxy_sequence(&flags);
        sequence.add(Task::exec(self.machine_cmd("stop")));
        ctx.run_or_abort(&sequence, "Unable to create the proxy container.")?;
        ctx.console.success("Proxy container is setup.");
        Ok(())
    }

    fn boot(&self, ctx: &Context<'_>) -> BallastResult<()> {
        self.ensure_installed(ctx)?;
        ctx.console.title("Start the Ballast Docker Machine.");
        if self.machine_ip(ctx)?.is_none() {
            let root = ctx.config.project_root();
            let default = root.parent().unwrap_or(root).display().to_string();
            let folder = ctx
                .console
                .ask("What is the path to your docker sites folder?", &default);

            let mut sequence = TaskSequence::new();
            sequence.add(Task::exec(self.machine_cmd("start").quiet()));
            sequence.add(Task::exec(
                CommandSpec::new("docker-machine-nfs")
                    .arg(self.machine.as_str())
                    .arg(format!("--shared-folder={folder}"))
                    .quiet(),
            ));
            ctx.run_or_abort(&sequence, "Unable to start the docker machine.")?;
        }
        ctx.console
            .success("Ballast Docker Machine is ready to host projects.");
        Ok(())
    }

    fn boot_dns(&self, ctx: &Context<'_>) -> BallastResult<bool> {
        let flags = self.docker_flags(ctx)?;
        let ip = self
            .machine_ip(ctx)?
            .ok_or_else(|| BallastError::Precondition(NO_IP.to_string()))?;
        if !self.ensure_dnsmasq(ctx, &flags, &ip)? {
            return Err(BallastError::aborted("Unable to create dns container.", ""));
        }
        self.install_resolver(ctx, &ip)?;
        ctx.console.success("Ballast DNS service started.");
        Ok(true)
    }
}
