//! Host platform strategies
//!
//! Each supported platform drives the container engine differently: macOS
//! runs it inside a `docker-machine` VM, Linux runs it natively. The command
//! layer picks one `HostStrategy` at startup and every use case goes through
//! it instead of branching on the operating system.

mod linux;
mod mac;

pub use linux::LinuxHost;
pub use mac::{MacHost, RouteProbe, MACHINE_NAME};

use tracing::debug;

use super::Context;
use crate::domain::entities::{CommandSpec, Task, TaskSequence};
use crate::domain::ports::is_installed;
use crate::domain::value_objects::Platform;
use crate::error::BallastResult;

/// A tool a developer machine needs, with how to get it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// Executable checked with `which`
    pub command: &'static str,
    pub name: &'static str,
    /// Homebrew tap to add first
    pub tap: Option<&'static str>,
    /// Homebrew package providing `command`
    pub package: Option<&'static str>,
    /// Install instructions for platforms without a package manager step
    pub url: &'static str,
}

/// A tool that must already exist before requirements can be installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisite {
    pub command: &'static str,
    /// Shown when `command` is missing
    pub message: &'static str,
}

pub trait HostStrategy {
    fn platform(&self) -> Platform;

    fn prerequisites(&self) -> Vec<Prerequisite>;

    fn requirements(&self) -> Vec<Requirement>;

    /// Report or install `missing`. Returns whether the host is now ready.
    fn install_missing(&self, ctx: &Context<'_>, missing: &[Requirement]) -> BallastResult<bool>;

    /// Extra flags that point `docker` and `docker-compose` at the engine.
    fn docker_flags(&self, ctx: &Context<'_>) -> BallastResult<String>;

    /// Address published container ports are reachable on, if running.
    fn machine_ip(&self, ctx: &Context<'_>) -> BallastResult<Option<String>>;

    /// Address containers use to reach services on the host.
    fn host_ip_for_containers(&self, ctx: &Context<'_>) -> BallastResult<String>;

    /// Fails with a precondition error unless the engine is installed.
    fn ensure_installed(&self, ctx: &Context<'_>) -> BallastResult<()>;

    /// Fails with a precondition error unless the engine is running.
    fn ensure_booted(&self, ctx: &Context<'_>) -> BallastResult<()>;

    /// The host IP to write into `docker-compose.yml`.
    fn compose_host_ip(&self, ctx: &Context<'_>) -> BallastResult<String> {
        self.ensure_booted(ctx)?;
        self.host_ip_for_containers(ctx)
    }

    /// One-time creation of the container engine.
    fn setup_engine(&self, ctx: &Context<'_>) -> BallastResult<()>;

    /// Create the shared HTTP proxy container.
    fn create_proxy(&self, ctx: &Context<'_>) -> BallastResult<()>;

    /// Start the container engine.
    fn boot(&self, ctx: &Context<'_>) -> BallastResult<()>;

    /// Start local DNS for the site TLD. Returns whether DNS now resolves
    /// project domains so the site can be launched.
    fn boot_dns(&self, ctx: &Context<'_>) -> BallastResult<bool>;
}

/// The strategy for `platform`, using the real route probe on macOS.
pub fn strategy_for(platform: Platform, probe: RouteProbe) -> Box<dyn HostStrategy> {
    match platform {
        Platform::Mac => Box::new(MacHost::new(probe)),
        Platform::Linux => Box::new(LinuxHost),
    }
}

/// `program [flags] rest` as a shell line, skipping empty flags.
pub fn with_flags(program: &str, flags: &str, rest: &str) -> String {
    [program, flags.trim(), rest]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Requirements whose command is not on `PATH`.
pub fn missing_requirements(
    ctx: &Context<'_>,
    requirements: &[Requirement],
) -> BallastResult<Vec<Requirement>> {
    ctx.console.section("Checking for Installed Requirements");
    let mut missing = Vec::new();
    for requirement in requirements {
        let installed = is_installed(ctx.runner, requirement.command)?;
        debug!(command = requirement.command, installed, "requirement");
        if !installed {
            missing.push(*requirement);
        }
    }
    Ok(missing)
}

/// Network plus `http-proxy` container, each removed again on failure.
pub(crate) fn proxy_sequence(flags: &str) -> TaskSequence {
    let mut sequence = TaskSequence::new();
    sequence.add_with_rollback(
        Task::exec(CommandSpec::shell(with_flags("docker", flags, "network create proxynet"))),
        CommandSpec::shell(with_flags("docker", flags, "network prune -f")),
    );
    sequence.add_with_rollback(
        Task::exec(CommandSpec::shell(with_flags(
            "docker",
            flags,
            "run -d -v /var/run/docker.sock:/tmp/docker.sock:ro -p 80:80 --restart always \
             --network proxynet --name http-proxy digitalpulp/nginx-proxy",
        ))),
        CommandSpec::shell(with_flags("docker", flags, "rm http-proxy")),
    );
    sequence
}
