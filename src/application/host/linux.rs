//! Linux: docker runs natively

use super::{HostStrategy, Prerequisite, Requirement};
use crate::application::Context;
use crate::domain::value_objects::Platform;
use crate::error::BallastResult;

const NOT_NEEDED: &str = "This command is not needed for Linux users.";

/// Containers reach the host through docker's host gateway alias.
const CONTAINER_HOST: &str = "host.docker.internal";

/// Published ports bind the loopback interface.
const LOCAL_IP: &str = "127.0.0.1";

const REQUIREMENTS: &[Requirement] = &[
    Requirement {
        command: "ddev",
        name: "DDEV Local",
        tap: None,
        package: None,
        url: "https://github.com/drud/ddev",
    },
    Requirement {
        command: "docker",
        name: "Docker",
        tap: None,
        package: None,
        url: "https://docs.docker.com/engine/install/",
    },
    Requirement {
        command: "docker-compose",
        name: "Docker Compose",
        tap: None,
        package: None,
        url: "https://docs.docker.com/compose/install/",
    },
    Requirement {
        command: "pre-commit",
        name: "pre-commit by Yelp",
        tap: None,
        package: None,
        url: "https://pre-commit.com/#install",
    },
];

#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxHost;

impl HostStrategy for LinuxHost {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn prerequisites(&self) -> Vec<Prerequisite> {
        Vec::new()
    }

    fn requirements(&self) -> Vec<Requirement> {
        REQUIREMENTS.to_vec()
    }

    fn install_missing(&self, ctx: &Context<'_>, missing: &[Requirement]) -> BallastResult<bool> {
        ctx.console
            .warning("Your system is missing required software to use Ballast");
        ctx.console.text("The following packages need to be installed:");
        let names: Vec<String> = missing.iter().map(|r| r.name.to_string()).collect();
        ctx.console.listing(&names);
        ctx.console.note("Here are urls where you can find more info:");
        let urls: Vec<String> = missing.iter().map(|r| r.url.to_string()).collect();
        ctx.console.listing(&urls);
        Ok(false)
    }

    fn docker_flags(&self, _ctx: &Context<'_>) -> BallastResult<String> {
        Ok(String::new())
    }

    fn machine_ip(&self, _ctx: &Context<'_>) -> BallastResult<Option<String>> {
        Ok(Some(LOCAL_IP.to_string()))
    }

    fn host_ip_for_containers(&self, _ctx: &Context<'_>) -> BallastResult<String> {
        Ok(CONTAINER_HOST.to_string())
    }

    fn ensure_installed(&self, _ctx: &Context<'_>) -> BallastResult<()> {
        Ok(())
    }

    fn ensure_booted(&self, _ctx: &Context<'_>) -> BallastResult<()> {
        Ok(())
    }

    fn setup_engine(&self, ctx: &Context<'_>) -> BallastResult<()> {
        ctx.console.note(NOT_NEEDED);
        Ok(())
    }

    fn create_proxy(&self, ctx: &Context<'_>) -> BallastResult<()> {
        ctx.console.note(NOT_NEEDED);
        Ok(())
    }

    fn boot(&self, ctx: &Context<'_>) -> BallastResult<()> {
        ctx.console.text("Linux runs Docker natively.");
        Ok(())
    }

    fn boot_dns(&self, ctx: &Context<'_>) -> BallastResult<bool> {
        let tld = ctx.config.settings().site_tld();
        ctx.console.note(&format!(
            "Since Docker containers run natively in Linux, while Ballast is running \
             all the hosted sites are served by a proxy to port 80.  For easy \
             resolution on our *.{tld} subdomain, Linux users should setup a local \
             resolver that sends all *.{tld} requests to the loopback address. \
             Further instructions with helpful urls are in the README.md file."
        ));
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Fixture;
    use crate::infrastructure::process::scripted::ScriptedRunner;
    use crate::infrastructure::HostExecutor;

    #[test]
    fn engine_addresses_are_fixed() {
        let fixture = Fixture::new(&[]);
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        assert_eq!(LinuxHost.docker_flags(&ctx).unwrap(), "");
        assert_eq!(LinuxHost.compose_host_ip(&ctx).unwrap(), "host.docker.internal");
        assert_eq!(LinuxHost.machine_ip(&ctx).unwrap().as_deref(), Some("127.0.0.1"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn missing_requirements_are_listed_with_urls() {
        let fixture = Fixture::new(&[]);
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        let ready = LinuxHost.install_missing(&ctx, &REQUIREMENTS[1..2]).unwrap();

        assert!(!ready);
        assert_eq!(
            fixture.console.messages("listing"),
            vec!["Docker", "https://docs.docker.com/engine/install/"]
        );
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn dns_instructions_name_the_tld() {
        let fixture = Fixture::new(&[("site_tld", "test")]);
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        assert!(!LinuxHost.boot_dns(&ctx).unwrap());
        assert!(fixture.console.has("note", "*.test requests"));
    }
}
