//! Starting the container engine and local DNS

use super::compose::compose_up;
use super::host::HostStrategy;
use super::Context;
use crate::domain::ports::PollProgress;
use crate::error::BallastResult;

pub fn boot(ctx: &Context<'_>, host: &dyn HostStrategy) -> BallastResult<()> {
    host.boot(ctx)
}

/// Start DNS for the site TLD, then offer to launch the site.
pub fn boot_dns(
    ctx: &Context<'_>,
    host: &dyn HostStrategy,
    progress: &mut dyn PollProgress,
) -> BallastResult<()> {
    if host.boot_dns(ctx)?
        && ctx.console.confirm(
            "Would you also like to launch the site created by this project?",
            false,
        )
    {
        compose_up(ctx, host, progress)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::host::{LinuxHost, MacHost};
    use crate::application::testing::{Fixture, RecordingConsole};
    use crate::domain::ports::NoProgress;
    use crate::infrastructure::process::scripted::ScriptedRunner;
    use crate::infrastructure::HostExecutor;
    use std::net::{IpAddr, Ipv4Addr};

    fn probe(_peer: &str) -> BallastResult<IpAddr> {
        Ok(IpAddr::V4(Ipv4Addr::new(192, 168, 99, 1)))
    }

    #[test]
    fn linux_dns_does_not_offer_launch() {
        let fixture = Fixture::new(&[]);
        let runner = ScriptedRunner::new();
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);

        boot_dns(&ctx, &LinuxHost, &mut NoProgress).unwrap();

        assert!(fixture.console.messages("confirm").is_empty());
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn mac_dns_launches_site_when_confirmed() {
        let console = RecordingConsole::new().confirm_with("Would you also like to launch", true);
        let fixture = Fixture::with_console(&[("site_shortname", "demo")], console);
        std::fs::create_dir_all(fixture.home.join(".docker/machine/machines/dp-docker")).unwrap();
        std::fs::create_dir_all(fixture.root().join("docroot/core")).unwrap();
        fixture.file("setup/docker/docker-compose-template", "name: {site_shortname}\n");
        let resolver = fixture.dir.path().join("resolver");
        std::fs::create_dir_all(&resolver).unwrap();
        std::fs::write(resolver.join("dpulp"), "nameserver 192.168.99.100\n").unwrap();
        let runner = ScriptedRunner::new()
            .respond("docker-machine ip", "192.168.99.100\n")
            .respond("docker-machine url", "tcp://192.168.99.100:2376\n")
            .respond("docker inspect dnsmasq", r#"[{"State":{"Running":true}}]"#);
        let executor = HostExecutor::new(&runner, &fixture.fs);
        let ctx = fixture.context(&runner, &executor);
        let host = MacHost::new(probe).with_resolver_dir(&resolver);

        boot_dns(&ctx, &host, &mut NoProgress).unwrap();

        assert_eq!(runner.commands_starting_with("docker-compose"), vec!["docker-compose up -d"]);
        assert_eq!(fixture.read("docker-compose.yml"), "name: demo\n");
    }
}
