use anyhow::Result;

use ballast::application::{boot, compose};
use ballast::presentation::DockerCommands;

use super::Session;

const WAITING: &str = "Waiting for front-end tools";

pub fn cmd_docker(session: &Session, command: DockerCommands) -> Result<()> {
    let Some(host) = session.host() else {
        return Ok(());
    };
    match command {
        DockerCommands::ProxyCreate => {
            session.run(|ctx| host.create_proxy(ctx))?;
        }
        DockerCommands::ComposeUp => {
            let mut progress = session.progress(WAITING);
            session.run(|ctx| compose::compose_up(ctx, host.as_ref(), &mut progress))?;
        }
    }
    Ok(())
}

pub fn cmd_boot(session: &Session) -> Result<()> {
    let Some(host) = session.host() else {
        return Ok(());
    };
    session.run(|ctx| boot::boot(ctx, host.as_ref()))?;
    Ok(())
}

pub fn cmd_boot_dns(session: &Session) -> Result<()> {
    let Some(host) = session.host() else {
        return Ok(());
    };
    let mut progress = session.progress(WAITING);
    session.run(|ctx| boot::boot_dns(ctx, host.as_ref(), &mut progress))?;
    Ok(())
}

pub fn cmd_connect_sql(session: &Session) -> Result<()> {
    let Some(host) = session.host() else {
        return Ok(());
    };
    session.run(|ctx| compose::connect_sql(ctx, host.as_ref()))?;
    Ok(())
}
