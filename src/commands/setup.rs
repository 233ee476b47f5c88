use anyhow::Result;

use ballast::application::setup;
use ballast::presentation::SetupCommands;

use super::Session;

pub fn cmd_setup(session: &Session, command: SetupCommands) -> Result<()> {
    match command {
        SetupCommands::Prerequisites => {
            let Some(host) = session.host() else {
                return Ok(());
            };
            session.run(|ctx| setup::prerequisites(ctx, host.as_ref()))?;
        }
        SetupCommands::Project => {
            let Some(platform) = session.platform() else {
                return Ok(());
            };
            session.run(|ctx| setup::project(ctx, platform))?;
        }
        SetupCommands::Docker => {
            let Some(host) = session.host() else {
                return Ok(());
            };
            session.run(|ctx| setup::engine(ctx, host.as_ref()))?;
        }
    }
    Ok(())
}
