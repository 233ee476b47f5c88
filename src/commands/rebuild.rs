use anyhow::Result;

use ballast::application::rebuild;

use super::Session;

pub fn cmd_rebuild(session: &Session, environment: &str) -> Result<()> {
    let Some(host) = session.host() else {
        return Ok(());
    };
    session.run(|ctx| rebuild::rebuild(ctx, host.as_ref(), environment))?;
    Ok(())
}
