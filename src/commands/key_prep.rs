use anyhow::Result;

use ballast::application::key_prep;

use super::Session;

pub fn cmd_key_prep(session: &Session, path: &str) -> Result<()> {
    session.run(|ctx| key_prep::key_prep(ctx, path))?;
    Ok(())
}
