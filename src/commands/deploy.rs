use anyhow::{bail, Result};
use chrono::Utc;
use tracing::info;

use ballast::application::DeployLayout;
use ballast::domain::entities::{DeployCredentials, DeployMode, ResolvedDeployPlan};
use ballast::domain::ports::{Console, DeployEventSink};
use ballast::presentation::{create_deploy_pipeline, create_json_event_sink, DeployArgs};

use super::Session;
use crate::ui::events::ConsoleEventSink;

pub fn cmd_deploy(session: &Session, mode: DeployMode, args: DeployArgs) -> Result<()> {
    let env = |key: &str| std::env::var(key).ok();
    let request = args.into_request().with_env_fallbacks(env);
    let plan = ResolvedDeployPlan::resolve(&request, mode, session.config.settings(), Utc::now())?;
    let credentials = DeployCredentials::from_env(env);
    let layout = DeployLayout::from_config(&session.config, &session.home)?;
    info!(
        branch = plan.branch(),
        deploy_branch = plan.deploy_branch(),
        tag = plan.tag().unwrap_or_default(),
        "deploying"
    );

    let events: Box<dyn DeployEventSink> = if session.ui.json {
        Box::new(create_json_event_sink())
    } else {
        Box::new(ConsoleEventSink::new(session.ui))
    };
    let executor = session.services.executor();
    let pipeline = create_deploy_pipeline(&session.services, &executor, events.as_ref(), layout);
    let mut progress = session.progress("Waiting for the front-end build");

    let pushed = pipeline.run(&plan, &credentials, &mut progress)?;
    if !pushed.is_success() {
        let output = pushed.message().trim();
        if !output.is_empty() && !session.ui.json {
            session.console.error(output);
        }
        bail!("Deployment failed.");
    }
    session.console.success("Deployment succeeded.");
    Ok(())
}
