//! Ballast CLI - local development and deployment orchestration
//!
//! Usage: ballast <COMMAND>
//!
//! Commands:
//!   setup         Prepare this machine and project
//!   docker        Container engine and project stack
//!   boot          Start the container engine
//!   boot-dns      Start DNS for the local site domain
//!   rebuild       Rebuild the local database from a remote environment
//!   connect-sql   Show where the database can be reached
//!   key-prep      Fold a private key into the env file
//!   deploy        Build and push a deployment

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use ballast::domain::entities::DeployMode;
use ballast::presentation::{Cli, Commands};

use crate::commands::Session;
use crate::ui::context::UiContext;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("BALLAST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("ballast={default_level}")));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    if let Err(err) = run(cli) {
        ui::error::print_error(&err, json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, cli.yes);
    let session = Session::open(&cli, ui)?;

    match cli.command {
        Commands::Setup(command) => commands::setup::cmd_setup(&session, command),
        Commands::Docker(command) => commands::docker::cmd_docker(&session, command),
        Commands::Boot => commands::docker::cmd_boot(&session),
        Commands::BootDns => commands::docker::cmd_boot_dns(&session),
        Commands::Rebuild { environment } => commands::rebuild::cmd_rebuild(&session, &environment),
        Commands::ConnectSql => commands::docker::cmd_connect_sql(&session),
        Commands::KeyPrep { path } => commands::key_prep::cmd_key_prep(&session, &path),
        Commands::Deploy(args) => commands::deploy::cmd_deploy(&session, DeployMode::Auto, args),
        Commands::DeployBranch(args) => {
            commands::deploy::cmd_deploy(&session, DeployMode::Branch, args)
        }
        Commands::DeployTag(args) => commands::deploy::cmd_deploy(&session, DeployMode::Tag, args),
    }
}
