//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --project-root, --yes) are inherited by all subcommands
//! - Deploy options fall back to CI environment variables when omitted

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::rebuild::DEFAULT_ENVIRONMENT;
use crate::domain::entities::DeployRequest;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Ballast - local development and deployment orchestration
#[derive(Parser, Debug)]
#[command(name = "ballast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit deploy progress as NDJSON events
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (defaults to the nearest directory with setup/config.yml)
    #[arg(long, global = true, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// Skip interactive prompts (accept the defaults)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One-time setup of this machine and project
    #[command(subcommand)]
    Setup(SetupCommands),

    /// Container engine and project stack
    #[command(subcommand)]
    Docker(DockerCommands),

    /// Start the container engine
    Boot,

    /// Start DNS for the local site domain
    BootDns,

    /// Rebuild the local database from a remote environment
    Rebuild {
        /// Remote environment to pull from
        #[arg(default_value = DEFAULT_ENVIRONMENT)]
        environment: String,
    },

    /// Show where the database container can be reached
    ConnectSql,

    /// Append a private key file to the env file as SSH_PRIVATE_KEY
    KeyPrep {
        /// Key file, relative to the project root
        path: String,
    },

    /// Build and push a deployment (a tag deploy when --tag is given)
    Deploy(DeployArgs),

    /// Build and push a branch deployment
    DeployBranch(DeployArgs),

    /// Build and push a tagged deployment
    DeployTag(DeployArgs),
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupCommands {
    /// Install the tools Ballast drives
    Prerequisites,
    /// Install git hooks, local settings and ahoy commands
    Project,
    /// Create the docker-machine VM
    Docker,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerCommands {
    /// Create the shared HTTP proxy container
    ProxyCreate,
    /// Render docker-compose.yml and start the project stack
    #[command(visible_alias = "launch")]
    ComposeUp,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployArgs {
    /// Source branch (default: $CI_BRANCH)
    #[arg(long)]
    pub branch: Option<String>,

    /// Tag to create and push
    #[arg(long)]
    pub tag: Option<String>,

    /// Commit message for the build commit
    #[arg(long)]
    pub commit_msg: Option<String>,

    /// Branch on the remote (default: the source branch)
    #[arg(long)]
    pub remote_branch: Option<String>,

    /// Remote repository URL (default: $DEPLOY_TARGET)
    #[arg(long)]
    pub remote: Option<String>,

    /// Build identifier (default: first 7 characters of $CI_COMMIT_ID)
    #[arg(long, alias = "build_id")]
    pub build_id: Option<String>,
}

impl DeployArgs {
    pub fn into_request(self) -> DeployRequest {
        DeployRequest {
            branch: self.branch,
            tag: self.tag,
            commit_msg: self.commit_msg,
            remote_branch: self.remote_branch,
            remote: self.remote,
            build_id: self.build_id,
        }
    }
}
