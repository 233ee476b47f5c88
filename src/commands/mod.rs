//! Subcommand handlers
//!
//! Each handler opens a `Session`, builds a use-case `Context` and maps the
//! outcome onto the exit policy: precondition failures are printed and the
//! command succeeds; everything else propagates to `main`.

pub mod deploy;
pub mod docker;
pub mod key_prep;
pub mod rebuild;
pub mod setup;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::debug;

use ballast::application::{Context, HostStrategy};
use ballast::config::{self, ProjectConfig};
use ballast::domain::ports::Console;
use ballast::domain::value_objects::{Platform, Verbosity};
use ballast::presentation::{create_host_strategy, Cli, Services};
use ballast::BallastResult;

use crate::ui::console::TerminalConsole;
use crate::ui::context::UiContext;
use crate::ui::widgets::progress::TerminalProgress;

/// Everything one invocation needs, owned in one place.
pub struct Session {
    pub ui: UiContext,
    pub config: ProjectConfig,
    pub services: Services,
    pub console: TerminalConsole,
    pub home: PathBuf,
}

impl Session {
    pub fn open(cli: &Cli, ui: UiContext) -> Result<Self> {
        let cwd = std::env::current_dir().context("unable to read the working directory")?;
        let config = config::load(cli.project_root.as_deref(), &cwd, |key| {
            std::env::var(key).ok()
        })?;
        debug!(root = %config.project_root().display(), "project loaded");
        let home = dirs::home_dir().context("unable to locate the home directory")?;
        Ok(Self {
            ui,
            config,
            services: Services::new(Verbosity::from_count(cli.verbose), cli.json),
            console: TerminalConsole::new(ui),
            home,
        })
    }

    /// Run `body` against a fresh use-case context.
    ///
    /// Returns `None` when the body stopped on a precondition, after
    /// reporting it.
    pub fn run<T>(
        &self,
        body: impl FnOnce(&Context<'_>) -> BallastResult<T>,
    ) -> Result<Option<T>> {
        let executor = self.services.executor();
        let ctx = Context {
            config: &self.config,
            runner: &self.services.runner,
            executor: &executor,
            fs: &self.services.fs,
            console: &self.console,
            pause: &self.services.pause,
            home: &self.home,
        };
        match body(&ctx) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_precondition() => {
                self.console.error(&err.to_string());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The current platform, or `None` after telling the user manual setup
    /// is required.
    pub fn platform(&self) -> Option<Platform> {
        match Platform::current() {
            Ok(platform) => Some(platform),
            Err(err) => {
                self.console.error(&format!(
                    "{err}. Ballast cannot manage this machine; set up the project manually."
                ));
                None
            }
        }
    }

    pub fn host(&self) -> Option<Box<dyn HostStrategy>> {
        self.platform().map(create_host_strategy)
    }

    /// Progress bar for readiness waits.
    pub fn progress(&self, message: &str) -> TerminalProgress {
        TerminalProgress::new(self.ui.animation, self.ui.unicode, message)
    }
}
