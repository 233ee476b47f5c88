//! Front-end build sentinels
//!
//! The front-end container reports progress by writing marker files into the
//! theme directory: `BUILDING.txt` when node modules start installing,
//! `COMPILING.TXT` when gulp starts and `INITIALIZED.txt` when the theme is
//! built. This only works while Ballast and the container share the theme
//! directory through a mount.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ProjectConfig;
use crate::domain::ports::{FileSystem, PollProgress};
use crate::domain::services::ReadinessPoller;
use crate::error::{BallastError, BallastResult};

/// Progress marker written by the front-end container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Building,
    Compiling,
    Initialized,
}

impl BuildStage {
    pub const ALL: [BuildStage; 3] = [
        BuildStage::Building,
        BuildStage::Compiling,
        BuildStage::Initialized,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            BuildStage::Building => "BUILDING.txt",
            BuildStage::Compiling => "COMPILING.TXT",
            BuildStage::Initialized => "INITIALIZED.txt",
        }
    }
}

/// The marker files of one theme directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontEndSentinels {
    dir: PathBuf,
}

impl FrontEndSentinels {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sentinels of the configured theme.
    pub fn from_config(config: &ProjectConfig) -> BallastResult<Self> {
        config.theme_dir().map(Self::new).ok_or_else(|| {
            BallastError::Validation(
                "site_theme_name must be set in setup/config.yml to follow the front-end build."
                    .to_string(),
            )
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, stage: BuildStage) -> PathBuf {
        self.dir.join(stage.file_name())
    }

    pub fn exists(&self, fs: &dyn FileSystem, stage: BuildStage) -> bool {
        fs.exists(&self.path(stage))
    }

    /// Remove all three markers. Missing files and errors are ignored.
    pub fn clear(&self, fs: &dyn FileSystem) {
        for stage in BuildStage::ALL {
            let path = self.path(stage);
            if !fs.exists(&path) {
                continue;
            }
            if let Err(err) = fs.remove(&path) {
                debug!(path = %path.display(), error = %err, "could not clear sentinel");
            }
        }
    }
}

/// Wait for the theme to finish building after `docker-compose up`.
///
/// Clears the markers when the build reports ready.
pub fn wait_for_launch(
    poller: &ReadinessPoller<'_>,
    sentinels: &FrontEndSentinels,
    fs: &dyn FileSystem,
    progress: &mut dyn PollProgress,
) -> bool {
    let ready = poller.wait_for_path(fs, &sentinels.path(BuildStage::Initialized), progress);
    if ready {
        sentinels.clear(fs);
    }
    ready
}

/// Wait for the front-end build a deployment depends on.
///
/// Runs full poll cycles until the build reports ready. Between cycles the
/// build must have moved on: `NeverStarted` when `BUILDING.txt` has not
/// appeared after the first cycle, `Stalled` when a cycle ends without a new
/// marker. Each newly seen marker is passed to `notify`.
pub fn wait_for_deploy_dependencies(
    poller: &ReadinessPoller<'_>,
    sentinels: &FrontEndSentinels,
    fs: &dyn FileSystem,
    progress: &mut dyn PollProgress,
    notify: &mut dyn FnMut(&str),
) -> BallastResult<()> {
    notify("Waiting for front-end tools to initialize.");
    let mut building = false;
    let mut compiling = false;
    let mut cycles = 0;

    loop {
        if poller.wait_for_path(fs, &sentinels.path(BuildStage::Initialized), progress) {
            sentinels.clear(fs);
            return Ok(());
        }
        cycles += 1;

        let mut advanced = false;
        if !building {
            if !sentinels.exists(fs, BuildStage::Building) {
                return Err(BallastError::NeverStarted);
            }
            building = true;
            advanced = true;
            notify("Node modules began compiling.");
        }
        if !compiling && sentinels.exists(fs, BuildStage::Compiling) {
            compiling = true;
            advanced = true;
            notify("Node modules have finished compiling. Gulp is compiling the theme.");
        }
        if !advanced {
            return Err(BallastError::Stalled { cycles });
        }
    }
}
