//! Configuration module for Ballast
//!
//! Resolution order for every setting:
//! 1. Environment variables (`BALLAST_<KEY>`, highest priority)
//! 2. Project config (`setup/config.yml`)
//! 3. Built-in defaults (lowest priority)
//!
//! The project root comes from `--project-root`, then `BALLAST_PROJECT_ROOT`,
//! then the nearest ancestor of the working directory that looks like a
//! project.

mod loader;
mod types;

pub use loader::{discover_project_root, load, load_from_root, with_env_overrides};
pub use types::{ProjectConfig, Settings, CONFIG_PATH, KNOWN_KEYS};
