//! Ballast - local development and deployment orchestration
//!
//! Ballast drives the external tools a containerised web project depends on
//! (docker, docker-machine, git, drush, brew) as ordered task sequences with
//! compensating rollbacks, waits on the front-end build container through
//! sentinel files, and builds sanitized deployment artifacts that are pushed
//! to a remote repository as a branch or a tag.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use config::{ProjectConfig, Settings};
pub use error::{BallastError, BallastResult};
