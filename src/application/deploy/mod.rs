//! Deploy Module
//!
//! Builds a sanitized release artifact and pushes it to the deploy remote.
//!
//! ## Structure
//!
//! - `pipeline` - the staged pipeline (`DeployPipeline`) and its paths (`DeployLayout`)
//! - `sanitize` - discovery of files that must not ship

mod pipeline;
mod sanitize;

pub use pipeline::{DeployLayout, DeployPipeline};
pub use sanitize::SanitizeScan;
