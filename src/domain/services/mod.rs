//! Domain Services

pub mod readiness;

pub use readiness::ReadinessPoller;
