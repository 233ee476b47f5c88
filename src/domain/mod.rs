//! Domain Layer
//!
//! The orchestration core of Ballast, free of process and terminal I/O.
//!
//! ## Structure
//!
//! - `entities/` - Commands, tasks, task sequences, deploy plans
//! - `value_objects/` - Immutable value types (Platform, Verbosity, ExecutionResult)
//! - `services/` - Readiness polling
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
