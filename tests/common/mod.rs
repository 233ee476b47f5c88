//! Common test utilities for Ballast CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories plus a CLI runner
//! - Assertion macros: `assert_output_contains!`, `assert_exit_code!`

#![allow(dead_code)]

pub mod assertions;
pub mod env;

pub use env::*;
