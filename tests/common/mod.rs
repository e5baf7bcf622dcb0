//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Descriptor fixtures written into temporary project directories
//! - A handle on the compiled binary
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! fn test_show() {
//!     let (dir, _) = fixtures::json_project(r#"{"appName": "shop"}"#).unwrap();
//!     common::bin().arg("show").arg("build").current_dir(dir.path());
//! }
//! ```

pub mod fixtures;

use assert_cmd::Command;

/// The frontconf binary with logging silenced
#[allow(dead_code)]
pub fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_frontconf"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Parse command stdout as JSON
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
