//! Command handlers for frontconf CLI
//!
//! This module contains all command implementations, organized by functionality.
//! Each submodule handles a specific CLI command.

pub mod check;
pub mod completions;
pub mod emit;
pub mod init;
pub mod show;
pub mod strategy;
pub mod workspace;

// Re-export command functions for convenient access
pub use check::cmd_check;
pub use completions::cmd_completions;
pub use emit::cmd_emit;
pub use init::cmd_init;
pub use show::cmd_show;
pub use strategy::cmd_strategy;
pub use workspace::Workspace;
