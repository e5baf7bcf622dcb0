#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! frontconf library
//!
//! Derives bundler and test-harness configurations for a front-end
//! application from a small project descriptor. It can be used
//! programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Composing the production build configuration:
//!
//! ```
//! use frontconf::compose::Composer;
//! use frontconf::config::ProjectDescriptor;
//! use frontconf::rules::{CompilationStrategy, RuleCatalog};
//! use std::path::Path;
//!
//! let descriptor = ProjectDescriptor {
//!     vendors: Some(vec!["@angular/core".to_string(), "rxjs".to_string()]),
//!     enable_ahead_of_time_compile: Some(true),
//!     ..Default::default()
//! }
//! .normalize_in(Path::new("/srv/shop"));
//! let catalog = RuleCatalog::builtin(Path::new("/srv/shop"));
//!
//! let composer = Composer::new(&descriptor, &catalog);
//! assert_eq!(composer.strategy(), CompilationStrategy::Aot);
//!
//! let build = composer.build();
//! assert_eq!(build.app_entries(), ["./app/main.aot.ts"]);
//! assert!(build.has_plugin("AotPlugin"));
//! ```
//!
//! # Advanced Example: Test Harness
//!
//! The harness configuration embeds the test variant:
//!
//! ```
//! use frontconf::compose::Composer;
//! use frontconf::config::ProjectDescriptor;
//! use frontconf::harness::Launcher;
//! use frontconf::rules::RuleCatalog;
//! use std::path::Path;
//!
//! let descriptor = ProjectDescriptor {
//!     extra_test_files: Some(vec!["node_modules/jquery/dist/jquery.js".to_string()]),
//!     ..Default::default()
//! }
//! .normalize();
//! let catalog = RuleCatalog::builtin(Path::new("."));
//! let composer = Composer::new(&descriptor, &catalog);
//!
//! let harness = composer.harness(Launcher::Headless);
//! assert_eq!(harness.files.len(), 11);
//! assert_eq!(harness.webpack, composer.test());
//! ```

/// Bundler-facing configuration types
pub mod bundler;
/// Command handlers for CLI operations
pub mod cmd;
/// Variant composition
pub mod compose;
/// Descriptor loading, normalization and checks
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Test-harness configuration
pub mod harness;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Processing rules, strategies and selection
pub mod rules;
