//! Test fixture helpers for creating descriptor projects
//!
//! Each helper returns the TempDir (which must be kept alive) together with
//! the path of the descriptor it wrote.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// A descriptor using every legacy key name
pub const LEGACY_DESCRIPTOR: &str = r#"{
    "appName": "shop",
    "buildPath": "./dist",
    "vendors": ["@angular/core", "rxjs"],
    "exportJQuery": true,
    "useTemplateUrl": true,
    "buildAoT": false,
    "tsConfigAOT": "tsconfig.aot.json",
    "karmaFiles": ["node_modules/jquery/dist/jquery.js"]
}"#;

/// An ahead-of-time descriptor with a distinct production entry
pub const AOT_DESCRIPTOR: &str = r#"{
    "appName": "shop",
    "vendors": ["rxjs"],
    "prodEntryFile": "./app/main.prod.ts",
    "aotEntryFile": "./app/main.aot.ts",
    "enableAheadOfTimeCompile": true,
    "enableBundleAnalysis": true
}"#;

/// Project directory holding `frontconf.json`
pub fn json_project(contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    project("frontconf.json", contents)
}

/// Project directory holding `frontconf.toml`
pub fn toml_project(contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    project("frontconf.toml", contents)
}

/// Project directory holding a descriptor under `file_name`
pub fn project(file_name: &str, contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(file_name);
    fs::write(&path, contents)?;
    Ok((temp_dir, path))
}
