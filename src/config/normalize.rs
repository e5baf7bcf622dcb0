//! Descriptor normalization
//!
//! The composition engine never reads a raw descriptor. Normalization fills
//! every optional field with its default and is idempotent: turning a
//! normalized descriptor back into a raw one and normalizing again gives the
//! same value.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::file::ProjectDescriptor;
use crate::rules::CompilationStrategy;

/// Default application name
pub const DEFAULT_APP_NAME: &str = "app";
/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "./build";
/// Default dev and production entry file
pub const DEFAULT_ENTRY_FILE: &str = "./app/main.ts";
/// Default ahead-of-time entry file
pub const DEFAULT_AOT_ENTRY_FILE: &str = "./app/main.aot.ts";
/// Default AOT root module
pub const DEFAULT_AOT_ENTRY_MODULE: &str = "app/app.module#AppModule";
/// Default AOT TypeScript config
pub const DEFAULT_AOT_TOOL_CONFIG: &str = "tsconfig.aot.json";
/// Default HTML page template
pub const DEFAULT_INDEX_TEMPLATE: &str = "./app/index.html";
/// Default dev-server port
pub const DEFAULT_DEV_SERVER_PORT: u16 = 8080;

/// Descriptor with every field filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDescriptor {
    /// Directory relative paths are resolved against
    pub root: PathBuf,
    /// Application name
    pub app_name: String,
    /// Output directory, relative to `root`
    pub output_dir: String,
    /// Vendor modules
    pub vendors: Vec<String>,
    /// Dev-server entry
    pub dev_entry_file: String,
    /// Production entry
    pub prod_entry_file: String,
    /// Ahead-of-time entry
    pub aot_entry_file: String,
    /// AOT root module
    pub aot_entry_module: String,
    /// AOT TypeScript config
    pub aot_tool_config_path: String,
    /// HTML page template
    pub index_template: String,
    /// Expose jQuery globally
    pub export_global: bool,
    /// Inline templates
    pub use_template_inlining: bool,
    /// Compile ahead of time
    pub enable_ahead_of_time_compile: bool,
    /// Add the bundle analyzer
    pub enable_bundle_analysis: bool,
    /// Extra harness files
    pub extra_test_files: Vec<String>,
    /// Dev-server port
    pub dev_server_port: u16,
}

impl ProjectDescriptor {
    /// Normalize with the current directory as project root
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::config::ProjectDescriptor;
    ///
    /// let normalized = ProjectDescriptor::default().normalize();
    /// assert_eq!(normalized.output_dir, "./build");
    /// assert_eq!(normalized.dev_server_port, 8080);
    /// assert!(!normalized.export_global);
    /// ```
    pub fn normalize(&self) -> NormalizedDescriptor {
        self.normalize_in(Path::new("."))
    }

    /// Normalize with `root` as project root
    pub fn normalize_in(&self, root: &Path) -> NormalizedDescriptor {
        let text = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };

        NormalizedDescriptor {
            root: root.to_path_buf(),
            app_name: text(&self.app_name, DEFAULT_APP_NAME),
            output_dir: text(&self.output_dir, DEFAULT_OUTPUT_DIR),
            vendors: self.vendors.clone().unwrap_or_default(),
            dev_entry_file: text(&self.dev_entry_file, DEFAULT_ENTRY_FILE),
            prod_entry_file: text(&self.prod_entry_file, DEFAULT_ENTRY_FILE),
            aot_entry_file: text(&self.aot_entry_file, DEFAULT_AOT_ENTRY_FILE),
            aot_entry_module: text(&self.aot_entry_module, DEFAULT_AOT_ENTRY_MODULE),
            aot_tool_config_path: text(&self.aot_tool_config_path, DEFAULT_AOT_TOOL_CONFIG),
            index_template: text(&self.index_template, DEFAULT_INDEX_TEMPLATE),
            export_global: self.export_global.unwrap_or(false),
            // An explicit AOT entry implies templates are written for inlining
            use_template_inlining: self
                .use_template_inlining
                .unwrap_or(self.aot_entry_file.is_some()),
            enable_ahead_of_time_compile: self.enable_ahead_of_time_compile.unwrap_or(false),
            enable_bundle_analysis: self.enable_bundle_analysis.unwrap_or(false),
            extra_test_files: self.extra_test_files.clone().unwrap_or_default(),
            dev_server_port: self.dev_server_port.unwrap_or(DEFAULT_DEV_SERVER_PORT),
        }
    }
}

impl From<&NormalizedDescriptor> for ProjectDescriptor {
    fn from(normalized: &NormalizedDescriptor) -> Self {
        Self {
            app_name: Some(normalized.app_name.clone()),
            output_dir: Some(normalized.output_dir.clone()),
            vendors: Some(normalized.vendors.clone()),
            dev_entry_file: Some(normalized.dev_entry_file.clone()),
            prod_entry_file: Some(normalized.prod_entry_file.clone()),
            aot_entry_file: Some(normalized.aot_entry_file.clone()),
            aot_entry_module: Some(normalized.aot_entry_module.clone()),
            aot_tool_config_path: Some(normalized.aot_tool_config_path.clone()),
            index_template: Some(normalized.index_template.clone()),
            export_global: Some(normalized.export_global),
            use_template_inlining: Some(normalized.use_template_inlining),
            enable_ahead_of_time_compile: Some(normalized.enable_ahead_of_time_compile),
            enable_bundle_analysis: Some(normalized.enable_bundle_analysis),
            extra_test_files: Some(normalized.extra_test_files.clone()),
            dev_server_port: Some(normalized.dev_server_port),
        }
    }
}

impl NormalizedDescriptor {
    /// Compilation strategy for this descriptor
    pub fn strategy(&self) -> CompilationStrategy {
        CompilationStrategy::resolve(
            self.enable_ahead_of_time_compile,
            self.use_template_inlining,
        )
    }

    /// Resolve a descriptor-relative path against the project root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let trimmed = relative.strip_prefix("./").unwrap_or(relative);
        self.root.join(trimmed)
    }

    /// Absolute output directory
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }
}
