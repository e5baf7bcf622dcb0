//! Bundler-facing configuration types
//!
//! Field names serialize to the shape the bundler consumes:
//! `{entry, output, module.rules, plugins, resolve.extensions, devtool}`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::rules::RuleDefinition;

/// Source-map generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceMapMode {
    /// Separate full source maps
    #[serde(rename = "source-map")]
    SourceMap,
    /// Source maps inlined into the bundle
    #[serde(rename = "inline-source-map")]
    Inline,
    /// Line-only maps of the original sources
    #[serde(rename = "cheap-module-source-map")]
    CheapModule,
}

/// Named entry chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPoints {
    /// Application entry files, in load order
    pub app: Vec<String>,
    /// Vendor modules
    pub vendor: Vec<String>,
}

/// Where and how bundles are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Output directory
    pub path: PathBuf,
    /// Bundle filename pattern
    pub filename: String,
    /// Source-map filename pattern
    pub source_map_filename: String,
    /// URL prefix the bundles are served under
    pub public_path: String,
}

/// Module processing section
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModuleConfig {
    /// Ordered processing rules
    pub rules: Vec<RuleDefinition>,
}

/// Module resolution section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolveConfig {
    /// Extensions tried when an import has none
    pub extensions: Vec<String>,
}

/// Minifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifierOptions {
    /// Emit source maps for minified output
    pub source_map: bool,
    /// Mangle identifiers
    pub mangle: bool,
    /// Compressor settings
    pub compress: CompressOptions,
    /// Output settings
    pub output: MinifierOutput,
    /// Minimize
    pub minimize: bool,
}

/// Compressor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressOptions {
    /// Print compressor warnings
    pub warnings: bool,
    /// Treat property getters as side-effect free
    pub pure_getters: bool,
    /// Allow unsafe transformations
    #[serde(rename = "unsafe")]
    pub unsafe_transforms: bool,
}

/// Minifier output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinifierOutput {
    /// Keep comments
    pub comments: bool,
}

impl Default for MinifierOptions {
    fn default() -> Self {
        Self {
            source_map: true,
            mangle: true,
            compress: CompressOptions {
                warnings: false,
                pure_getters: true,
                unsafe_transforms: true,
            },
            output: MinifierOutput { comments: false },
            minimize: true,
        }
    }
}

/// Bundler plugin, tagged with the plugin's constructor name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin")]
pub enum Plugin {
    /// Binds free identifiers to modules
    #[serde(rename = "ProvidePlugin")]
    Provide {
        /// identifier → module
        definitions: BTreeMap<String, String>,
    },
    /// Compile-time constants
    #[serde(rename = "DefinePlugin")]
    Define {
        /// expression → literal source
        definitions: BTreeMap<String, String>,
    },
    /// Injects bundles into an HTML page
    #[serde(rename = "HtmlWebpackPlugin")]
    HtmlTemplate {
        /// Emitted page
        filename: String,
        /// Source page
        template: String,
    },
    /// Hot module replacement for the dev server
    #[serde(rename = "HotModuleReplacementPlugin")]
    HotModuleReplacement,
    /// Loader options shared by every loader
    #[serde(rename = "LoaderOptionsPlugin")]
    LoaderOptions {
        /// Loader debug mode
        debug: bool,
    },
    /// Ahead-of-time compiler
    #[serde(rename = "AotPlugin", rename_all = "camelCase")]
    AotCompiler {
        /// TypeScript config
        ts_config_path: PathBuf,
        /// Root module (`path#Symbol`)
        entry_module: String,
    },
    /// Minifier
    #[serde(rename = "UglifyJsPlugin")]
    Minifier(MinifierOptions),
    /// Splits vendor modules into their own chunk
    #[serde(rename = "CommonsChunkPlugin")]
    VendorChunk {
        /// Chunk name
        name: String,
        /// Chunk filename pattern
        filename: String,
    },
    /// Scope hoisting
    #[serde(rename = "ModuleConcatenationPlugin")]
    ModuleConcatenation,
    /// Bundle-size report
    #[serde(rename = "BundleAnalyzerPlugin")]
    BundleAnalyzer,
}

impl Plugin {
    /// The global-variable provider binding jQuery
    pub fn jquery_provider() -> Self {
        let definitions = ["$", "jQuery", "window.jQuery"]
            .into_iter()
            .map(|symbol| (symbol.to_string(), "jquery".to_string()))
            .collect();
        Self::Provide { definitions }
    }

    /// Marks the build as production for dead-code elimination
    pub fn production_env() -> Self {
        let mut definitions = BTreeMap::new();
        definitions.insert(
            "process.env.NODE_ENV".to_string(),
            "\"production\"".to_string(),
        );
        Self::Define { definitions }
    }

    /// Plugin constructor name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Provide { .. } => "ProvidePlugin",
            Self::Define { .. } => "DefinePlugin",
            Self::HtmlTemplate { .. } => "HtmlWebpackPlugin",
            Self::HotModuleReplacement => "HotModuleReplacementPlugin",
            Self::LoaderOptions { .. } => "LoaderOptionsPlugin",
            Self::AotCompiler { .. } => "AotPlugin",
            Self::Minifier(_) => "UglifyJsPlugin",
            Self::VendorChunk { .. } => "CommonsChunkPlugin",
            Self::ModuleConcatenation => "ModuleConcatenationPlugin",
            Self::BundleAnalyzer => "BundleAnalyzerPlugin",
        }
    }
}

/// Complete bundler configuration for one variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundlerConfig {
    /// Entry chunks; absent for test and debug runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryPoints>,
    /// Output settings; absent for test and debug runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
    /// Processing rules
    pub module: ModuleConfig,
    /// Plugins, in application order
    pub plugins: Vec<Plugin>,
    /// Resolution settings
    pub resolve: ResolveConfig,
    /// Source-map mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<SourceMapMode>,
}

impl BundlerConfig {
    /// Processing rules
    pub fn rules(&self) -> &[RuleDefinition] {
        &self.module.rules
    }

    /// Whether a plugin with this constructor name is present
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// Whether any rule uses `loader`
    pub fn uses_loader(&self, loader: &str) -> bool {
        self.module.rules.iter().any(|r| r.uses_loader(loader))
    }

    /// Application entry files, empty when there is no entry section
    pub fn app_entries(&self) -> &[String] {
        self.entry.as_ref().map(|e| e.app.as_slice()).unwrap_or(&[])
    }
}
