//! Test-harness configuration
//!
//! The harness configuration is what the browser test runner reads. It wraps
//! one bundler configuration verbatim under `webpack` and adds the file list
//! and execution settings. Bootstrap shims load in a fixed order: the zone
//! patches must precede the files relying on async tracing, and the test
//! loader comes last. Descriptor-supplied files always follow the bootstrap set.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::bundler::BundlerConfig;
use crate::config::NormalizedDescriptor;

/// Test loader the bundler preprocesses
pub const TEST_LOADER: &str = "test.loader.js";

/// Port the harness server listens on
pub const HARNESS_PORT: u16 = 9876;

const BOOTSTRAP_SHIMS: [&str; 9] = [
    "node_modules/core-js/client/shim.min.js",
    "node_modules/zone.js/dist/zone.min.js",
    "node_modules/zone.js/dist/long-stack-trace-zone.js",
    "node_modules/zone.js/dist/proxy.js",
    "node_modules/zone.js/dist/sync-test.js",
    "node_modules/zone.js/dist/jasmine-patch.js",
    "node_modules/zone.js/dist/async-test.js",
    "node_modules/zone.js/dist/fake-async-test.js",
    "node_modules/reflect-metadata/Reflect.js",
];

/// How the browser is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Launcher {
    /// Headless browser, single run, coverage reporters (CI)
    Headless,
    /// Visible browser, single run, coverage reporters
    Interactive,
    /// Visible browser kept open for breakpoint debugging
    Debug,
}

impl Launcher {
    /// All launchers
    pub const ALL: [Launcher; 3] = [Self::Headless, Self::Interactive, Self::Debug];

    /// Launcher name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Headless => "headless",
            Self::Interactive => "interactive",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Launcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Launcher {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "headless" => Ok(Self::Headless),
            "interactive" => Ok(Self::Interactive),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown launcher: {}", s)),
        }
    }
}

/// One entry in the harness file list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HarnessFile {
    /// Plain path, watched
    Path(String),
    /// Pattern with explicit watch flag
    Pattern {
        /// Path or glob
        pattern: String,
        /// Rerun when it changes
        watched: bool,
    },
}

impl HarnessFile {
    /// Path or pattern of this entry
    pub fn path(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Pattern { pattern, .. } => pattern,
        }
    }
}

/// Custom browser launcher definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomLauncher {
    /// Base launcher
    pub base: String,
    /// Browser flags
    pub flags: Vec<String>,
}

/// JUnit reporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JunitReporter {
    /// Report file
    pub output_file: String,
    /// Report directory
    pub output_dir: String,
    /// Prefix results with the browser name
    pub use_browser_name: bool,
}

/// One coverage report format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Report type (text-summary, json, html)
    #[serde(rename = "type")]
    pub kind: String,
}

/// Coverage reporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReporter {
    /// Report directory
    pub dir: String,
    /// Report formats
    pub reporters: Vec<CoverageReport>,
    /// Map bundler source paths back to originals
    pub fix_webpack_source_paths: bool,
}

/// Bundler middleware settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpackMiddleware {
    /// Suppress bundler info output
    pub no_info: bool,
}

/// Test-runner configuration embedding one bundler configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarnessConfig {
    /// Base path for file patterns
    pub base_path: String,
    /// Runner log level
    pub log_level: String,
    /// Runner server port
    pub port: u16,
    /// Test frameworks
    pub frameworks: Vec<String>,
    /// Files loaded into the browser, in order
    pub files: Vec<HarnessFile>,
    /// Preprocessors per file
    pub preprocessors: BTreeMap<String, Vec<String>>,
    /// Browsers to launch
    pub browsers: Vec<String>,
    /// Custom launcher definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_launchers: Option<BTreeMap<String, CustomLauncher>>,
    /// Exit after one run
    pub single_run: bool,
    /// Reporters
    pub reporters: Vec<String>,
    /// JUnit reporter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junit_reporter: Option<JunitReporter>,
    /// Coverage reporter settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_istanbul_reporter: Option<CoverageReporter>,
    /// Embedded bundler configuration
    pub webpack: BundlerConfig,
    /// Bundler middleware settings
    pub webpack_middleware: WebpackMiddleware,
}

/// Builds harness configurations
pub struct HarnessAssembler;

impl HarnessAssembler {
    /// The fixed bootstrap file list
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::harness::{HarnessAssembler, TEST_LOADER};
    ///
    /// let files = HarnessAssembler::bootstrap_files();
    /// assert_eq!(files.len(), 10);
    /// assert_eq!(files.last().unwrap().path(), TEST_LOADER);
    /// ```
    pub fn bootstrap_files() -> Vec<HarnessFile> {
        BOOTSTRAP_SHIMS
            .iter()
            .map(|path| HarnessFile::Path(path.to_string()))
            .chain(std::iter::once(HarnessFile::Pattern {
                pattern: TEST_LOADER.to_string(),
                watched: false,
            }))
            .collect()
    }

    /// Wrap `webpack` in a harness configuration for `launcher`
    ///
    /// The bundler configuration is embedded unchanged.
    pub fn assemble(
        descriptor: &NormalizedDescriptor,
        webpack: BundlerConfig,
        launcher: Launcher,
    ) -> HarnessConfig {
        let mut files = Self::bootstrap_files();
        files.extend(
            descriptor
                .extra_test_files
                .iter()
                .map(|path| HarnessFile::Path(path.clone())),
        );

        let mut preprocessors = BTreeMap::new();
        preprocessors.insert(
            TEST_LOADER.to_string(),
            vec!["webpack".to_string(), "sourcemap".to_string()],
        );

        let mut config = HarnessConfig {
            base_path: String::new(),
            log_level: "info".to_string(),
            port: HARNESS_PORT,
            frameworks: vec!["jasmine".to_string()],
            files,
            preprocessors,
            browsers: Vec::new(),
            custom_launchers: None,
            single_run: true,
            reporters: Vec::new(),
            junit_reporter: None,
            coverage_istanbul_reporter: None,
            webpack,
            webpack_middleware: WebpackMiddleware { no_info: true },
        };

        match launcher {
            Launcher::Headless => {
                config.browsers = vec!["ChromeHeadless".to_string()];
                let mut launchers = BTreeMap::new();
                launchers.insert(
                    "ChromeHeadless".to_string(),
                    CustomLauncher {
                        base: "Chrome".to_string(),
                        flags: [
                            "--headless",
                            "--disable-gpu",
                            "--remote-debugging-port=9222",
                            "-incognito",
                        ]
                        .map(String::from)
                        .to_vec(),
                    },
                );
                config.custom_launchers = Some(launchers);
                Self::with_coverage_reporters(&mut config);
            }
            Launcher::Interactive => {
                config.browsers = vec!["Chrome".to_string()];
                Self::with_coverage_reporters(&mut config);
            }
            Launcher::Debug => {
                config.browsers = vec!["Chrome".to_string()];
                config.single_run = false;
                config.reporters = vec!["progress".to_string()];
            }
        }

        config
    }

    fn with_coverage_reporters(config: &mut HarnessConfig) {
        config.reporters = ["dots", "coverage-istanbul", "junit"]
            .map(String::from)
            .to_vec();
        config.junit_reporter = Some(JunitReporter {
            output_file: "test-results.xml".to_string(),
            output_dir: "coverage/".to_string(),
            use_browser_name: false,
        });
        config.coverage_istanbul_reporter = Some(CoverageReporter {
            dir: "coverage/".to_string(),
            reporters: ["text-summary", "json", "html"]
                .iter()
                .map(|kind| CoverageReport {
                    kind: kind.to_string(),
                })
                .collect(),
            fix_webpack_source_paths: true,
        });
    }
}
