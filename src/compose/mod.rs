//! Configuration composition
//!
//! A [`Composer`] binds one normalized descriptor to one rule catalog, resolves
//! the compilation strategy once, and builds each target on demand. Every
//! builder returns a freshly constructed value: rules are cloned out of the
//! catalog and no two outputs share storage, so callers may mutate what they
//! get back.

pub mod base;
pub mod target;
pub mod variants;

use log::debug;
use serde::Serialize;

use crate::bundler::BundlerConfig;
use crate::config::NormalizedDescriptor;
use crate::harness::{HarnessAssembler, HarnessConfig, Launcher};
use crate::rules::{CompilationStrategy, RuleCatalog, RuleSelector};

pub use target::{Target, Variant};
pub use variants::{BUILD_KINDS, DEBUG_TS_KINDS, RUN_KINDS, TEST_STYLE_KINDS, TEST_TS_KINDS};

/// Builds configurations for one descriptor
///
/// # Examples
///
/// ```
/// use frontconf::compose::Composer;
/// use frontconf::config::ProjectDescriptor;
/// use frontconf::rules::{CompilationStrategy, RuleCatalog};
/// use std::path::Path;
///
/// let descriptor = ProjectDescriptor::default().normalize();
/// let catalog = RuleCatalog::builtin(Path::new("."));
/// let composer = Composer::new(&descriptor, &catalog);
///
/// assert_eq!(composer.strategy(), CompilationStrategy::Plain);
/// let build = composer.build();
/// assert_eq!(build.app_entries(), ["./app/main.ts"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    descriptor: &'a NormalizedDescriptor,
    catalog: &'a RuleCatalog,
    strategy: CompilationStrategy,
}

impl<'a> Composer<'a> {
    /// Bind a descriptor to a catalog
    pub fn new(descriptor: &'a NormalizedDescriptor, catalog: &'a RuleCatalog) -> Self {
        let strategy = descriptor.strategy();
        debug!(
            "resolved {} strategy (aot={}, templates={})",
            strategy,
            descriptor.enable_ahead_of_time_compile,
            descriptor.use_template_inlining
        );
        Self {
            descriptor,
            catalog,
            strategy,
        }
    }

    /// Resolved compilation strategy
    pub fn strategy(&self) -> CompilationStrategy {
        self.strategy
    }

    /// Descriptor this composer builds from
    pub fn descriptor(&self) -> &'a NormalizedDescriptor {
        self.descriptor
    }

    pub(crate) fn selector(&self) -> RuleSelector<'a> {
        RuleSelector::new(self.catalog)
    }

    /// Bundler configuration for one variant
    pub fn variant(&self, variant: Variant) -> BundlerConfig {
        match variant {
            Variant::Run => self.run(),
            Variant::Build => self.build(),
            Variant::Test => self.test(),
            Variant::Debug => self.debug(),
        }
    }

    /// Harness configuration for a launcher
    ///
    /// The debug launcher embeds the debug variant, the others the test variant.
    pub fn harness(&self, launcher: Launcher) -> HarnessConfig {
        let webpack = match launcher {
            Launcher::Debug => self.debug(),
            Launcher::Headless | Launcher::Interactive => self.test(),
        };
        HarnessAssembler::assemble(self.descriptor, webpack, launcher)
    }

    /// Build any target
    pub fn compose(&self, target: Target) -> Composed {
        match target {
            Target::Bundler(variant) => Composed::Bundler(self.variant(variant)),
            Target::Harness(launcher) => Composed::Harness(Box::new(self.harness(launcher))),
        }
    }
}

/// Output of [`Composer::compose`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Composed {
    /// Bundler configuration
    Bundler(BundlerConfig),
    /// Harness configuration
    Harness(Box<HarnessConfig>),
}

impl Composed {
    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The bundler configuration, embedded or direct
    pub fn bundler(&self) -> &BundlerConfig {
        match self {
            Self::Bundler(config) => config,
            Self::Harness(harness) => &harness.webpack,
        }
    }
}
