//! Processing rules and their strategy-keyed catalog
//!
//! This module provides:
//! - Rule definitions as immutable values handed to the bundler verbatim
//! - The strategy resolver (`plain`, `template`, `aot`)
//! - The rule catalog with one strongly typed table per strategy
//! - The selector that picks and orders rules for requested asset kinds

pub mod catalog;
pub mod selector;
pub mod strategy;

pub use catalog::{
    AotRules, PassthroughRules, PlainRules, PostRules, PreRules, RuleCatalog, StrategyTable,
    TemplateRules,
};
pub use selector::RuleSelector;
pub use strategy::CompilationStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of source file that needs a specific processing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    /// TypeScript sources
    Ts,
    /// TypeScript sources compiled with comments kept (coverage runs)
    TsWithComments,
    /// TypeScript sources compiled with comments stripped (debug runs)
    TsNoComments,
    /// HTML templates
    Html,
    /// Less stylesheets
    Less,
    /// Sass stylesheets
    Scss,
    /// Plain CSS
    Css,
}

impl AssetKind {
    /// Every asset kind known to the catalog
    pub const ALL: [AssetKind; 7] = [
        Self::Ts,
        Self::TsWithComments,
        Self::TsNoComments,
        Self::Html,
        Self::Less,
        Self::Scss,
        Self::Css,
    ];

    /// Identifier used in catalogs and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::TsWithComments => "tsWithComments",
            Self::TsNoComments => "tsNoComments",
            Self::Html => "html",
            Self::Less => "less",
            Self::Scss => "scss",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown asset kind: {}", s))
    }
}

/// Whether a rule runs before or after the normal loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
    /// Runs before normal loaders
    Pre,
    /// Runs after normal loaders
    Post,
}

/// One loader in a rule's chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderUse {
    /// Loader module name
    pub loader: String,
    /// Loader options, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// A processing directive for one category of files
///
/// The composition engine never looks inside a rule: it only selects and
/// orders them. Field names follow the bundler's `module.rules` shape.
///
/// # Examples
///
/// ```
/// use frontconf::rules::{Enforce, RuleDefinition};
///
/// let rule = RuleDefinition::new(r"\.ts$")
///     .enforce(Enforce::Pre)
///     .loader("tslint-loader");
///
/// assert_eq!(rule.loader_names().collect::<Vec<_>>(), vec!["tslint-loader"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Regular expression source matched against module paths
    pub test: String,
    /// Pre/post ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<Enforce>,
    /// Loader chain, applied right to left by the bundler
    #[serde(rename = "use")]
    pub uses: Vec<LoaderUse>,
    /// Paths the rule is limited to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// Paths or patterns the rule skips
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl RuleDefinition {
    /// Start a rule matching `test`
    pub fn new(test: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            enforce: None,
            uses: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Append a loader without options
    pub fn loader(mut self, loader: impl Into<String>) -> Self {
        self.uses.push(LoaderUse {
            loader: loader.into(),
            options: None,
        });
        self
    }

    /// Append a loader with options
    pub fn loader_with(mut self, loader: impl Into<String>, options: serde_json::Value) -> Self {
        self.uses.push(LoaderUse {
            loader: loader.into(),
            options: Some(options),
        });
        self
    }

    /// Set pre/post ordering
    pub fn enforce(mut self, enforce: Enforce) -> Self {
        self.enforce = Some(enforce);
        self
    }

    /// Restrict the rule to a path
    pub fn include(mut self, path: impl Into<String>) -> Self {
        self.include.push(path.into());
        self
    }

    /// Skip a path or pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Names of the loaders in chain order
    pub fn loader_names(&self) -> impl Iterator<Item = &str> {
        self.uses.iter().map(|u| u.loader.as_str())
    }

    /// Whether any loader in the chain is `loader`
    pub fn uses_loader(&self, loader: &str) -> bool {
        self.loader_names().any(|name| name == loader)
    }
}
