//! Compilation strategy resolution
//!
//! Exactly one strategy applies to a derivation. Ahead-of-time compilation
//! dominates template inlining, which dominates the plain compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compilation approach governing which rule table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilationStrategy {
    /// Plain TypeScript compile
    Plain,
    /// Compile with component templates inlined into the bundle
    Template,
    /// Ahead-of-time compile
    Aot,
}

impl CompilationStrategy {
    /// All strategies, in precedence order (lowest first)
    pub const ALL: [CompilationStrategy; 3] = [Self::Plain, Self::Template, Self::Aot];

    /// Resolve the strategy from descriptor flags
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::rules::CompilationStrategy;
    ///
    /// assert_eq!(CompilationStrategy::resolve(true, true), CompilationStrategy::Aot);
    /// assert_eq!(CompilationStrategy::resolve(false, true), CompilationStrategy::Template);
    /// assert_eq!(CompilationStrategy::resolve(false, false), CompilationStrategy::Plain);
    /// ```
    pub fn resolve(enable_ahead_of_time_compile: bool, use_template_inlining: bool) -> Self {
        if enable_ahead_of_time_compile {
            Self::Aot
        } else if use_template_inlining {
            Self::Template
        } else {
            Self::Plain
        }
    }

    /// Strategy name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Template => "template",
            Self::Aot => "aot",
        }
    }

    /// Strategy description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Plain => "TypeScript compile, templates loaded at runtime",
            Self::Template => "TypeScript compile with templates inlined at build time",
            Self::Aot => "Ahead-of-time compile of templates and components",
        }
    }
}

impl fmt::Display for CompilationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompilationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "template" => Ok(Self::Template),
            "aot" => Ok(Self::Aot),
            _ => Err(format!("Unknown compilation strategy: {}", s)),
        }
    }
}
