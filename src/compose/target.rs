//! Named configuration targets

use std::fmt;
use std::str::FromStr;

use super::variants::{BUILD_KINDS, DEBUG_TS_KINDS, RUN_KINDS, TEST_STYLE_KINDS, TEST_TS_KINDS};
use crate::error::FrontconfError;
use crate::harness::Launcher;
use crate::rules::AssetKind;

/// Bundler variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Dev server with hot reload
    Run,
    /// Production build
    Build,
    /// Unit tests with coverage
    Test,
    /// Unit tests for breakpoint debugging
    Debug,
}

impl Variant {
    /// All variants
    pub const ALL: [Variant; 4] = [Self::Run, Self::Build, Self::Test, Self::Debug];

    /// Variant name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Build => "build",
            Self::Test => "test",
            Self::Debug => "debug",
        }
    }

    /// Asset kinds this variant asks the selector for, in rule order
    pub fn requested_kinds(&self) -> Vec<AssetKind> {
        match self {
            Self::Run => RUN_KINDS.to_vec(),
            Self::Build => BUILD_KINDS.to_vec(),
            Self::Test => [TEST_STYLE_KINDS.as_slice(), &TEST_TS_KINDS].concat(),
            Self::Debug => [TEST_STYLE_KINDS.as_slice(), &DEBUG_TS_KINDS].concat(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything the composer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A bundler configuration
    Bundler(Variant),
    /// A harness configuration
    Harness(Launcher),
}

impl Target {
    /// Every target, bundler variants first
    pub const ALL: [Target; 7] = [
        Self::Bundler(Variant::Run),
        Self::Bundler(Variant::Build),
        Self::Bundler(Variant::Test),
        Self::Bundler(Variant::Debug),
        Self::Harness(Launcher::Headless),
        Self::Harness(Launcher::Interactive),
        Self::Harness(Launcher::Debug),
    ];

    /// Command-line name
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::compose::{Target, Variant};
    /// use frontconf::harness::Launcher;
    ///
    /// assert_eq!(Target::Bundler(Variant::Build).name(), "build");
    /// assert_eq!(Target::Harness(Launcher::Headless).name(), "harness-headless");
    /// ```
    pub fn name(&self) -> String {
        match self {
            Self::Bundler(variant) => variant.name().to_string(),
            Self::Harness(launcher) => format!("harness-{}", launcher.name()),
        }
    }

    /// File name used by `emit`
    pub fn file_name(&self) -> String {
        match self {
            Self::Bundler(variant) => format!("webpack.{}.json", variant.name()),
            Self::Harness(launcher) => format!("karma.{}.json", launcher.name()),
        }
    }

    /// Names of every target
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Target {
    type Err = FrontconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|target| target.name() == wanted)
            .ok_or_else(|| FrontconfError::InvalidTarget {
                name: s.to_string(),
                available: Self::names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_parse_back() {
        for target in Target::ALL {
            assert_eq!(target.name().parse::<Target>().unwrap(), target);
        }
        assert_eq!(
            "HARNESS-DEBUG".parse::<Target>().unwrap(),
            Target::Harness(Launcher::Debug)
        );
    }

    #[test]
    fn test_unknown_name_lists_targets() {
        let err = "prod".parse::<Target>().unwrap_err();
        match err {
            FrontconfError::InvalidTarget { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available.len(), 7);
                assert!(available.contains(&"harness-interactive".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_file_names_are_distinct() {
        let names: HashSet<String> = Target::ALL.iter().map(Target::file_name).collect();
        assert_eq!(names.len(), Target::ALL.len());
        assert_eq!(Target::Bundler(Variant::Run).file_name(), "webpack.run.json");
        assert_eq!(
            Target::Harness(Launcher::Interactive).file_name(),
            "karma.interactive.json"
        );
    }
}
