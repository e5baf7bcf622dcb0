//! Error types with contextual suggestions
//!
//! The composition engine never fails: missing descriptor fields take defaults
//! and unknown asset kinds are skipped. These errors cover the shell around it:
//! - Locating and parsing descriptor files
//! - Loading an external rule catalog
//! - Command-line arguments that name nothing
//! - Writing generated configurations
//!
//! Each error carries a suggestion and a sysexits-style exit code.

use std::path::PathBuf;
use thiserror::Error;

/// frontconf errors with contextual suggestions
#[derive(Error, Debug)]
pub enum FrontconfError {
    /// No descriptor file at the given location
    #[error("Descriptor not found: {path}")]
    DescriptorNotFound {
        /// Path that was searched
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Descriptor exists but does not parse
    #[error("Failed to parse descriptor {path}: {message}")]
    DescriptorParse {
        /// Descriptor path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Descriptor extension is neither .json nor .toml
    #[error("Unsupported descriptor format: {path}")]
    UnsupportedFormat {
        /// Descriptor path
        path: PathBuf,
    },

    /// Rule catalog file does not describe a catalog
    #[error("Invalid rule catalog {path}: {message}")]
    InvalidCatalog {
        /// Catalog path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Unknown configuration target
    #[error("Unknown target: '{name}'")]
    InvalidTarget {
        /// Requested name
        name: String,
        /// Valid target names
        available: Vec<String>,
    },

    /// `check` found error-level issues
    #[error("Check failed with {errors} error(s)")]
    CheckFailed {
        /// Number of error-level issues
        errors: usize,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl FrontconfError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::error::FrontconfError;
    ///
    /// let error = FrontconfError::InvalidTarget {
    ///     name: "prod".to_string(),
    ///     available: vec!["run".to_string(), "build".to_string()],
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("build"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DescriptorNotFound { .. } => Some(
                "Run 'frontconf init' to create a descriptor, or pass --descriptor <PATH>"
                    .to_string(),
            ),
            Self::DescriptorParse { .. } => Some(
                "Check the descriptor syntax; keys are camelCase (appName, outputDir, vendors, ...)"
                    .to_string(),
            ),
            Self::UnsupportedFormat { .. } => {
                Some("Use a .json or .toml descriptor file".to_string())
            }
            Self::InvalidCatalog { .. } => Some(
                "The catalog must have pre, post, passthrough, plain, template and aot tables"
                    .to_string(),
            ),
            Self::InvalidTarget { available, .. } => {
                Some(format!("Valid targets: {}", available.join(", ")))
            }
            Self::CheckFailed { .. } => {
                Some("Fix the issues reported above and run 'frontconf check' again".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::DescriptorNotFound { .. } | Self::DescriptorParse { .. } => {
                Some("https://github.com/frontconf/frontconf#descriptor")
            }
            Self::InvalidCatalog { .. } => {
                Some("https://github.com/frontconf/frontconf#rule-catalog")
            }
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::error::FrontconfError;
    ///
    /// let error = FrontconfError::CheckFailed { errors: 2 };
    /// assert_eq!(error.exit_code(), 1);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DescriptorNotFound { .. } => 66, // EX_NOINPUT
            Self::DescriptorParse { .. } => 65,    // EX_DATAERR
            Self::UnsupportedFormat { .. } => 65,  // EX_DATAERR
            Self::InvalidCatalog { .. } => 65,     // EX_DATAERR
            Self::InvalidTarget { .. } => 64,      // EX_USAGE
            Self::CheckFailed { .. } => 1,
            Self::Io { .. } => 74, // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(fc_error) = error.downcast_ref::<FrontconfError>() {
            if let Some(suggestion) = fc_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            if let Some(docs) = fc_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(fc_error) = error.downcast_ref::<FrontconfError>() {
            fc_error.exit_code()
        } else {
            1
        }
    }
}
