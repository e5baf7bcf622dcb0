//! Advisory descriptor and catalog checks
//!
//! Composition accepts any descriptor. These checks only report; they never
//! alter what the composer produces. The `check` command surfaces them.

use log::warn;
use regex::Regex;

use super::file::ProjectDescriptor;
use super::normalize::NormalizedDescriptor;
use crate::harness::HarnessAssembler;
use crate::rules::RuleCatalog;

/// Validation severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Informational message
    Info,
    /// Warning - should be addressed but not blocking
    Warning,
    /// Error - downstream tools will reject the configuration
    Error,
}

impl ValidationSeverity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationSeverity::Info => "INFO",
            ValidationSeverity::Warning => "WARNING",
            ValidationSeverity::Error => "ERROR",
        }
    }
}

/// A validation issue found in a descriptor or catalog
///
/// # Examples
///
/// ```
/// use frontconf::config::validator::{ValidationIssue, ValidationSeverity};
///
/// let warning = ValidationIssue::warning("devServerPort", "Port 0 picks a random port")
///     .with_suggestion("Set devServerPort to a fixed value");
/// assert_eq!(warning.severity, ValidationSeverity::Warning);
/// assert!(warning.suggestion.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity level
    pub severity: ValidationSeverity,
    /// Field or rule that has the issue
    pub field: String,
    /// Description of the issue
    pub message: String,
    /// Suggested fix (if available)
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(
        severity: ValidationSeverity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create an error issue
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Error, field, message)
    }

    /// Create a warning issue
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Warning, field, message)
    }

    /// Create an info issue
    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationSeverity::Info, field, message)
    }
}

/// Result of a set of checks
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether no error-level issue was found
    pub valid: bool,
    /// Issues found
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        if issue.severity == ValidationSeverity::Error {
            self.valid = false;
        }
        self.issues.push(issue);
    }

    /// Get only errors
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Error)
    }

    /// Get only warnings
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.with_severity(ValidationSeverity::Warning)
    }

    fn with_severity(&self, severity: ValidationSeverity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }
}

/// Everything a check may look at
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Descriptor as written
    pub raw: &'a ProjectDescriptor,
    /// Descriptor with defaults applied
    pub normalized: &'a NormalizedDescriptor,
    /// Catalog the composer will select from
    pub catalog: &'a RuleCatalog,
}

/// Trait for pluggable checks
pub trait ConfigValidator: Send + Sync {
    /// Validator name
    fn name(&self) -> &str;

    /// Inspect the context and report issues
    fn validate(&self, ctx: &CheckContext<'_>) -> ValidationResult;

    /// Get validator priority (lower runs first)
    fn priority(&self) -> u32 {
        100
    }
}

/// Descriptor flag and path checks
pub struct DescriptorValidator;

impl ConfigValidator for DescriptorValidator {
    fn name(&self) -> &str {
        "descriptor"
    }

    fn validate(&self, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();
        let d = ctx.normalized;

        if d.enable_ahead_of_time_compile && ctx.raw.use_template_inlining == Some(true) {
            result.add_issue(
                ValidationIssue::warning(
                    "useTemplateInlining",
                    "Template inlining is ignored when enableAheadOfTimeCompile is set",
                )
                .with_suggestion("Remove useTemplateInlining or disable ahead-of-time compile"),
            );
        }

        if d.enable_ahead_of_time_compile && ctx.raw.aot_entry_file.is_none() {
            result.add_issue(ValidationIssue::info(
                "aotEntryFile",
                format!("Using default AOT entry {}", d.aot_entry_file),
            ));
        }

        if d.vendors.is_empty() {
            result.add_issue(
                ValidationIssue::info("vendors", "No vendor modules; the vendor chunk is empty")
                    .with_suggestion("List framework modules under vendors to cache them apart"),
            );
        }

        if d.enable_bundle_analysis {
            result.add_issue(ValidationIssue::info(
                "enableBundleAnalysis",
                format!(
                    "Bundle analyzer is added to the production build only ({} strategy)",
                    d.strategy()
                ),
            ));
        }

        if d.dev_server_port == 0 {
            result.add_issue(
                ValidationIssue::warning(
                    "devServerPort",
                    "Port 0 lets the dev server pick a random port the client cannot know",
                )
                .with_suggestion("Set devServerPort to a fixed value such as 8080"),
            );
        }

        let bootstrap = HarnessAssembler::bootstrap_files();
        for extra in &d.extra_test_files {
            if bootstrap.iter().any(|file| file.path() == extra) {
                result.add_issue(ValidationIssue::warning(
                    "extraTestFiles",
                    format!("{} is already loaded by the harness bootstrap", extra),
                ));
            }
        }

        result
    }

    fn priority(&self) -> u32 {
        10
    }
}

/// Rule catalog sanity checks
pub struct CatalogValidator;

impl ConfigValidator for CatalogValidator {
    fn name(&self) -> &str {
        "catalog"
    }

    fn validate(&self, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::success();

        for (name, rule) in ctx.catalog.named_rules() {
            if let Err(e) = Regex::new(&rule.test) {
                result.add_issue(
                    ValidationIssue::error(name.clone(), format!("Invalid test pattern: {}", e))
                        .with_suggestion("Rule tests are regular expression sources"),
                );
            }
            if rule.uses.is_empty() {
                result.add_issue(ValidationIssue::error(name, "Rule has no loaders"));
            }
        }

        result
    }
}

/// Run every validator in priority order
pub fn validate_all(validators: &[&dyn ConfigValidator], ctx: &CheckContext<'_>) -> ValidationResult {
    let mut ordered: Vec<&&dyn ConfigValidator> = validators.iter().collect();
    ordered.sort_by_key(|v| v.priority());

    let mut result = ValidationResult::success();
    for validator in ordered {
        for issue in validator.validate(ctx).issues {
            if issue.severity >= ValidationSeverity::Warning {
                warn!("[{}] {}: {}", validator.name(), issue.field, issue.message);
            }
            result.add_issue(issue);
        }
    }
    result
}
