//! Check command implementation
//!
//! Handles the `frontconf check` command which reviews the descriptor and the
//! rule catalog. Checks are advisory: they never change what gets composed.

use anyhow::Result;
use console::style;
use std::path::Path;

use super::workspace::Workspace;
use crate::config::{
    validate_all, CatalogValidator, CheckContext, DescriptorValidator, ValidationResult,
    ValidationSeverity,
};
use crate::error::FrontconfError;
use crate::fmt::{CHECKMARK, CROSSMARK, INFO, MICROSCOPE, WARNING};

/// Check the descriptor and catalog, failing on error-level issues
pub fn cmd_check(descriptor: &Path, catalog: Option<&Path>) -> Result<()> {
    let workspace = Workspace::load(descriptor, catalog)?;

    println!(
        "{}{} {}",
        MICROSCOPE,
        style("frontconf check").bold(),
        style(workspace.loaded.path.display()).dim()
    );
    println!();

    let result = check_workspace(&workspace);
    print_issues(&result);

    let errors = result.errors().len();
    if errors > 0 {
        return Err(FrontconfError::CheckFailed { errors }.into());
    }

    println!(
        "{}No errors ({} warning(s), strategy {})",
        CHECKMARK,
        result.warnings().len(),
        style(workspace.composer().strategy()).cyan()
    );
    Ok(())
}

/// Run every check against a loaded workspace
pub fn check_workspace(workspace: &Workspace) -> ValidationResult {
    let ctx = CheckContext {
        raw: &workspace.loaded.descriptor,
        normalized: &workspace.descriptor,
        catalog: &workspace.catalog,
    };
    validate_all(&[&DescriptorValidator, &CatalogValidator], &ctx)
}

fn print_issues(result: &ValidationResult) {
    for issue in &result.issues {
        let marker = match issue.severity {
            ValidationSeverity::Error => CROSSMARK,
            ValidationSeverity::Warning => WARNING,
            ValidationSeverity::Info => INFO,
        };
        let label = match issue.severity {
            ValidationSeverity::Error => style(issue.severity.as_str()).red().bold(),
            ValidationSeverity::Warning => style(issue.severity.as_str()).yellow(),
            ValidationSeverity::Info => style(issue.severity.as_str()).dim(),
        };
        println!(
            "{}{} {}: {}",
            marker,
            label,
            style(&issue.field).bold(),
            issue.message
        );
        if let Some(suggestion) = &issue.suggestion {
            println!("   {}", style(suggestion).dim());
        }
    }
    if !result.issues.is_empty() {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_check_workspace_reports_aot_template_conflict() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("frontconf.json"),
            r#"{"vendors": ["rxjs"], "useTemplateUrl": true, "buildAoT": true, "aotEntryFile": "./app/main.aot.ts"}"#,
        )
        .unwrap();
        let workspace = Workspace::load(temp_dir.path(), None).unwrap();

        let result = check_workspace(&workspace);
        assert!(result.valid);
        assert_eq!(result.warnings().len(), 1);
    }
}
