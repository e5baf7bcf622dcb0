//! Strategy command implementation
//!
//! Handles the `frontconf strategy` command which explains the resolved
//! compilation strategy and which asset kinds each variant gets a rule for.

use anyhow::Result;
use console::style;
use std::path::Path;

use super::workspace::Workspace;
use crate::compose::Variant;
use crate::fmt::INFO;
use crate::rules::{AssetKind, CompilationStrategy, RuleCatalog};

/// Requested kinds of one variant, split by whether the table has them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindReport {
    /// Variant
    pub variant: Variant,
    /// Kinds that produce a rule, in order
    pub selected: Vec<AssetKind>,
    /// Kinds the strategy's table lacks
    pub skipped: Vec<AssetKind>,
}

/// Print the strategy and per-variant rule kinds
pub fn cmd_strategy(descriptor: &Path, catalog: Option<&Path>) -> Result<()> {
    let workspace = Workspace::load(descriptor, catalog)?;
    let strategy = workspace.composer().strategy();

    println!(
        "{}Strategy: {}",
        INFO,
        style(strategy).bold().cyan()
    );
    println!("   {}", style(strategy.description()).dim());
    println!();

    for report in kind_reports(&workspace.catalog, strategy) {
        let selected: Vec<&str> = report.selected.iter().map(AssetKind::name).collect();
        print!(
            "   {:<6} {}",
            style(report.variant).bold(),
            selected.join(", ")
        );
        if !report.skipped.is_empty() {
            let skipped: Vec<&str> = report.skipped.iter().map(AssetKind::name).collect();
            print!("  {}", style(format!("(no rule: {})", skipped.join(", "))).yellow());
        }
        println!();
    }

    Ok(())
}

/// Which requested kinds each variant gets under `strategy`
pub fn kind_reports(catalog: &RuleCatalog, strategy: CompilationStrategy) -> Vec<KindReport> {
    let table = catalog.table(strategy);
    Variant::ALL
        .into_iter()
        .map(|variant| {
            let (selected, skipped): (Vec<AssetKind>, Vec<AssetKind>) = variant
                .requested_kinds()
                .into_iter()
                .partition(|kind| table.get(*kind).is_some());
            KindReport {
                variant,
                selected,
                skipped,
            }
        })
        .collect()
}
