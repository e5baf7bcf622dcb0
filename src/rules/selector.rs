//! Rule selection for a strategy and an ordered list of asset kinds

use log::debug;

use super::catalog::RuleCatalog;
use super::strategy::CompilationStrategy;
use super::{AssetKind, RuleDefinition};

/// Picks rules out of a catalog
///
/// Output order follows the requested kinds. Kinds the strategy's table does
/// not define are skipped without a placeholder.
///
/// # Examples
///
/// ```
/// use frontconf::rules::{AssetKind, CompilationStrategy, RuleCatalog, RuleSelector};
/// use std::path::Path;
///
/// let catalog = RuleCatalog::builtin(Path::new("."));
/// let selector = RuleSelector::new(&catalog);
///
/// let rules = selector.select(
///     CompilationStrategy::Aot,
///     &[AssetKind::TsWithComments, AssetKind::Html],
/// );
/// assert_eq!(rules.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RuleSelector<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> RuleSelector<'a> {
    /// Create a selector over `catalog`
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Rules for `kinds` under `strategy`, as freshly owned values
    pub fn select(&self, strategy: CompilationStrategy, kinds: &[AssetKind]) -> Vec<RuleDefinition> {
        let table = self.catalog.table(strategy);
        kinds
            .iter()
            .filter_map(|kind| {
                let rule = table.get(*kind);
                if rule.is_none() {
                    debug!("no {} rule for {} strategy, skipping", kind, strategy);
                }
                rule.cloned()
            })
            .collect()
    }
}
