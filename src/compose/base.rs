//! Shared skeletons every variant starts from

use crate::bundler::{BundlerConfig, EntryPoints, ModuleConfig, OutputConfig, Plugin, ResolveConfig};
use crate::rules::catalog::RESOLVE_EXTENSIONS;
use crate::rules::RuleDefinition;

use super::Composer;

impl Composer<'_> {
    /// Empty configuration with resolve extensions and base plugins
    ///
    /// The only base plugin is the jQuery provider, present when the
    /// descriptor sets `exportGlobal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontconf::compose::Composer;
    /// use frontconf::config::ProjectDescriptor;
    /// use frontconf::rules::RuleCatalog;
    /// use std::path::Path;
    ///
    /// let descriptor = ProjectDescriptor {
    ///     export_global: Some(true),
    ///     ..Default::default()
    /// }
    /// .normalize();
    /// let catalog = RuleCatalog::builtin(Path::new("."));
    ///
    /// let base = Composer::new(&descriptor, &catalog).base();
    /// assert!(base.has_plugin("ProvidePlugin"));
    /// assert!(base.rules().is_empty());
    /// ```
    pub fn base(&self) -> BundlerConfig {
        let mut plugins = Vec::new();
        if self.descriptor.export_global {
            plugins.push(Plugin::jquery_provider());
        }

        BundlerConfig {
            entry: None,
            output: None,
            module: ModuleConfig::default(),
            plugins,
            resolve: ResolveConfig {
                extensions: RESOLVE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            },
            devtool: None,
        }
    }

    /// Base for configurations that write bundles
    ///
    /// Adds an entry section with an empty app list and the vendor modules, the
    /// output section, and the lint pre-rule.
    pub fn run_base(&self, filename: &str) -> BundlerConfig {
        let mut config = self.base();
        config.entry = Some(EntryPoints {
            app: Vec::new(),
            vendor: self.descriptor.vendors.clone(),
        });
        config.output = Some(OutputConfig {
            path: self.descriptor.output_path(),
            filename: filename.to_string(),
            source_map_filename: "[file].map".to_string(),
            public_path: "/".to_string(),
        });
        config.module.rules.push(self.catalog.pre.lint.clone());
        config
    }

    /// Raw, image and font handlers, in fixed order
    pub(crate) fn passthrough_rules(&self) -> Vec<RuleDefinition> {
        let p = &self.catalog.passthrough;
        [&p.raw, &p.image, &p.woff, &p.ttf, &p.eot, &p.svg]
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::compose::Composer;
    use crate::config::ProjectDescriptor;
    use crate::rules::RuleCatalog;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_base_is_empty_without_export_global() {
        let descriptor = ProjectDescriptor::default().normalize();
        let catalog = RuleCatalog::builtin(Path::new("."));
        let base = Composer::new(&descriptor, &catalog).base();

        assert!(base.plugins.is_empty());
        assert!(base.rules().is_empty());
        assert!(base.entry.is_none());
        assert_eq!(
            base.resolve.extensions,
            [".ts", ".js", ".json", ".css", ".less", ".html"]
        );
    }

    #[test]
    fn test_run_base_adds_entry_output_and_lint() {
        let descriptor = ProjectDescriptor {
            vendors: Some(vec!["rxjs".to_string(), "zone.js".to_string()]),
            output_dir: Some("./dist".to_string()),
            ..Default::default()
        }
        .normalize_in(Path::new("/srv/shop"));
        let catalog = RuleCatalog::builtin(Path::new("/srv/shop"));
        let config = Composer::new(&descriptor, &catalog).run_base("app/bundles/bundle.js");

        let entry = config.entry.as_ref().unwrap();
        assert!(entry.app.is_empty());
        assert_eq!(entry.vendor, vec!["rxjs", "zone.js"]);

        let output = config.output.as_ref().unwrap();
        assert_eq!(output.path, PathBuf::from("/srv/shop/dist"));
        assert_eq!(output.filename, "app/bundles/bundle.js");
        assert_eq!(output.source_map_filename, "[file].map");
        assert_eq!(output.public_path, "/");

        assert_eq!(config.rules(), [catalog.pre.lint.clone()]);
    }

    #[test]
    fn test_each_call_allocates_anew() {
        let descriptor = ProjectDescriptor {
            export_global: Some(true),
            ..Default::default()
        }
        .normalize();
        let catalog = RuleCatalog::builtin(Path::new("."));
        let composer = Composer::new(&descriptor, &catalog);

        let mut first = composer.run_base("a.js");
        first.plugins.clear();
        first.module.rules.clear();

        let second = composer.run_base("a.js");
        assert_eq!(second.plugins.len(), 1);
        assert_eq!(second.rules().len(), 1);
    }
}
