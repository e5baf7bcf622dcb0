//! Variant builders: run, build, test and debug

use crate::bundler::{BundlerConfig, MinifierOptions, Plugin, SourceMapMode};
use crate::rules::{AssetKind, CompilationStrategy};

use super::Composer;

/// Kinds the dev server compiles
pub const RUN_KINDS: [AssetKind; 4] = [
    AssetKind::Ts,
    AssetKind::Html,
    AssetKind::Less,
    AssetKind::Css,
];

/// Kinds the production build compiles
pub const BUILD_KINDS: [AssetKind; 5] = [
    AssetKind::Ts,
    AssetKind::Html,
    AssetKind::Less,
    AssetKind::Scss,
    AssetKind::Css,
];

/// Markup and style kinds for test and debug runs
pub const TEST_STYLE_KINDS: [AssetKind; 3] = [AssetKind::Html, AssetKind::Less, AssetKind::Css];

/// TypeScript kind for coverage runs
pub const TEST_TS_KINDS: [AssetKind; 1] = [AssetKind::TsWithComments];

/// TypeScript kind for debug runs
pub const DEBUG_TS_KINDS: [AssetKind; 1] = [AssetKind::TsNoComments];

const HOT_RELOAD_CLIENT: &str = "webpack/hot/dev-server";
const DEV_SERVER_CLIENT: &str = "webpack-dev-server/client?http://localhost:";
const VENDOR_CHUNK: &str = "vendor";

impl Composer<'_> {
    /// Dev-server configuration
    ///
    /// The app entry starts with the hot-reload and dev-server clients. Bundle
    /// names carry no content hash.
    pub fn run(&self) -> BundlerConfig {
        let d = self.descriptor;
        let mut config = self.run_base(&format!("{}/bundles/bundle.js", d.app_name));

        if let Some(entry) = config.entry.as_mut() {
            entry.app = vec![
                HOT_RELOAD_CLIENT.to_string(),
                format!("{}{}", DEV_SERVER_CLIENT, d.dev_server_port),
                self.app_entry(&d.dev_entry_file),
            ];
        }

        config
            .module
            .rules
            .extend(self.selector().select(self.strategy, &RUN_KINDS));
        config.module.rules.extend(self.passthrough_rules());

        config.plugins.extend([
            Plugin::HotModuleReplacement,
            self.html_template(),
            Plugin::VendorChunk {
                name: VENDOR_CHUNK.to_string(),
                filename: format!("{}/bundles/vendor.bundle.js", d.app_name),
            },
            Plugin::LoaderOptions { debug: true },
        ]);
        config.devtool = Some(SourceMapMode::Inline);
        config
    }

    /// Production configuration
    ///
    /// Under the ahead-of-time strategy the AOT entry replaces the production
    /// entry and the AOT compiler plugin is added.
    pub fn build(&self) -> BundlerConfig {
        let d = self.descriptor;
        let mut config = self.run_base(&format!("{}/bundles/bundle.[hash].js", d.app_name));

        if let Some(entry) = config.entry.as_mut() {
            entry.app = vec![self.app_entry(&d.prod_entry_file)];
        }

        config.module.rules.extend(self.passthrough_rules());
        config
            .module
            .rules
            .extend(self.selector().select(self.strategy, &BUILD_KINDS));

        config.plugins.push(Plugin::production_env());
        config.plugins.push(self.html_template());
        if self.strategy == CompilationStrategy::Aot {
            config.plugins.push(Plugin::AotCompiler {
                ts_config_path: d.resolve(&d.aot_tool_config_path),
                entry_module: d.resolve(&d.aot_entry_module).display().to_string(),
            });
        }
        config.plugins.push(Plugin::Minifier(MinifierOptions::default()));
        config.plugins.push(Plugin::VendorChunk {
            name: VENDOR_CHUNK.to_string(),
            filename: format!("{}/bundles/vendor.bundle.[hash].js", d.app_name),
        });
        config.plugins.push(Plugin::ModuleConcatenation);
        if d.enable_bundle_analysis {
            config.plugins.push(Plugin::BundleAnalyzer);
        }

        config.devtool = Some(SourceMapMode::CheapModule);
        config
    }

    /// Unit-test configuration with coverage instrumentation
    pub fn test(&self) -> BundlerConfig {
        self.test_config(&TEST_TS_KINDS, true)
    }

    /// Unit-test configuration for breakpoint debugging
    ///
    /// Same as [`Composer::test`] but comments are stripped and nothing is
    /// instrumented.
    pub fn debug(&self) -> BundlerConfig {
        self.test_config(&DEBUG_TS_KINDS, false)
    }

    fn test_config(&self, ts_kinds: &[AssetKind], coverage: bool) -> BundlerConfig {
        let catalog = self.catalog;
        let selector = self.selector();
        let mut config = self.base();

        let rules = &mut config.module.rules;
        rules.push(catalog.pre.lint.clone());
        rules.extend(selector.select(self.strategy, &TEST_STYLE_KINDS));
        rules.push(catalog.passthrough.raw.clone());
        rules.push(catalog.passthrough.style_null.clone());
        rules.extend(selector.select(self.strategy, ts_kinds));
        if coverage {
            rules.push(catalog.post.coverage.clone());
        }

        config.devtool = Some(SourceMapMode::Inline);
        config
    }

    fn app_entry(&self, entry: &str) -> String {
        match self.strategy {
            CompilationStrategy::Aot => self.descriptor.aot_entry_file.clone(),
            CompilationStrategy::Plain | CompilationStrategy::Template => entry.to_string(),
        }
    }

    fn html_template(&self) -> Plugin {
        Plugin::HtmlTemplate {
            filename: "index.html".to_string(),
            template: self.descriptor.index_template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NormalizedDescriptor, ProjectDescriptor};
    use crate::rules::{Enforce, RuleCatalog};
    use std::path::{Path, PathBuf};

    const ROOT: &str = "/srv/shop";

    fn catalog() -> RuleCatalog {
        RuleCatalog::builtin(Path::new(ROOT))
    }

    fn normalized(descriptor: ProjectDescriptor) -> NormalizedDescriptor {
        descriptor.normalize_in(Path::new(ROOT))
    }

    fn aot() -> NormalizedDescriptor {
        normalized(ProjectDescriptor {
            prod_entry_file: Some("./app/main.prod.ts".to_string()),
            enable_ahead_of_time_compile: Some(true),
            ..Default::default()
        })
    }

    #[test]
    fn test_run_entry_starts_with_dev_server_clients() {
        let descriptor = normalized(ProjectDescriptor {
            dev_server_port: Some(4200),
            ..Default::default()
        });
        let catalog = catalog();
        let run = Composer::new(&descriptor, &catalog).run();

        assert_eq!(
            run.app_entries(),
            [
                "webpack/hot/dev-server",
                "webpack-dev-server/client?http://localhost:4200",
                "./app/main.ts"
            ]
        );
        let output = run.output.as_ref().unwrap();
        assert_eq!(output.filename, "app/bundles/bundle.js");
        assert_eq!(run.devtool, Some(SourceMapMode::Inline));
    }

    #[test]
    fn test_run_uses_aot_entry_under_aot() {
        let descriptor = aot();
        let catalog = catalog();
        let run = Composer::new(&descriptor, &catalog).run();
        assert_eq!(run.app_entries()[2], "./app/main.aot.ts");
        assert_eq!(run.app_entries().len(), 3);
    }

    #[test]
    fn test_run_rule_order() {
        let descriptor = normalized(ProjectDescriptor::default());
        let catalog = catalog();
        let run = Composer::new(&descriptor, &catalog).run();

        let p = &catalog.passthrough;
        let expected = vec![
            catalog.pre.lint.clone(),
            catalog.plain.ts.clone(),
            catalog.plain.html.clone(),
            catalog.plain.less.clone(),
            catalog.plain.css.clone(),
            p.raw.clone(),
            p.image.clone(),
            p.woff.clone(),
            p.ttf.clone(),
            p.eot.clone(),
            p.svg.clone(),
        ];
        assert_eq!(run.rules(), expected.as_slice());
    }

    #[test]
    fn test_run_plugins() {
        let descriptor = normalized(ProjectDescriptor::default());
        let catalog = catalog();
        let run = Composer::new(&descriptor, &catalog).run();
        let names: Vec<&str> = run.plugins.iter().map(Plugin::name).collect();
        assert_eq!(
            names,
            [
                "HotModuleReplacementPlugin",
                "HtmlWebpackPlugin",
                "CommonsChunkPlugin",
                "LoaderOptionsPlugin"
            ]
        );
    }

    #[test]
    fn test_build_without_aot_uses_production_entry() {
        let descriptor = normalized(ProjectDescriptor {
            prod_entry_file: Some("./app/main.prod.ts".to_string()),
            ..Default::default()
        });
        let catalog = catalog();
        let build = Composer::new(&descriptor, &catalog).build();

        assert_eq!(build.app_entries(), ["./app/main.prod.ts"]);
        assert!(!build.has_plugin("AotPlugin"));
        assert_eq!(
            build.output.as_ref().unwrap().filename,
            "app/bundles/bundle.[hash].js"
        );
        assert_eq!(build.devtool, Some(SourceMapMode::CheapModule));
    }

    #[test]
    fn test_build_under_aot_replaces_production_entry() {
        let descriptor = aot();
        let catalog = catalog();
        let build = Composer::new(&descriptor, &catalog).build();

        assert_eq!(build.app_entries(), ["./app/main.aot.ts"]);
        assert!(!build
            .app_entries()
            .contains(&"./app/main.prod.ts".to_string()));

        let aot_plugin = build
            .plugins
            .iter()
            .find(|p| p.name() == "AotPlugin")
            .unwrap();
        assert_eq!(
            aot_plugin,
            &Plugin::AotCompiler {
                ts_config_path: PathBuf::from("/srv/shop/tsconfig.aot.json"),
                entry_module: "/srv/shop/app/app.module#AppModule".to_string(),
            }
        );
        assert!(build.uses_loader("@ngtools/webpack"));
        assert!(!build.uses_loader("angular2-template-loader"));
    }

    #[test]
    fn test_build_plugin_order() {
        let descriptor = normalized(ProjectDescriptor {
            enable_ahead_of_time_compile: Some(true),
            enable_bundle_analysis: Some(true),
            export_global: Some(true),
            ..Default::default()
        });
        let catalog = catalog();
        let build = Composer::new(&descriptor, &catalog).build();
        let names: Vec<&str> = build.plugins.iter().map(Plugin::name).collect();
        assert_eq!(
            names,
            [
                "ProvidePlugin",
                "DefinePlugin",
                "HtmlWebpackPlugin",
                "AotPlugin",
                "UglifyJsPlugin",
                "CommonsChunkPlugin",
                "ModuleConcatenationPlugin",
                "BundleAnalyzerPlugin"
            ]
        );
    }

    #[test]
    fn test_build_rule_order_puts_passthrough_before_selected() {
        let descriptor = normalized(ProjectDescriptor {
            use_template_inlining: Some(true),
            ..Default::default()
        });
        let catalog = catalog();
        let build = Composer::new(&descriptor, &catalog).build();

        let rules = build.rules();
        assert_eq!(rules.len(), 1 + 6 + 5);
        assert_eq!(rules[0], catalog.pre.lint);
        assert_eq!(rules[1], catalog.passthrough.raw);
        assert_eq!(rules[6], catalog.passthrough.svg);
        assert_eq!(rules[7], catalog.template.ts);
        assert_eq!(rules[10], catalog.template.scss);
    }

    #[test]
    fn test_test_variant_composition() {
        let descriptor = normalized(ProjectDescriptor::default());
        let catalog = catalog();
        let test = Composer::new(&descriptor, &catalog).test();

        assert!(test.entry.is_none());
        assert!(test.output.is_none());
        assert_eq!(test.devtool, Some(SourceMapMode::Inline));
        let expected = vec![
            catalog.pre.lint.clone(),
            catalog.plain.html.clone(),
            catalog.plain.less.clone(),
            catalog.plain.css.clone(),
            catalog.passthrough.raw.clone(),
            catalog.passthrough.style_null.clone(),
            catalog.plain.ts_with_comments.clone(),
            catalog.post.coverage.clone(),
        ];
        assert_eq!(test.rules(), expected.as_slice());
        assert_eq!(test.rules().last().unwrap().enforce, Some(Enforce::Post));
    }

    #[test]
    fn test_debug_differs_only_in_ts_rule_and_coverage() {
        let descriptor = normalized(ProjectDescriptor {
            use_template_inlining: Some(true),
            ..Default::default()
        });
        let catalog = catalog();
        let composer = Composer::new(&descriptor, &catalog);
        let test = composer.test();
        let debug = composer.debug();

        assert_eq!(debug.rules().len(), test.rules().len() - 1);
        assert_eq!(debug.rules()[..6], test.rules()[..6]);
        assert_eq!(debug.rules()[6], catalog.template.ts_no_comments);
        assert!(!debug.uses_loader("istanbul-instrumenter-loader"));
        assert_eq!(debug.plugins, test.plugins);
    }

    #[test]
    fn test_test_under_aot_has_no_typescript_rule() {
        let descriptor = aot();
        let catalog = catalog();
        let test = Composer::new(&descriptor, &catalog).test();

        assert!(!test.uses_loader("@ngtools/webpack"));
        assert!(!test.uses_loader("ts-loader"));
        assert_eq!(test.rules().len(), 7);
    }

    #[test]
    fn test_export_global_adds_provider_to_every_variant() {
        let catalog = catalog();
        for export_global in [false, true] {
            let descriptor = normalized(ProjectDescriptor {
                export_global: Some(export_global),
                ..Default::default()
            });
            let composer = Composer::new(&descriptor, &catalog);
            for variant in [composer.run(), composer.build(), composer.test(), composer.debug()] {
                assert_eq!(variant.has_plugin("ProvidePlugin"), export_global);
            }
        }
    }

    #[test]
    fn test_variants_do_not_share_rules() {
        let descriptor = normalized(ProjectDescriptor::default());
        let catalog = catalog();
        let composer = Composer::new(&descriptor, &catalog);

        let mut run = composer.run();
        let build = composer.build();
        let lint_before = build.rules()[0].clone();

        run.module.rules[0].test = "mutated".to_string();
        run.module.rules.clear();

        assert_eq!(build.rules()[0], lint_before);
        assert_eq!(composer.run().rules().len(), 11);
        assert_eq!(catalog.pre.lint.test, lint_before.test);
    }
}
