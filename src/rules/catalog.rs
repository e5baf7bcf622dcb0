//! Rule catalog: the fixed lookup tables of processing rules
//!
//! Each compilation strategy owns its own table type, so a strategy can only
//! ever reach the kinds its table declares. The ahead-of-time table has no
//! comment-preserving TypeScript rules and no template-inlining loader.
//!
//! The built-in data mirrors the loader chains of the front-end toolchain this
//! crate targets (ts-loader, angular2-template-loader, @ngtools/webpack, ...).

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

use super::strategy::CompilationStrategy;
use super::{AssetKind, Enforce, RuleDefinition};

/// Extensions the bundler resolves without an explicit suffix
pub const RESOLVE_EXTENSIONS: [&str; 6] = [".ts", ".js", ".json", ".css", ".less", ".html"];

const URL_LOADER_LIMIT: u64 = 100_000;

/// Rules applied before everything else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreRules {
    /// Lint TypeScript sources
    pub lint: RuleDefinition,
}

/// Rules applied after everything else
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRules {
    /// Coverage instrumentation of application sources
    pub coverage: RuleDefinition,
}

/// Strategy-independent handlers for raw text, images, fonts and styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassthroughRules {
    /// Raw text assets (tjs, tjson, xml)
    pub raw: RuleDefinition,
    /// Inlined images
    pub image: RuleDefinition,
    /// WOFF fonts
    pub woff: RuleDefinition,
    /// TrueType fonts
    pub ttf: RuleDefinition,
    /// Embedded OpenType fonts
    pub eot: RuleDefinition,
    /// SVG images
    pub svg: RuleDefinition,
    /// Stylesheets swallowed in test runs
    pub style_null: RuleDefinition,
}

/// Rule table for the plain strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainRules {
    /// TypeScript
    pub ts: RuleDefinition,
    /// TypeScript, comments kept
    pub ts_with_comments: RuleDefinition,
    /// TypeScript, comments stripped
    pub ts_no_comments: RuleDefinition,
    /// HTML
    pub html: RuleDefinition,
    /// Less
    pub less: RuleDefinition,
    /// Sass
    pub scss: RuleDefinition,
    /// CSS
    pub css: RuleDefinition,
}

/// Rule table for the template-inlining strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRules {
    /// TypeScript with inlined templates
    pub ts: RuleDefinition,
    /// TypeScript with inlined templates, comments kept
    pub ts_with_comments: RuleDefinition,
    /// TypeScript with inlined templates, comments stripped
    pub ts_no_comments: RuleDefinition,
    /// HTML
    pub html: RuleDefinition,
    /// Less
    pub less: RuleDefinition,
    /// Sass
    pub scss: RuleDefinition,
    /// CSS
    pub css: RuleDefinition,
}

/// Rule table for the ahead-of-time strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AotRules {
    /// TypeScript through the AOT compiler
    pub ts: RuleDefinition,
    /// HTML
    pub html: RuleDefinition,
    /// Less
    pub less: RuleDefinition,
    /// Sass
    pub scss: RuleDefinition,
    /// CSS
    pub css: RuleDefinition,
}

impl PlainRules {
    fn get(&self, kind: AssetKind) -> Option<&RuleDefinition> {
        match kind {
            AssetKind::Ts => Some(&self.ts),
            AssetKind::TsWithComments => Some(&self.ts_with_comments),
            AssetKind::TsNoComments => Some(&self.ts_no_comments),
            AssetKind::Html => Some(&self.html),
            AssetKind::Less => Some(&self.less),
            AssetKind::Scss => Some(&self.scss),
            AssetKind::Css => Some(&self.css),
        }
    }
}

impl TemplateRules {
    fn get(&self, kind: AssetKind) -> Option<&RuleDefinition> {
        match kind {
            AssetKind::Ts => Some(&self.ts),
            AssetKind::TsWithComments => Some(&self.ts_with_comments),
            AssetKind::TsNoComments => Some(&self.ts_no_comments),
            AssetKind::Html => Some(&self.html),
            AssetKind::Less => Some(&self.less),
            AssetKind::Scss => Some(&self.scss),
            AssetKind::Css => Some(&self.css),
        }
    }
}

impl AotRules {
    fn get(&self, kind: AssetKind) -> Option<&RuleDefinition> {
        match kind {
            AssetKind::Ts => Some(&self.ts),
            AssetKind::Html => Some(&self.html),
            AssetKind::Less => Some(&self.less),
            AssetKind::Scss => Some(&self.scss),
            AssetKind::Css => Some(&self.css),
            AssetKind::TsWithComments | AssetKind::TsNoComments => None,
        }
    }
}

/// The table a strategy selects from
#[derive(Debug, Clone, Copy)]
pub enum StrategyTable<'a> {
    /// Plain compile table
    Plain(&'a PlainRules),
    /// Template-inlining table
    Template(&'a TemplateRules),
    /// Ahead-of-time table
    Aot(&'a AotRules),
}

impl<'a> StrategyTable<'a> {
    /// Look up the rule for `kind`, if this table has one
    pub fn get(&self, kind: AssetKind) -> Option<&'a RuleDefinition> {
        match *self {
            Self::Plain(table) => table.get(kind),
            Self::Template(table) => table.get(kind),
            Self::Aot(table) => table.get(kind),
        }
    }

    /// Strategy this table belongs to
    pub fn strategy(&self) -> CompilationStrategy {
        match self {
            Self::Plain(_) => CompilationStrategy::Plain,
            Self::Template(_) => CompilationStrategy::Template,
            Self::Aot(_) => CompilationStrategy::Aot,
        }
    }

    /// Kinds present in this table, in catalog order
    pub fn kinds(&self) -> Vec<AssetKind> {
        AssetKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }
}

/// Immutable set of rule definitions
///
/// # Examples
///
/// ```
/// use frontconf::rules::{AssetKind, CompilationStrategy, RuleCatalog};
/// use std::path::Path;
///
/// let catalog = RuleCatalog::builtin(Path::new("/srv/shop"));
/// let aot = catalog.table(CompilationStrategy::Aot);
///
/// assert!(aot.get(AssetKind::Ts).is_some());
/// assert!(aot.get(AssetKind::TsWithComments).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    /// Unconditional pre-processing rules
    pub pre: PreRules,
    /// Unconditional post-processing rules
    pub post: PostRules,
    /// Strategy-independent handlers
    pub passthrough: PassthroughRules,
    /// Plain strategy table
    pub plain: PlainRules,
    /// Template-inlining strategy table
    pub template: TemplateRules,
    /// Ahead-of-time strategy table
    pub aot: AotRules,
}

impl RuleCatalog {
    /// The strategy's table
    pub fn table(&self, strategy: CompilationStrategy) -> StrategyTable<'_> {
        match strategy {
            CompilationStrategy::Plain => StrategyTable::Plain(&self.plain),
            CompilationStrategy::Template => StrategyTable::Template(&self.template),
            CompilationStrategy::Aot => StrategyTable::Aot(&self.aot),
        }
    }

    /// Parse a catalog from its JSON form
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Every rule with a dotted name, for diagnostics
    pub fn named_rules(&self) -> Vec<(String, &RuleDefinition)> {
        let mut rules = vec![
            ("pre.lint".to_string(), &self.pre.lint),
            ("post.coverage".to_string(), &self.post.coverage),
            ("passthrough.raw".to_string(), &self.passthrough.raw),
            ("passthrough.image".to_string(), &self.passthrough.image),
            ("passthrough.woff".to_string(), &self.passthrough.woff),
            ("passthrough.ttf".to_string(), &self.passthrough.ttf),
            ("passthrough.eot".to_string(), &self.passthrough.eot),
            ("passthrough.svg".to_string(), &self.passthrough.svg),
            ("passthrough.styleNull".to_string(), &self.passthrough.style_null),
        ];
        for strategy in CompilationStrategy::ALL {
            let table = self.table(strategy);
            for kind in table.kinds() {
                if let Some(rule) = table.get(kind) {
                    rules.push((format!("{}.{}", strategy, kind), rule));
                }
            }
        }
        rules
    }

    /// Built-in catalog with include/exclude paths resolved against `root`
    pub fn builtin(root: &Path) -> Self {
        let node_modules = root.join("node_modules").display().to_string();
        let app = root.join("app").display().to_string();

        Self {
            pre: PreRules {
                lint: RuleDefinition::new(r"\.ts$").enforce(Enforce::Pre).loader_with(
                    "tslint-loader",
                    json!({ "emitErrors": false, "failOnHint": false }),
                ),
            },
            post: PostRules {
                coverage: RuleDefinition::new(r"\.(?:js|ts)$")
                    .enforce(Enforce::Post)
                    .include(app)
                    .loader("istanbul-instrumenter-loader")
                    .exclude(r"\.spec\.ts$")
                    .exclude(r"app/domain/services/testing")
                    .exclude("node_modules"),
            },
            passthrough: PassthroughRules {
                raw: RuleDefinition::new(r"\.(?:tjs|tjson|xml)$").loader("raw-loader"),
                image: RuleDefinition::new(r"\.(?:jpg|png)$")
                    .loader_with("url-loader", json!({ "limit": URL_LOADER_LIMIT })),
                woff: font_rule(r"\.woff(2)?(\?v=\d+\.\d+\.\d+)?$", "application/font-woff"),
                ttf: font_rule(r"\.ttf(\?v=\d+\.\d+\.\d+)?$", "application/octet-stream"),
                eot: RuleDefinition::new(r"\.eot(\?v=\d+\.\d+\.\d+)?$").loader("file-loader"),
                svg: font_rule(r"\.svg(\?v=\d+\.\d+\.\d+)?$", "image/svg+xml"),
                style_null: RuleDefinition::new(r"\.(?:css|less|scss|styl)$")
                    .loader("null-loader"),
            },
            plain: PlainRules {
                ts: RuleDefinition::new(r"\.ts$")
                    .loader("ts-loader")
                    .exclude(node_modules.clone()),
                ts_with_comments: RuleDefinition::new(r"\.ts$")
                    .loader_with("ts-loader", remove_comments(false))
                    .exclude(node_modules.clone()),
                ts_no_comments: RuleDefinition::new(r"\.ts$")
                    .loader_with("ts-loader", remove_comments(true))
                    .exclude(node_modules.clone()),
                html: RuleDefinition::new(r"\.html$").loader_with(
                    "html-loader",
                    json!({
                        "minimize": true,
                        "removeAttributeQuotes": false,
                        "caseSensitive": true,
                        "customAttrSurround": [["#", ""], [r"\*", ""], [r"\[?\(?", ""]],
                        "customAttrAssign": [r"\)?\]?="]
                    }),
                ),
                less: style_rule(r"\.less$", &["style-loader", "css-loader", "less-loader"]),
                scss: style_rule(r"\.scss", &["style-loader", "css-loader", "sass-loader"]),
                css: style_rule(r"\.css$", &["style-loader", "css-loader"]),
            },
            template: TemplateRules {
                ts: RuleDefinition::new(r"\.ts$")
                    .loader("ts-loader")
                    .loader("angular2-template-loader")
                    .exclude(r"main\.aot\.ts$"),
                ts_with_comments: RuleDefinition::new(r"\.ts$")
                    .loader_with("ts-loader", remove_comments(false))
                    .loader("angular2-template-loader")
                    .exclude(node_modules.clone()),
                ts_no_comments: RuleDefinition::new(r"\.ts$")
                    .loader_with("ts-loader", remove_comments(true))
                    .loader("angular2-template-loader")
                    .exclude(node_modules),
                html: RuleDefinition::new(r"\.html$").loader("raw-loader"),
                less: style_rule(r"\.less$", &["raw-loader", "less-loader"]),
                scss: style_rule(r"\.scss", &["raw-loader", "sass-loader"]),
                css: style_rule(r"\.css$", &["raw-loader", "css-loader"]),
            },
            aot: AotRules {
                ts: RuleDefinition::new(r"\.ts$").loader("@ngtools/webpack"),
                html: RuleDefinition::new(r"\.html$").loader("raw-loader"),
                less: style_rule(r"\.less$", &["raw-loader", "less-loader"]),
                scss: style_rule(r"\.scss", &["raw-loader", "sass-loader"]),
                css: style_rule(r"\.css$", &["raw-loader", "css-loader"]),
            },
        }
    }
}

fn remove_comments(remove: bool) -> serde_json::Value {
    json!({ "compilerOptions": { "removeComments": remove } })
}

fn style_rule(test: &str, loaders: &[&str]) -> RuleDefinition {
    loaders
        .iter()
        .fold(RuleDefinition::new(test), |rule, loader| rule.loader(*loader))
}

fn font_rule(test: &str, mimetype: &str) -> RuleDefinition {
    RuleDefinition::new(test).loader_with(
        "url-loader",
        json!({ "limit": URL_LOADER_LIMIT, "mimetype": mimetype }),
    )
}
