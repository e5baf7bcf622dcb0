//! Project descriptor data structures

use serde::{Deserialize, Serialize};

/// Descriptor file names looked up in a project directory, in priority order
pub const DESCRIPTOR_FILE_NAMES: [&str; 2] = ["frontconf.json", "frontconf.toml"];

/// Project descriptor as written by the user
///
/// Every field is optional; [`ProjectDescriptor::normalize`] fills the gaps.
/// Key names from the older webpack/karma helper (`buildPath`, `exportJQuery`,
/// `useTemplateUrl`, `buildAoT`, `tsConfigAOT`, `karmaFiles`) are accepted
/// as aliases.
///
/// [`ProjectDescriptor::normalize`]: crate::config::ProjectDescriptor::normalize
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    /// Application name, used as the bundle directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Output directory, relative to the project root
    #[serde(default, alias = "buildPath", skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// Vendor modules split into their own chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<Vec<String>>,

    /// Entry file for dev-server runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_entry_file: Option<String>,

    /// Entry file for production builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prod_entry_file: Option<String>,

    /// Entry file for ahead-of-time builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aot_entry_file: Option<String>,

    /// Root module handed to the AOT compiler (`path#Symbol`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aot_entry_module: Option<String>,

    /// TypeScript config used by the AOT compiler
    #[serde(default, alias = "tsConfigAOT", skip_serializing_if = "Option::is_none")]
    pub aot_tool_config_path: Option<String>,

    /// HTML page the template plugin injects bundles into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_template: Option<String>,

    /// Expose jQuery as a global (`$`, `jQuery`, `window.jQuery`)
    #[serde(default, alias = "exportJQuery", skip_serializing_if = "Option::is_none")]
    pub export_global: Option<bool>,

    /// Inline component templates at build time
    #[serde(default, alias = "useTemplateUrl", skip_serializing_if = "Option::is_none")]
    pub use_template_inlining: Option<bool>,

    /// Compile ahead of time; wins over template inlining
    #[serde(
        default,
        alias = "buildAoT",
        alias = "enableAOT",
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_ahead_of_time_compile: Option<bool>,

    /// Add the bundle-size analyzer to production builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_bundle_analysis: Option<bool>,

    /// Files appended to the test harness after the bootstrap shims
    #[serde(default, alias = "karmaFiles", skip_serializing_if = "Option::is_none")]
    pub extra_test_files: Option<Vec<String>>,

    /// Dev-server port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server_port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_parses_camel_case_json() {
        let json = r#"{
            "appName": "shop",
            "outputDir": "./dist",
            "vendors": ["@angular/core", "rxjs"],
            "enableAheadOfTimeCompile": true,
            "devServerPort": 4200
        }"#;

        let descriptor: ProjectDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.app_name.as_deref(), Some("shop"));
        assert_eq!(descriptor.output_dir.as_deref(), Some("./dist"));
        assert_eq!(descriptor.vendors.as_ref().map(Vec::len), Some(2));
        assert_eq!(descriptor.enable_ahead_of_time_compile, Some(true));
        assert_eq!(descriptor.dev_server_port, Some(4200));
        assert!(descriptor.use_template_inlining.is_none());
    }

    #[test]
    fn test_descriptor_accepts_legacy_key_names() {
        let json = r#"{
            "appName": "a",
            "vendors": ["b", "c"],
            "buildPath": "./out",
            "exportJQuery": true,
            "useTemplateUrl": true,
            "buildAoT": true,
            "tsConfigAOT": "tsconfig.prod.json",
            "karmaFiles": ["a.f"]
        }"#;

        let descriptor: ProjectDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.output_dir.as_deref(), Some("./out"));
        assert_eq!(descriptor.export_global, Some(true));
        assert_eq!(descriptor.use_template_inlining, Some(true));
        assert_eq!(descriptor.enable_ahead_of_time_compile, Some(true));
        assert_eq!(
            descriptor.aot_tool_config_path.as_deref(),
            Some("tsconfig.prod.json")
        );
        assert_eq!(descriptor.extra_test_files, Some(vec!["a.f".to_string()]));
    }

    #[test]
    fn test_descriptor_ignores_unknown_keys() {
        let json = r#"{"appName": "a", "entryFile": "e"}"#;
        let descriptor: ProjectDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.app_name.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_descriptor_serializes_to_empty_object() {
        let json = serde_json::to_string(&ProjectDescriptor::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_descriptor_parses_toml() {
        let toml = r#"
appName = "shop"
vendors = ["rxjs"]
useTemplateInlining = true
extraTestFiles = ["spec/helpers.js"]
"#;
        let descriptor: ProjectDescriptor = toml_edit::de::from_str(toml).unwrap();
        assert_eq!(descriptor.app_name.as_deref(), Some("shop"));
        assert_eq!(descriptor.use_template_inlining, Some(true));
        assert_eq!(
            descriptor.extra_test_files,
            Some(vec!["spec/helpers.js".to_string()])
        );
    }
}
