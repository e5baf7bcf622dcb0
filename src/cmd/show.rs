//! Show command implementation
//!
//! Handles the `frontconf show <target>` command which prints one composed
//! configuration as JSON on stdout.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use super::workspace::Workspace;
use crate::compose::Target;

/// Print one configuration as JSON
///
/// # Examples
///
/// ```no_run
/// use frontconf::cmd::show::cmd_show;
/// use std::path::Path;
///
/// cmd_show(Path::new("."), None, "build", false)?;
/// cmd_show(Path::new("."), None, "harness-headless", true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_show(
    descriptor: &Path,
    catalog: Option<&Path>,
    target: &str,
    compact: bool,
) -> Result<()> {
    let target: Target = target.parse()?;
    let workspace = Workspace::load(descriptor, catalog)?;

    info!("composing {} for {}", target, workspace.loaded.path.display());
    println!("{}", render(&workspace, target, compact)?);
    Ok(())
}

/// Compose `target` and serialize it
pub fn render(workspace: &Workspace, target: Target, compact: bool) -> Result<String> {
    let composed = workspace.composer().compose(target);
    let json = if compact {
        composed.to_json()
    } else {
        composed.to_json_pretty()
    };
    json.with_context(|| format!("Failed to serialize {} configuration", target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::Variant;
    use std::fs;
    use tempfile::TempDir;

    fn workspace(contents: &str) -> (TempDir, Workspace) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("frontconf.json"), contents).unwrap();
        let workspace = Workspace::load(temp_dir.path(), None).unwrap();
        (temp_dir, workspace)
    }

    #[test]
    fn test_render_compact_is_single_line() {
        let (_dir, workspace) = workspace("{}");
        let json = render(&workspace, Target::Bundler(Variant::Build), true).unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["devtool"], "cheap-module-source-map");
    }

    #[test]
    fn test_render_uses_descriptor_values() {
        let (dir, workspace) = workspace(r#"{"appName": "shop", "buildPath": "./out"}"#);
        let json = render(&workspace, Target::Bundler(Variant::Run), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["output"]["filename"], "shop/bundles/bundle.js");
        assert_eq!(
            value["output"]["path"],
            dir.path().join("out").display().to_string()
        );
    }
}
