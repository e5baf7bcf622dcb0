//! Descriptor and catalog shared by the commands

use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::compose::Composer;
use crate::config::{CatalogLoader, DescriptorLoader, LoadedDescriptor, NormalizedDescriptor};
use crate::rules::RuleCatalog;

/// Everything a command needs to compose configurations
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Descriptor as read from disk
    pub loaded: LoadedDescriptor,
    /// Descriptor with defaults applied
    pub descriptor: NormalizedDescriptor,
    /// Rule catalog, built in unless one was given
    pub catalog: RuleCatalog,
}

impl Workspace {
    /// Load the descriptor at `descriptor` and, optionally, an external catalog
    pub fn load(descriptor: &Path, catalog: Option<&Path>) -> Result<Self> {
        let mut loaded = DescriptorLoader::load(descriptor)?;
        // The bundler rejects relative output paths
        if let Ok(root) = std::path::absolute(&loaded.root) {
            loaded.root = root;
        }
        let normalized = loaded.normalize();
        let catalog = match catalog {
            Some(path) => CatalogLoader::load(path)?,
            None => {
                debug!("using built-in rule catalog rooted at {}", loaded.root.display());
                RuleCatalog::builtin(&loaded.root)
            }
        };

        Ok(Self {
            loaded,
            descriptor: normalized,
            catalog,
        })
    }

    /// Composer over this workspace
    pub fn composer(&self) -> Composer<'_> {
        Composer::new(&self.descriptor, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_roots_builtin_catalog_at_descriptor_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("frontconf.json"),
            r#"{"appName": "shop", "exportGlobal": true}"#,
        )
        .unwrap();

        let workspace = Workspace::load(temp_dir.path(), None).unwrap();
        assert_eq!(workspace.descriptor.app_name, "shop");
        assert_eq!(workspace.descriptor.root, temp_dir.path());
        assert_eq!(workspace.catalog, RuleCatalog::builtin(temp_dir.path()));
        assert!(workspace.composer().base().has_plugin("ProvidePlugin"));
    }

    #[test]
    fn test_load_reads_external_catalog() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("frontconf.json"), "{}").unwrap();

        let mut catalog = RuleCatalog::builtin(Path::new("/elsewhere"));
        catalog.plain.css.test = r"\.pcss$".to_string();
        let catalog_path = temp_dir.path().join("rules.json");
        fs::write(&catalog_path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let workspace = Workspace::load(temp_dir.path(), Some(&catalog_path)).unwrap();
        assert_eq!(workspace.catalog, catalog);
    }

    #[test]
    fn test_missing_descriptor_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Workspace::load(temp_dir.path(), None).is_err());
    }
}
