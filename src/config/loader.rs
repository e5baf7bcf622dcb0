//! Descriptor and rule catalog loading

use super::file::{ProjectDescriptor, DESCRIPTOR_FILE_NAMES};
use super::normalize::NormalizedDescriptor;
use crate::error::FrontconfError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::rules::RuleCatalog;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// On-disk descriptor format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    /// JSON document
    Json,
    /// TOML document
    Toml,
}

impl DescriptorFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Format name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Default descriptor file name for this format
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Json => DESCRIPTOR_FILE_NAMES[0],
            Self::Toml => DESCRIPTOR_FILE_NAMES[1],
        }
    }
}

/// A descriptor together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedDescriptor {
    /// Parsed descriptor
    pub descriptor: ProjectDescriptor,
    /// File it was read from
    pub path: PathBuf,
    /// Directory relative paths resolve against
    pub root: PathBuf,
}

impl LoadedDescriptor {
    /// Normalize against the descriptor's directory
    pub fn normalize(&self) -> NormalizedDescriptor {
        self.descriptor.normalize_in(&self.root)
    }
}

/// Handles loading and saving descriptor files
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// Load a descriptor from a file, or from a directory containing one
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use frontconf::config::DescriptorLoader;
    /// use std::path::Path;
    ///
    /// let loaded = DescriptorLoader::load(Path::new("."))?;
    /// println!("Loaded {}", loaded.path.display());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<LoadedDescriptor> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<LoadedDescriptor> {
        let file = Self::locate(path, fs);
        let format = DescriptorFormat::from_path(&file)
            .ok_or_else(|| FrontconfError::UnsupportedFormat { path: file.clone() })?;

        let contents = fs.read_to_string(&file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FrontconfError::DescriptorNotFound {
                    path: file.clone(),
                    source: e,
                }
            } else {
                FrontconfError::Io {
                    context: format!("reading {}", file.display()),
                    source: e,
                }
            }
        })?;

        let descriptor = Self::parse(&contents, format).map_err(|message| {
            FrontconfError::DescriptorParse {
                path: file.clone(),
                message,
            }
        })?;

        info!("loaded {} descriptor from {}", format.name(), file.display());

        let root = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(LoadedDescriptor {
            descriptor,
            path: file,
            root,
        })
    }

    /// Parse descriptor contents in the given format
    pub fn parse(contents: &str, format: DescriptorFormat) -> Result<ProjectDescriptor, String> {
        match format {
            DescriptorFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
            DescriptorFormat::Toml => toml_edit::de::from_str(contents).map_err(|e| e.to_string()),
        }
    }

    /// Resolve a directory to the descriptor file inside it
    ///
    /// Files are returned unchanged. For a directory the first existing name in
    /// [`DESCRIPTOR_FILE_NAMES`] wins; if none exists the JSON name is returned so
    /// the read reports it as missing.
    pub fn locate<FS: FileSystem>(path: &Path, fs: &FS) -> PathBuf {
        if DescriptorFormat::from_path(path).is_some() || fs.is_file(path) {
            return path.to_path_buf();
        }
        for name in DESCRIPTOR_FILE_NAMES {
            let candidate = path.join(name);
            if fs.is_file(&candidate) {
                debug!("found descriptor {}", candidate.display());
                return candidate;
            }
        }
        path.join(DESCRIPTOR_FILE_NAMES[0])
    }

    /// Serialize a descriptor in the given format
    pub fn render(descriptor: &ProjectDescriptor, format: DescriptorFormat) -> Result<String> {
        let contents = match format {
            DescriptorFormat::Json => serde_json::to_string_pretty(descriptor)
                .context("Failed to serialize descriptor")?,
            DescriptorFormat::Toml => toml_edit::ser::to_string_pretty(descriptor)
                .context("Failed to serialize descriptor")?,
        };
        Ok(contents)
    }

    /// Save a descriptor to `path`, format chosen by extension
    pub fn save(descriptor: &ProjectDescriptor, path: &Path) -> Result<()> {
        Self::save_with_fs(descriptor, path, &RealFileSystem)
    }

    /// Save with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        descriptor: &ProjectDescriptor,
        path: &Path,
        fs: &FS,
    ) -> Result<()> {
        let format = DescriptorFormat::from_path(path).ok_or_else(|| {
            FrontconfError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        let contents = Self::render(descriptor, format)?;

        fs.write(path, contents).map_err(|e| FrontconfError::Io {
            context: format!("writing {}", path.display()),
            source: e,
        })?;

        Ok(())
    }
}

/// Loads an external rule catalog
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a JSON rule catalog
    pub fn load(path: &Path) -> Result<RuleCatalog> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<RuleCatalog> {
        let contents = fs.read_to_string(path).map_err(|e| FrontconfError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        })?;
        let catalog =
            RuleCatalog::from_json(&contents).map_err(|e| FrontconfError::InvalidCatalog {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        info!("loaded rule catalog from {}", path.display());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    // In-memory FileSystem for testing
    #[derive(Default)]
    struct MockFileSystem {
        files: HashMap<PathBuf, String>,
        fail_reads: bool,
        written: Mutex<HashMap<PathBuf, String>>,
    }

    impl MockFileSystem {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(PathBuf::from(path), content.to_string());
            Self {
                files,
                ..Default::default()
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            if self.fail_reads {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            let text = String::from_utf8_lossy(contents.as_ref()).to_string();
            self.written
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), text);
            Ok(())
        }
    }

    #[test]
    fn test_loader_finds_json_in_directory() {
        let fs = MockFileSystem::with_file("shop/frontconf.json", r#"{"appName": "shop"}"#);
        let loaded = DescriptorLoader::load_with_fs(Path::new("shop"), &fs).unwrap();

        assert_eq!(loaded.path, PathBuf::from("shop/frontconf.json"));
        assert_eq!(loaded.root, PathBuf::from("shop"));
        assert_eq!(loaded.descriptor.app_name.as_deref(), Some("shop"));
    }

    #[test]
    fn test_loader_falls_back_to_toml() {
        let fs = MockFileSystem::with_file("shop/frontconf.toml", "appName = \"shop\"\n");
        let loaded = DescriptorLoader::load_with_fs(Path::new("shop"), &fs).unwrap();
        assert_eq!(loaded.path, PathBuf::from("shop/frontconf.toml"));
        assert_eq!(loaded.normalize().app_name, "shop");
    }

    #[test]
    fn test_loader_bare_file_name_uses_current_dir_as_root() {
        let fs = MockFileSystem::with_file("frontconf.json", "{}");
        let loaded = DescriptorLoader::load_with_fs(Path::new("frontconf.json"), &fs).unwrap();
        assert_eq!(loaded.root, PathBuf::from("."));
    }

    #[test]
    fn test_loader_missing_descriptor_is_not_found() {
        let fs = MockFileSystem::default();
        let err = DescriptorLoader::load_with_fs(Path::new("empty"), &fs).unwrap_err();
        let fc = err.downcast_ref::<FrontconfError>().unwrap();
        assert!(matches!(fc, FrontconfError::DescriptorNotFound { .. }));
    }

    #[test]
    fn test_loader_read_failure_is_io_error() {
        let fs = MockFileSystem {
            fail_reads: true,
            ..MockFileSystem::with_file("frontconf.json", "{}")
        };
        let err = DescriptorLoader::load_with_fs(Path::new("frontconf.json"), &fs).unwrap_err();
        let fc = err.downcast_ref::<FrontconfError>().unwrap();
        assert!(matches!(fc, FrontconfError::Io { .. }));
    }

    #[test]
    fn test_loader_rejects_unknown_extension() {
        let fs = MockFileSystem::with_file("frontconf.yaml", "appName: a");
        let err = DescriptorLoader::load_with_fs(Path::new("frontconf.yaml"), &fs).unwrap_err();
        let fc = err.downcast_ref::<FrontconfError>().unwrap();
        assert!(matches!(fc, FrontconfError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_loader_reports_parse_errors() {
        let fs = MockFileSystem::with_file("frontconf.json", "{ not json");
        let err = DescriptorLoader::load_with_fs(Path::new("frontconf.json"), &fs).unwrap_err();
        let fc = err.downcast_ref::<FrontconfError>().unwrap();
        assert!(matches!(fc, FrontconfError::DescriptorParse { .. }));
        assert_eq!(fc.exit_code(), 65);
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("frontconf.toml");
        let descriptor = ProjectDescriptor {
            app_name: Some("shop".to_string()),
            vendors: Some(vec!["rxjs".to_string()]),
            enable_ahead_of_time_compile: Some(true),
            ..Default::default()
        };

        DescriptorLoader::save(&descriptor, &path).unwrap();
        let loaded = DescriptorLoader::load(temp.path()).unwrap();

        assert_eq!(loaded.descriptor, descriptor);
        assert_eq!(loaded.root, temp.path());
    }

    #[test]
    fn test_save_with_fs_writes_pretty_json() {
        let fs = MockFileSystem::default();
        let descriptor = ProjectDescriptor {
            app_name: Some("a".to_string()),
            ..Default::default()
        };
        DescriptorLoader::save_with_fs(&descriptor, Path::new("frontconf.json"), &fs).unwrap();

        let written = fs.written.lock().unwrap();
        let content = written.get(Path::new("frontconf.json")).unwrap();
        assert!(content.contains("\"appName\": \"a\""));
    }

    #[test]
    fn test_catalog_loader_rejects_partial_catalog() {
        let fs = MockFileSystem::with_file("rules.json", r#"{"pre": {}}"#);
        let err = CatalogLoader::load_with_fs(Path::new("rules.json"), &fs).unwrap_err();
        let fc = err.downcast_ref::<FrontconfError>().unwrap();
        assert!(matches!(fc, FrontconfError::InvalidCatalog { .. }));
    }

    #[test]
    fn test_catalog_loader_reads_serialized_builtin() {
        let builtin = RuleCatalog::builtin(Path::new("/p"));
        let fs = MockFileSystem::with_file("rules.json", &serde_json::to_string(&builtin).unwrap());
        let catalog = CatalogLoader::load_with_fs(Path::new("rules.json"), &fs).unwrap();
        assert_eq!(catalog, builtin);
    }
}
