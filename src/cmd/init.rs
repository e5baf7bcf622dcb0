//! Init command implementation
//!
//! Handles the `frontconf init` command which writes a descriptor populated
//! with every default, ready to edit.

use anyhow::{bail, Result};
use console::style;
use std::path::{Path, PathBuf};

use crate::config::{
    DescriptorFormat, DescriptorLoader, ProjectDescriptor, DESCRIPTOR_FILE_NAMES,
};
use crate::fmt::{CHECKMARK, INFO, ROCKET, WARNING};
use crate::infra::{FileSystem, RealFileSystem};

/// Create a descriptor with defaults
///
/// `target` is either a directory, which receives `frontconf.json` or
/// `frontconf.toml`, or a descriptor file path. An existing descriptor is
/// never overwritten.
///
/// # Examples
///
/// ```no_run
/// use frontconf::cmd::init::cmd_init;
/// use std::path::Path;
///
/// cmd_init(Path::new("."), "toml")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(target: &Path, format: &str) -> Result<()> {
    println!(
        "{}{} Initializing descriptor",
        ROCKET,
        style("frontconf init").bold()
    );
    println!();

    let format = match format.to_ascii_lowercase().as_str() {
        "json" => DescriptorFormat::Json,
        "toml" => DescriptorFormat::Toml,
        other => bail!("Unknown descriptor format '{}' (expected json or toml)", other),
    };

    match init_with_fs(target, format, &RealFileSystem)? {
        InitOutcome::Created(path) => {
            println!(
                "{}Created {}",
                CHECKMARK,
                style(path.display()).cyan()
            );
            println!();
            println!("{}Next steps:", INFO);
            println!("   1. List your framework modules under {}", style("vendors").bold());
            println!("   2. Run {} to review the descriptor", style("frontconf check").bold());
            println!("   3. Run {} to write the configurations", style("frontconf emit").bold());
        }
        InitOutcome::Exists(path) => {
            println!(
                "{}Descriptor already exists: {}",
                WARNING,
                style(path.display()).cyan()
            );
            println!("   Delete it first or edit manually to update.");
        }
    }

    Ok(())
}

/// What `init` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new descriptor was written
    Created(PathBuf),
    /// A descriptor was already there; nothing was written
    Exists(PathBuf),
}

/// Write the default descriptor through `fs`
pub fn init_with_fs<FS: FileSystem>(
    target: &Path,
    format: DescriptorFormat,
    fs: &FS,
) -> Result<InitOutcome> {
    let (dir, path) = match DescriptorFormat::from_path(target) {
        Some(_) => (None, target.to_path_buf()),
        None => (Some(target), target.join(format.file_name())),
    };

    let existing = match dir {
        Some(dir) => DESCRIPTOR_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| fs.is_file(candidate)),
        None => Some(path.clone()).filter(|p| fs.is_file(p)),
    };
    if let Some(existing) = existing {
        return Ok(InitOutcome::Exists(existing));
    }

    if let Some(dir) = dir {
        fs.create_dir_all(dir)?;
    }
    DescriptorLoader::save_with_fs(&default_descriptor(), &path, fs)?;
    Ok(InitOutcome::Created(path))
}

/// Every field set to its default
pub fn default_descriptor() -> ProjectDescriptor {
    ProjectDescriptor::from(&ProjectDescriptor::default().normalize())
}
