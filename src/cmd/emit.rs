//! Emit command implementation
//!
//! Handles the `frontconf emit` command which writes every configuration
//! target as a JSON file. Targets are composed and written in parallel.

use anyhow::{Context, Result};
use console::style;
use log::debug;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::workspace::Workspace;
use crate::compose::{Composer, Target};
use crate::error::FrontconfError;
use crate::fmt::{format_bytes, CHECKMARK, HAMMER};
use crate::infra::{FileSystem, RealFileSystem};

/// One written configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    /// Target the file holds
    pub target: Target,
    /// Where it was written
    pub path: PathBuf,
    /// Size in bytes
    pub bytes: u64,
}

/// Write every configuration into `out_dir`
pub fn cmd_emit(descriptor: &Path, catalog: Option<&Path>, out_dir: &Path) -> Result<()> {
    let workspace = Workspace::load(descriptor, catalog)?;
    let composer = workspace.composer();

    println!(
        "{}{} {} configurations ({} strategy)",
        HAMMER,
        style("frontconf emit").bold(),
        Target::ALL.len(),
        style(composer.strategy()).cyan()
    );
    println!();

    let emitted = emit_all(&composer, out_dir, &RealFileSystem)?;

    let mut total = 0;
    for file in &emitted {
        total += file.bytes;
        println!(
            "   {:<22} {:>10}  {}",
            file.target.name(),
            format_bytes(file.bytes),
            style(file.path.display()).dim()
        );
    }
    println!();
    println!(
        "{}Wrote {} files ({}) to {}",
        CHECKMARK,
        emitted.len(),
        format_bytes(total),
        style(out_dir.display()).cyan()
    );

    Ok(())
}

/// Compose and write every target, returning files in [`Target::ALL`] order
pub fn emit_all<FS: FileSystem + Sync>(
    composer: &Composer<'_>,
    out_dir: &Path,
    fs: &FS,
) -> Result<Vec<EmittedFile>> {
    fs.create_dir_all(out_dir).map_err(|e| FrontconfError::Io {
        context: format!("creating {}", out_dir.display()),
        source: e,
    })?;

    Target::ALL[..]
        .par_iter()
        .map(|target| -> Result<EmittedFile> {
            let json = composer
                .compose(*target)
                .to_json_pretty()
                .with_context(|| format!("Failed to serialize {} configuration", target))?;
            let path = out_dir.join(target.file_name());
            debug!("writing {} ({} bytes)", path.display(), json.len());

            fs.write(&path, &json).map_err(|e| FrontconfError::Io {
                context: format!("writing {}", path.display()),
                source: e,
            })?;

            Ok(EmittedFile {
                target: *target,
                path,
                bytes: json.len() as u64,
            })
        })
        .collect()
}
