// src/install/mod.rs

//! Install executor: materializes a selection onto the filesystem.
//!
//! Every selection entry is written to its path under the install
//! directory. Existing files are left untouched unless overwriting is
//! requested; what happened to each entry is recorded in an
//! [`InstallResult`]. Writes are not transactional: a failure surfaces
//! immediately and files written before it remain on disk.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::select::Selection;
use crate::source::DefVersion;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Install options, immutable flags consumed by the executor and the
/// config reconciler
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Record written paths in the persisted config
    pub save_to_config: bool,
    /// Replace files already present on disk
    pub overwrite_files: bool,
    /// Expand the selection through declared references before installing
    pub resolve_dependencies: bool,
    /// Regenerate a bundle file concatenating all written content
    pub bundle: Option<PathBuf>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What an install call did, keyed by artifact name. Append-only during
/// the call.
#[derive(Debug, Clone, Default)]
pub struct InstallResult {
    pub written: BTreeMap<String, DefVersion>,
    pub skipped: BTreeMap<String, DefVersion>,
    /// Reserved for prune-style operations; install itself never removes
    pub removed: BTreeMap<String, DefVersion>,
}

impl InstallResult {
    pub fn written_paths(&self) -> Vec<String> {
        self.written.values().map(|v| v.path.clone()).collect()
    }
}

/// Materialize a selection under `install_dir`.
///
/// Entries are processed in name order. With `save_to_config`, the
/// written paths are unioned into `config` and the config is persisted
/// after all writes succeed; the installed-path set never shrinks.
pub fn install(
    install_dir: &Path,
    selection: &Selection,
    options: &Options,
    config: &mut Config,
) -> Result<InstallResult> {
    let mut result = InstallResult::default();

    for (name, entry) in selection.iter() {
        let relative = sanitize_path(&entry.version.path)?;
        let target = install_dir.join(&relative);

        if target.exists() && !options.overwrite_files {
            tracing::debug!(name = %name, path = %relative.display(), "target exists, skipping");
            result.skipped.insert(name.clone(), entry.version.clone());
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &entry.version.content)?;
        tracing::debug!(name = %name, path = %relative.display(), "wrote definition");
        result.written.insert(name.clone(), entry.version.clone());
    }

    if let Some(bundle_path) = &options.bundle {
        write_bundle(bundle_path, &result)?;
    }

    if options.save_to_config {
        for version in result.written.values() {
            config.add_installed(version);
        }
        config.save()?;
        tracing::debug!(written = result.written.len(), "config updated");
    }

    Ok(result)
}

/// Regenerate the bundle wholesale: written content concatenated in name
/// order
fn write_bundle(path: &Path, result: &InstallResult) -> Result<()> {
    let mut bundle = String::new();
    for version in result.written.values() {
        bundle.push_str(&version.content);
        if !version.content.ends_with('\n') {
            bundle.push('\n');
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bundle)?;
    Ok(())
}

/// Normalize an install path from a history source.
///
/// Leading slashes are stripped, `.` components skipped, and `..`
/// components rejected so a hostile history entry cannot write outside
/// the install directory.
pub fn sanitize_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();
    let relative = path_str.trim_start_matches('/');

    let mut normalized = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(c) => normalized.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::PathTraversal(path_str.to_string()));
            }
            Component::Prefix(_) | Component::RootDir => {}
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(Error::PathTraversal(path_str.to_string()));
    }
    Ok(normalized)
}
