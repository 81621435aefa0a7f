// src/config/mod.rs

//! Persisted install manifest and disk reconciliation.
//!
//! The config records which definition paths have been installed, with
//! the commit and version they came from. It has set semantics over
//! paths: re-adding an installed path updates its metadata but never
//! duplicates it, and installs only ever grow the set. The file is
//! rewritten wholesale after a successful install that asked for it.
//!
//! Storage format:
//!
//! ```json
//! {
//!   "installed": {
//!     "jquery/jquery.d.ts": { "commit": "aaaa1111", "version": "1.9.0" }
//!   }
//! }
//! ```

use crate::error::{Error, Result};
use crate::source::DefVersion;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Metadata recorded per installed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledDef {
    pub commit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    installed: BTreeMap<String, InstalledDef>,
}

/// Result of comparing the manifest against the install directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Definition files on disk that the manifest does not track
    pub untracked: Vec<String>,
    /// Tracked paths missing from disk
    pub missing: Vec<String>,
}

impl ReconcileReport {
    /// Manifest and disk agree exactly
    pub fn is_synced(&self) -> bool {
        self.untracked.is_empty() && self.missing.is_empty()
    }

    /// Every tracked path is present on disk; external files may exist
    pub fn covers_disk(&self) -> bool {
        self.missing.is_empty()
    }
}

/// The persisted installed-paths manifest
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    installed: BTreeMap<String, InstalledDef>,
}

impl Config {
    /// Load the manifest from `path`; a missing file yields an empty
    /// config bound to that path.
    pub fn load(path: &Path) -> Result<Self> {
        let installed = if path.exists() {
            let raw = fs::read_to_string(path)?;
            let file: ConfigFile = serde_json::from_str(&raw)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            file.installed
        } else {
            BTreeMap::new()
        };
        Ok(Config {
            path: path.to_path_buf(),
            installed,
        })
    }

    /// Rewrite the manifest file wholesale
    pub fn save(&self) -> Result<()> {
        let file = ConfigFile {
            installed: self.installed.clone(),
        };
        let raw = serde_json::to_string_pretty(&file)
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Union one installed definition into the path set. Re-adding an
    /// already-installed path refreshes its metadata only.
    pub fn add_installed(&mut self, version: &DefVersion) {
        self.installed.insert(
            version.path.clone(),
            InstalledDef {
                commit: version.commit.hash.clone(),
                version: version.version.as_ref().map(|v| v.to_string()),
            },
        );
    }

    pub fn get_installed(&self, path: &str) -> Option<&InstalledDef> {
        self.installed.get(path)
    }

    /// Sorted list of tracked paths
    pub fn installed_paths(&self) -> Vec<String> {
        self.installed.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Compare the manifest against the definition files actually present
    /// under `dir`
    pub fn verify_against_dir(&self, dir: &Path) -> Result<ReconcileReport> {
        let on_disk = list_def_files(dir)?;
        let tracked: BTreeSet<&str> = self.installed.keys().map(|s| s.as_str()).collect();

        let untracked = on_disk
            .iter()
            .filter(|p| !tracked.contains(p.as_str()))
            .cloned()
            .collect();
        let disk_set: BTreeSet<&str> = on_disk.iter().map(|s| s.as_str()).collect();
        let missing = tracked
            .iter()
            .filter(|p| !disk_set.contains(**p))
            .map(|p| p.to_string())
            .collect();

        Ok(ReconcileReport { untracked, missing })
    }
}

/// Definition files (`*.d.ts`) under `dir`, as sorted slash-separated
/// paths relative to `dir`
fn list_def_files(dir: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    if !dir.exists() {
        return Ok(paths);
    }
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walkdir error")),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".d.ts") {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(dir) {
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            paths.push(parts.join("/"));
        }
    }
    paths.sort();
    Ok(paths)
}
