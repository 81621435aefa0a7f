// src/core.rs

//! Core facade: context construction and the select/install pipeline.
//!
//! `Query → select → Selection → [expand] → install → InstallResult +
//! config update`. One core owns one install directory and one config
//! file; concurrent read-only selects are safe, concurrent installs into
//! the same directory are not supported.

use crate::config::Config;
use crate::error::Result;
use crate::install::{self, InstallResult, Options};
use crate::resolver;
use crate::select::{self, Query, Selection};
use crate::source::HistorySource;
use std::path::PathBuf;

/// Filesystem locations a core operates on
#[derive(Debug, Clone)]
pub struct Paths {
    /// Directory definition files are installed into
    pub install_dir: PathBuf,
    /// Persisted manifest location
    pub config_file: PathBuf,
}

impl Paths {
    /// Conventional layout under a project root: `typings/` for files,
    /// `defman.json` alongside it
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Paths {
            install_dir: root.join("typings"),
            config_file: root.join("defman.json"),
        }
    }
}

/// Paths plus the loaded config
#[derive(Debug)]
pub struct Context {
    pub paths: Paths,
    pub config: Config,
}

impl Context {
    /// Build a context, loading the config from disk (missing file means
    /// an empty manifest)
    pub fn new(paths: Paths) -> Result<Self> {
        let config = Config::load(&paths.config_file)?;
        Ok(Context { paths, config })
    }
}

/// The resolution/install pipeline over one history source
pub struct Core<S: HistorySource> {
    source: S,
    pub context: Context,
}

impl<S: HistorySource> Core<S> {
    pub fn new(source: S, context: Context) -> Self {
        Core { source, context }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve a query into a selection, expanding dependencies when the
    /// options ask for it
    pub fn select(&self, query: &Query, options: &Options) -> Result<Selection> {
        let selection = select::select(&self.source, query)?;
        if options.resolve_dependencies {
            return resolver::expand(&self.source, &selection);
        }
        Ok(selection)
    }

    /// Materialize a selection under the install directory, updating the
    /// config per the options
    pub fn install(&mut self, selection: &Selection, options: &Options) -> Result<InstallResult> {
        tracing::debug!(entries = selection.len(), "installing selection");
        install::install(
            &self.context.paths.install_dir,
            selection,
            options,
            &mut self.context.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use tempfile::TempDir;

    fn fixture() -> MemorySource {
        let mut source = MemorySource::new();
        source
            .add(
                "jquery",
                "jquery/jquery.d.ts",
                Some("1.9.0"),
                "aaaa1111",
                None,
                "/// <reference path=\"../sizzle/sizzle.d.ts\" />\ninterface JQuery {}\n",
            )
            .add("sizzle", "sizzle/sizzle.d.ts", None, "bbbb2222", None, "interface Sizzle {}\n");
        source
    }

    #[test]
    fn test_select_install_pipeline() {
        let dir = TempDir::new().unwrap();
        let context = Context::new(Paths::under(dir.path())).unwrap();
        let mut core = Core::new(fixture(), context);

        let options = Options {
            save_to_config: true,
            resolve_dependencies: true,
            ..Options::new()
        };
        let selection = core.select(&Query::new("jquery"), &options).unwrap();
        assert_eq!(selection.names(), vec!["jquery", "sizzle"]);

        let result = core.install(&selection, &options).unwrap();
        assert_eq!(result.written.len(), 2);
        assert!(dir.path().join("typings/sizzle/sizzle.d.ts").exists());

        let report = core
            .context
            .config
            .verify_against_dir(&core.context.paths.install_dir)
            .unwrap();
        assert!(report.is_synced());
    }
}
