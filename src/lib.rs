// src/lib.rs

//! Defman Definition Manager
//!
//! Library for resolving, selecting, and installing versioned definition
//! files (named artifacts with a commit-tagged version history) into a
//! local project directory.
//!
//! # Architecture
//!
//! - Matchers: stateless filter + rank strategies over version histories
//!   (version range, commit hash, date selector)
//! - Selection engine: resolves a name pattern plus matchers into a
//!   concrete set of artifact versions
//! - Resolver: expands a selection through declared references to a
//!   fixed point
//! - Installer: materializes a selection onto disk, tracking written and
//!   skipped files
//! - Config: persisted manifest of installed paths, reconciled against
//!   the install directory

pub mod config;
mod core;
mod error;
pub mod install;
pub mod matcher;
pub mod resolver;
pub mod select;
pub mod source;

pub use config::{Config, InstalledDef, ReconcileReport};
pub use crate::core::{Context, Core, Paths};
pub use error::{Error, Result};
pub use install::{InstallResult, Options};
pub use matcher::{CommitMatcher, DateComp, DateMatcher, DateOp, Matcher, VersionMatcher};
pub use select::{MatchOrigin, Query, Selected, Selection};
pub use source::{CommitMeta, DefInfo, DefRef, DefVersion, HistorySource, MemorySource};
