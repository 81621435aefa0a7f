// src/source/mod.rs

//! History source: the data model for definition versions and the trait
//! through which histories are supplied.
//!
//! A definition is a named file with a commit-tagged version history. The
//! core never fetches anything itself; a [`HistorySource`] implementation
//! (git-backed index, test fixture, ...) yields an ordered history per
//! name and the engine reads from it.

pub mod parse;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use parse::{parse_info, parse_references, DefInfo, DefRef};

/// Commit metadata attached to one historical revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMeta {
    /// Full commit hash (lowercase hex)
    pub hash: String,
    /// Commit change date; absent for synthetic or imported history entries
    pub change_date: Option<DateTime<Utc>>,
    pub author: String,
    /// Position in the artifact's history, oldest first
    pub order: u64,
}

/// One immutable historical revision of a named definition artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefVersion {
    /// Artifact name, e.g. "jquery"
    pub name: String,
    /// Install path relative to the install directory, e.g. "jquery/jquery.d.ts"
    pub path: String,
    /// Semantic version tag when the artifact carries one
    pub version: Option<semver::Version>,
    pub commit: CommitMeta,
    pub content: String,
}

impl DefVersion {
    /// Short identity token: name plus abbreviated commit hash
    pub fn token(&self) -> String {
        format!("{}@{}", self.name, self.hash_prefix(7))
    }

    fn hash_prefix(&self, len: usize) -> String {
        self.commit.hash.chars().take(len).collect()
    }

    /// Dependency references declared in this revision's content
    pub fn refs(&self) -> Vec<DefRef> {
        parse_references(&self.content)
    }
}

/// Supplies ordered version histories per artifact name.
///
/// Histories are ordered oldest to newest; `commit.order` is strictly
/// increasing within one history.
pub trait HistorySource {
    fn list_names(&self) -> Result<Vec<String>>;
    fn history_of(&self, name: &str) -> Result<Vec<DefVersion>>;
}

/// In-memory history index, used by embedders and the test suite
#[derive(Debug, Default)]
pub struct MemorySource {
    histories: BTreeMap<String, Vec<DefVersion>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a revision to an artifact's history. Revisions must be added
    /// oldest first; `commit.order` is assigned from the current length.
    pub fn add(
        &mut self,
        name: &str,
        path: &str,
        version: Option<&str>,
        hash: &str,
        change_date: Option<DateTime<Utc>>,
        content: &str,
    ) -> &mut Self {
        let history = self.histories.entry(name.to_string()).or_default();
        let order = history.len() as u64;
        history.push(DefVersion {
            name: name.to_string(),
            path: path.to_string(),
            version: version.and_then(|v| semver::Version::parse(v).ok()),
            commit: CommitMeta {
                hash: hash.to_string(),
                change_date,
                author: String::new(),
                order,
            },
            content: content.to_string(),
        });
        self
    }
}

impl HistorySource for MemorySource {
    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.histories.keys().cloned().collect())
    }

    fn history_of(&self, name: &str) -> Result<Vec<DefVersion>> {
        self.histories
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_memory_source_orders_history() {
        let mut source = MemorySource::new();
        source
            .add("jquery", "jquery/jquery.d.ts", Some("1.8.0"), "aaaa1111", Some(date(2013, 5, 1)), "// a")
            .add("jquery", "jquery/jquery.d.ts", Some("1.9.0"), "bbbb2222", Some(date(2014, 2, 1)), "// b");

        let history = source.history_of("jquery").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].commit.order, 0);
        assert_eq!(history[1].commit.order, 1);
        assert_eq!(history[1].version, Some(semver::Version::new(1, 9, 0)));
    }

    #[test]
    fn test_history_of_unknown_name() {
        let source = MemorySource::new();
        assert!(matches!(
            source.history_of("nope"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_token_abbreviates_hash() {
        let mut source = MemorySource::new();
        source.add("x", "x/x.d.ts", None, "0123456789abcdef", None, "");
        let v = &source.history_of("x").unwrap()[0];
        assert_eq!(v.token(), "x@0123456");
    }
}
