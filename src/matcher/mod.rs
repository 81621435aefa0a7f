// src/matcher/mod.rs

//! Matchers: stateless filter + rank strategies over version histories.
//!
//! Every matcher exposes `filter` (keep the subsequence of a history that
//! satisfies the constraint) and `best` (pick a single representative,
//! defaulting to the chronologically latest survivor). Variants:
//!
//! - [`VersionMatcher`] — semantic version range, or `latest`/`all`
//! - [`CommitMatcher`] — exact hash / hex prefix / symbolic `head`
//! - [`DateMatcher`] — conjunction of date comparators parsed from a
//!   selector string
//!
//! When a query carries several matchers their filters apply as a
//! conjunction; ranking is delegated to a single matcher with precedence
//! commit > date > version.

pub mod commit;
pub mod date;
pub mod version;

pub use commit::CommitMatcher;
pub use date::{DateComp, DateMatcher, DateOp};
pub use version::VersionMatcher;

use crate::source::DefVersion;

/// A filter + rank strategy over a definition's version history
#[derive(Debug, Clone)]
pub enum Matcher {
    Version(VersionMatcher),
    Commit(CommitMatcher),
    Date(DateMatcher),
}

impl Matcher {
    /// Keep the subsequence of `list` satisfying this matcher. Idempotent.
    pub fn filter(&self, list: &[DefVersion]) -> Vec<DefVersion> {
        match self {
            Matcher::Version(m) => m.filter(list),
            Matcher::Commit(m) => m.filter(list),
            Matcher::Date(m) => m.filter(list),
        }
    }

    /// Pick the representative version from `list`, or None when nothing
    /// survives the filter
    pub fn best(&self, list: &[DefVersion]) -> Option<DefVersion> {
        match self {
            Matcher::Version(m) => m.best(list),
            Matcher::Commit(m) => m.best(list),
            Matcher::Date(m) => m.best(list),
        }
    }
}

/// Chronologically latest entry: highest commit order wins
pub(crate) fn latest(list: &[DefVersion]) -> Option<DefVersion> {
    list.iter().max_by_key(|v| v.commit.order).cloned()
}
