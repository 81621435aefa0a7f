// src/matcher/commit.rs

//! Commit identity matching: full hash, hex prefix, or the symbolic ref
//! `head` (the newest commit in a history).

use crate::error::{Error, Result};
use crate::source::DefVersion;

/// Minimum accepted hex prefix length
const MIN_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMatcher {
    /// Newest commit in the history
    Head,
    /// Commits whose hash starts with this lowercase hex prefix
    Prefix(String),
}

impl CommitMatcher {
    /// Parse a commit selector, validating eagerly.
    ///
    /// Accepts `head` (case-insensitive) or a hex prefix of at least
    /// [`MIN_PREFIX_LEN`] characters.
    pub fn new(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        if trimmed.eq_ignore_ascii_case("head") {
            return Ok(CommitMatcher::Head);
        }
        if trimmed.len() < MIN_PREFIX_LEN {
            return Err(Error::validation(
                trimmed,
                format!("commit prefix shorter than {} characters", MIN_PREFIX_LEN),
            ));
        }
        if trimmed.len() > 40 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::validation(trimmed, "not a commit hash or hex prefix"));
        }
        Ok(CommitMatcher::Prefix(trimmed.to_ascii_lowercase()))
    }

    pub fn filter(&self, list: &[DefVersion]) -> Vec<DefVersion> {
        match self {
            CommitMatcher::Head => super::latest(list).into_iter().collect(),
            CommitMatcher::Prefix(prefix) => list
                .iter()
                .filter(|v| v.commit.hash.to_ascii_lowercase().starts_with(prefix))
                .cloned()
                .collect(),
        }
    }

    pub fn best(&self, list: &[DefVersion]) -> Option<DefVersion> {
        super::latest(&self.filter(list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::tests::rev;

    #[test]
    fn test_prefix_match() {
        let m = CommitMatcher::new("ABCD").unwrap();
        let list = vec![rev("x", "abcd1234", 0), rev("x", "ffff0000", 1)];
        let kept = m.filter(&list);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].commit.hash, "abcd1234");
    }

    #[test]
    fn test_head_takes_newest() {
        let m = CommitMatcher::new("head").unwrap();
        let list = vec![rev("x", "abcd1234", 0), rev("x", "ffff0000", 1)];
        assert_eq!(m.best(&list).unwrap().commit.hash, "ffff0000");
    }

    #[test]
    fn test_short_or_nonhex_rejected() {
        assert!(matches!(CommitMatcher::new("ab"), Err(Error::Validation { .. })));
        assert!(matches!(CommitMatcher::new("xyzw"), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_ambiguous_prefix_keeps_all_candidates() {
        let m = CommitMatcher::new("abcd").unwrap();
        let list = vec![rev("x", "abcd1111", 0), rev("x", "abcd2222", 1)];
        assert_eq!(m.filter(&list).len(), 2);
        assert_eq!(m.best(&list).unwrap().commit.hash, "abcd2222");
    }
}
