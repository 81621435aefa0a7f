// src/matcher/version.rs

//! Semantic version matching over tagged revisions.
//!
//! Patterns: `latest` (default), `all`, or a semver range understood by
//! [`semver::VersionReq`] such as `">=1.8, <2.0"` or `"1.x"`. Range
//! filtering only keeps revisions that carry a version tag; `latest` and
//! `all` pass the whole history through and differ in ranking.

use crate::error::{Error, Result};
use crate::source::DefVersion;
use semver::VersionReq;

#[derive(Debug, Clone)]
pub enum VersionMatcher {
    /// Prefer the highest tagged version, newest commit as tiebreaker
    Latest,
    /// No version constraint
    All,
    /// Semver range over tagged versions
    Range(VersionReq),
}

impl Default for VersionMatcher {
    fn default() -> Self {
        VersionMatcher::Latest
    }
}

impl VersionMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "latest" => Ok(VersionMatcher::Latest),
            "all" | "*" => Ok(VersionMatcher::All),
            _ => {
                let req = VersionReq::parse(trimmed)
                    .map_err(|e| Error::validation(trimmed, e.to_string()))?;
                Ok(VersionMatcher::Range(req))
            }
        }
    }

    pub fn filter(&self, list: &[DefVersion]) -> Vec<DefVersion> {
        match self {
            VersionMatcher::Latest | VersionMatcher::All => list.to_vec(),
            VersionMatcher::Range(req) => list
                .iter()
                .filter(|v| v.version.as_ref().is_some_and(|ver| req.matches(ver)))
                .cloned()
                .collect(),
        }
    }

    pub fn best(&self, list: &[DefVersion]) -> Option<DefVersion> {
        let survivors = self.filter(list);
        match self {
            VersionMatcher::Latest => {
                // Highest version tag wins when any revision carries one
                let tagged = survivors
                    .iter()
                    .filter(|v| v.version.is_some())
                    .max_by(|a, b| {
                        a.version
                            .cmp(&b.version)
                            .then(a.commit.order.cmp(&b.commit.order))
                    });
                match tagged {
                    Some(v) => Some(v.clone()),
                    None => super::latest(&survivors),
                }
            }
            VersionMatcher::All | VersionMatcher::Range(_) => super::latest(&survivors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CommitMeta;

    fn tagged(hash: &str, order: u64, version: Option<&str>) -> DefVersion {
        DefVersion {
            name: "x".to_string(),
            path: "x/x.d.ts".to_string(),
            version: version.map(|v| semver::Version::parse(v).unwrap()),
            commit: CommitMeta {
                hash: hash.to_string(),
                change_date: None,
                author: String::new(),
                order,
            },
            content: String::new(),
        }
    }

    #[test]
    fn test_range_filters_by_tag() {
        let m = VersionMatcher::new(">=1.8, <2.0").unwrap();
        let list = vec![
            tagged("aaaa", 0, Some("1.7.0")),
            tagged("bbbb", 1, Some("1.9.0")),
            tagged("cccc", 2, Some("2.1.0")),
            tagged("dddd", 3, None),
        ];
        let kept = m.filter(&list);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].commit.hash, "bbbb");
    }

    #[test]
    fn test_latest_prefers_highest_tag() {
        let m = VersionMatcher::Latest;
        let list = vec![
            tagged("aaaa", 0, Some("2.0.0")),
            tagged("bbbb", 1, Some("1.9.0")),
        ];
        assert_eq!(m.best(&list).unwrap().commit.hash, "aaaa");
    }

    #[test]
    fn test_latest_falls_back_to_newest_commit() {
        let m = VersionMatcher::Latest;
        let list = vec![tagged("aaaa", 0, None), tagged("bbbb", 1, None)];
        assert_eq!(m.best(&list).unwrap().commit.hash, "bbbb");
    }

    #[test]
    fn test_invalid_range_is_validation_error() {
        assert!(matches!(
            VersionMatcher::new(">= not.a.version"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_all_keeps_everything() {
        let m = VersionMatcher::new("all").unwrap();
        let list = vec![tagged("aaaa", 0, None), tagged("bbbb", 1, Some("1.0.0"))];
        assert_eq!(m.filter(&list).len(), 2);
    }
}
