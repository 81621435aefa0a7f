// src/select/mod.rs

//! Query and selection: resolving a name pattern plus matchers into a
//! concrete set of definition versions.
//!
//! A [`Query`] bundles a name pattern with optional matchers and
//! result-shaping flags. The engine matches the pattern against the
//! known artifact names, applies every supplied matcher's filter as a
//! conjunction, and picks a representative version per name with
//! documented ranking precedence: commit > date > version.

use crate::error::{Error, Result};
use crate::matcher::{CommitMatcher, DateMatcher, Matcher, VersionMatcher};
use crate::source::{parse_info, DefInfo, DefVersion, HistorySource};
use glob::Pattern;
use std::collections::BTreeMap;

/// A selection query: name pattern, constraints, result-shaping flags
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub pattern: String,
    pub version_matcher: Option<VersionMatcher>,
    pub commit_matcher: Option<CommitMatcher>,
    pub date_matcher: Option<DateMatcher>,
    /// Attach parsed header metadata to each selected entry
    pub parse_info: bool,
    /// Attach the full version history to each selected entry
    pub load_history: bool,
}

impl Query {
    pub fn new(pattern: impl Into<String>) -> Self {
        Query {
            pattern: pattern.into(),
            ..Query::default()
        }
    }

    pub fn with_version(mut self, matcher: VersionMatcher) -> Self {
        self.version_matcher = Some(matcher);
        self
    }

    pub fn with_commit(mut self, matcher: CommitMatcher) -> Self {
        self.commit_matcher = Some(matcher);
        self
    }

    pub fn with_date(mut self, matcher: DateMatcher) -> Self {
        self.date_matcher = Some(matcher);
        self
    }

    pub fn parse_info(mut self) -> Self {
        self.parse_info = true;
        self
    }

    pub fn load_history(mut self) -> Self {
        self.load_history = true;
        self
    }

    /// Supplied matchers in ranking precedence order: commit > date > version
    fn matchers(&self) -> Vec<Matcher> {
        let mut out = Vec::new();
        if let Some(m) = &self.commit_matcher {
            out.push(Matcher::Commit(m.clone()));
        }
        if let Some(m) = &self.date_matcher {
            out.push(Matcher::Date(m.clone()));
        }
        if let Some(m) = &self.version_matcher {
            out.push(Matcher::Version(m.clone()));
        }
        out
    }
}

/// How an entry got into a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOrigin {
    /// Matched the query pattern directly
    Direct,
    /// Pulled in by dependency resolution
    Dependency,
}

/// One resolved entry of a selection
#[derive(Debug, Clone)]
pub struct Selected {
    pub version: DefVersion,
    pub origin: MatchOrigin,
    /// Parsed header metadata, when the query asked for it
    pub info: Option<DefInfo>,
    /// Full version history, when the query asked for it
    pub history: Option<Vec<DefVersion>>,
}

/// The resolved mapping from artifact name to chosen version
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: BTreeMap<String, Selected>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Selected> {
        self.entries.get(name)
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Selected)> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn insert(&mut self, selected: Selected) {
        self.entries
            .insert(selected.version.name.clone(), selected);
    }
}

/// Resolve a query against a history source.
///
/// Fails with [`Error::NotFound`] when the pattern matches zero known
/// names. A matched name whose history survives no matcher is omitted
/// from the selection; callers needing a non-empty result check
/// [`Selection::is_empty`] themselves.
pub fn select<S: HistorySource>(source: &S, query: &Query) -> Result<Selection> {
    let names = source.list_names()?;
    let matched = match_pattern(&query.pattern, &names)?;
    tracing::debug!(pattern = %query.pattern, matched = matched.len(), "selecting definitions");

    let matchers = query.matchers();
    let mut selection = Selection::new();

    for name in matched {
        let history = source.history_of(&name)?;

        let mut candidates = history.clone();
        for matcher in &matchers {
            candidates = matcher.filter(&candidates);
        }
        // Ranking is delegated to the highest-priority matcher present
        let best = match matchers.first() {
            Some(matcher) => matcher.best(&candidates),
            None => crate::matcher::latest(&candidates),
        };
        let Some(version) = best else {
            tracing::debug!(name = %name, "no candidate survived matcher filter");
            continue;
        };

        let info = query.parse_info.then(|| parse_info(&version.content));
        let full_history = query.load_history.then(|| history.clone());
        selection.insert(Selected {
            version,
            origin: MatchOrigin::Direct,
            info,
            history: full_history,
        });
    }

    Ok(selection)
}

/// Match a pattern against known names: glob when it carries
/// metacharacters, otherwise exact with substring fallback
fn match_pattern(pattern: &str, names: &[String]) -> Result<Vec<String>> {
    let matched: Vec<String> = if pattern.contains(['*', '?', '[']) {
        let compiled = Pattern::new(pattern)
            .map_err(|e| Error::validation(pattern, e.to_string()))?;
        names
            .iter()
            .filter(|n| compiled.matches(n))
            .cloned()
            .collect()
    } else {
        let exact: Vec<String> = names.iter().filter(|n| *n == pattern).cloned().collect();
        if !exact.is_empty() {
            exact
        } else {
            names
                .iter()
                .filter(|n| n.contains(pattern))
                .cloned()
                .collect()
        }
    };

    if matched.is_empty() {
        return Err(Error::NotFound(pattern.to_string()));
    }
    Ok(matched)
}
