// src/resolver/mod.rs

//! Dependency resolution: fixed-point expansion of a selection through
//! declared references.
//!
//! Each definition revision may reference other definitions by name,
//! optionally with a version constraint. Expansion walks those references
//! breadth-wise with a visited set keyed by artifact name: a name already
//! selected (directly or by an earlier pass) is never re-resolved, so
//! mutual references terminate at the fixed point without cycle errors.

use crate::error::Result;
use crate::matcher::VersionMatcher;
use crate::select::{MatchOrigin, Selected, Selection};
use crate::source::{DefRef, HistorySource};
use std::collections::BTreeSet;

/// Expand a selection to its dependency fixed point.
///
/// Returns a new, larger selection; the input's entries carry over
/// unchanged. Referenced names unknown to the source are skipped.
pub fn expand<S: HistorySource>(source: &S, selection: &Selection) -> Result<Selection> {
    let mut expanded = selection.clone();
    let mut visited: BTreeSet<String> = expanded.names().into_iter().collect();

    // Passes repeat until one adds nothing; the visited set only grows,
    // so convergence is guaranteed
    loop {
        let mut pending: Vec<DefRef> = Vec::new();
        for (_, entry) in expanded.iter() {
            for reference in entry.version.refs() {
                if !visited.contains(&reference.name) {
                    pending.push(reference);
                }
            }
        }
        if pending.is_empty() {
            break;
        }

        for reference in pending {
            if !visited.insert(reference.name.clone()) {
                continue;
            }
            let Ok(history) = source.history_of(&reference.name) else {
                tracing::debug!(name = %reference.name, "referenced definition not in index");
                continue;
            };

            let matcher = match &reference.constraint {
                Some(raw) => match VersionMatcher::new(raw) {
                    Ok(m) => m,
                    Err(_) => {
                        // A bad constraint in third-party content falls back
                        // to unconstrained latest rather than failing resolution
                        tracing::debug!(name = %reference.name, constraint = %raw, "unparsable reference constraint");
                        VersionMatcher::Latest
                    }
                },
                None => VersionMatcher::Latest,
            };

            if let Some(version) = matcher.best(&history) {
                tracing::debug!(dependency = %version.token(), "resolved reference");
                expanded.insert(Selected {
                    version,
                    origin: MatchOrigin::Dependency,
                    info: None,
                    history: None,
                });
            }
        }
    }

    Ok(expanded)
}
