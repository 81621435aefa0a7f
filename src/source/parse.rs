// src/source/parse.rs

//! Content parsing: header metadata and declared references.
//!
//! Definition files carry a comment header naming the project and its
//! authors, and declare dependencies on other definitions through
//! triple-slash reference lines:
//!
//! ```text
//! // Type definitions for jQuery 1.10.x
//! // Project: http://jquery.com/
//! // Definitions by: Boris Yankov <https://github.com/borisyankov/>
//!
//! /// <reference path="../sizzle/sizzle.d.ts" />
//! ```

use serde::{Deserialize, Serialize};

/// A dependency reference declared by a definition's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefRef {
    /// Referenced artifact name
    pub name: String,
    /// Optional version constraint (semver range), from a `version` attribute
    pub constraint: Option<String>,
}

/// Parsed header metadata of one definition revision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefInfo {
    /// Human name from the "Type definitions for ..." line
    pub label: Option<String>,
    /// Project URL
    pub project: Option<String>,
    /// Author credits from the "Definitions by:" line
    pub authors: Vec<String>,
}

impl DefInfo {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.project.is_none() && self.authors.is_empty()
    }
}

/// Extract declared references from definition content.
///
/// Scans for `<reference path="..." />` lines; the referenced artifact name
/// is the parent directory of the referenced file. References pointing at a
/// bare filename (no directory) are ignored, as are malformed lines.
pub fn parse_references(content: &str) -> Vec<DefRef> {
    let mut refs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with("///") || !line.contains("<reference") {
            continue;
        }
        let Some(path) = attribute(line, "path") else {
            continue;
        };
        let Some(name) = ref_name(&path) else {
            continue;
        };
        let constraint = attribute(line, "version");
        if !refs.iter().any(|r: &DefRef| r.name == name) {
            refs.push(DefRef { name, constraint });
        }
    }
    refs
}

/// Parse the comment header of a definition into [`DefInfo`].
///
/// Scanning stops at the first non-comment, non-blank line; headers are
/// conventionally the first thing in the file.
pub fn parse_info(content: &str) -> DefInfo {
    let mut info = DefInfo::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(comment) = line.strip_prefix("//") else {
            break;
        };
        let comment = comment.trim_start_matches('/').trim();
        if let Some(rest) = comment.strip_prefix("Type definitions for ") {
            info.label = Some(rest.trim().to_string());
        } else if let Some(rest) = comment.strip_prefix("Project:") {
            info.project = Some(rest.trim().to_string());
        } else if let Some(rest) = comment.strip_prefix("Definitions by:") {
            info.authors = rest
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
        }
    }
    info
}

/// Pull a quoted attribute value out of a reference line
fn attribute(line: &str, name: &str) -> Option<String> {
    let key = format!("{}=\"", name);
    let start = line.find(&key)? + key.len();
    let end = line[start..].find('"')? + start;
    Some(line[start..end].to_string())
}

/// Artifact name for a referenced path: the parent directory component
fn ref_name(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = path
        .split('/')
        .filter(|p| !p.is_empty() && *p != "." && *p != "..")
        .collect();
    // Last component is the filename
    parts.pop()?;
    parts.pop().map(|p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JQUERY_HEADER: &str = "\
// Type definitions for jQuery 1.10.x
// Project: http://jquery.com/
// Definitions by: Boris Yankov <https://github.com/borisyankov/>, John Reilly <https://github.com/johnnyreilly>

/// <reference path=\"../sizzle/sizzle.d.ts\" />

interface JQuery {}
";

    #[test]
    fn test_parse_info_header() {
        let info = parse_info(JQUERY_HEADER);
        assert_eq!(info.label.as_deref(), Some("jQuery 1.10.x"));
        assert_eq!(info.project.as_deref(), Some("http://jquery.com/"));
        assert_eq!(info.authors.len(), 2);
        assert!(info.authors[0].starts_with("Boris Yankov"));
    }

    #[test]
    fn test_parse_info_stops_at_code() {
        let info = parse_info("interface X {}\n// Project: http://nope/");
        assert!(info.is_empty());
    }

    #[test]
    fn test_parse_references() {
        let refs = parse_references(JQUERY_HEADER);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "sizzle");
        assert_eq!(refs[0].constraint, None);
    }

    #[test]
    fn test_parse_references_with_constraint() {
        let refs = parse_references(
            "/// <reference path=\"../angular/angular.d.ts\" version=\">=1.2\" />",
        );
        assert_eq!(refs[0].name, "angular");
        assert_eq!(refs[0].constraint.as_deref(), Some(">=1.2"));
    }

    #[test]
    fn test_parse_references_dedupes_and_skips_bare() {
        let refs = parse_references(
            "/// <reference path=\"../a/a.d.ts\" />\n\
             /// <reference path=\"../a/a.d.ts\" />\n\
             /// <reference path=\"helper.d.ts\" />",
        );
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "a");
    }
}
