// src/matcher/date.rs

//! Date selector matching over commit change dates.
//!
//! A selector is a sequence of terms `<operator><date>`, operator drawn
//! from `{<=, <, >=, >, ==}`, date written as digits separated by any of
//! `: ; _ space -`. Two bounds act as a range:
//!
//! ```text
//! ">= 2014-01-01 < 2014-06-01"
//! ```
//!
//! Terms combine by logical AND. A version without a commit change date
//! never satisfies the matcher.

use crate::error::{Error, Result};
use crate::source::DefVersion;
use chrono::{DateTime, NaiveDate, Utc};

/// Date comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

type Comparator = fn(&DateTime<Utc>, &DateTime<Utc>) -> bool;

/// Operator-keyed comparator table: (token, op, candidate-vs-bound)
const COMPARATORS: &[(&str, DateOp, Comparator)] = &[
    ("<=", DateOp::Le, |c, b| c <= b),
    (">=", DateOp::Ge, |c, b| c >= b),
    ("==", DateOp::Eq, |c, b| c == b),
    ("<", DateOp::Lt, |c, b| c < b),
    (">", DateOp::Gt, |c, b| c > b),
];

/// One parsed selector term: an operator, its bound date, and the pure
/// comparator implementing the operator
#[derive(Debug, Clone, Copy)]
pub struct DateComp {
    pub op: DateOp,
    pub date: DateTime<Utc>,
    comparator: Comparator,
}

impl DateComp {
    pub fn satisfies(&self, candidate: &DateTime<Utc>) -> bool {
        (self.comparator)(candidate, &self.date)
    }
}

/// Conjunctive date matcher built from a selector string
#[derive(Debug, Clone, Default)]
pub struct DateMatcher {
    comps: Vec<DateComp>,
}

impl DateMatcher {
    /// Parse a selector into a matcher.
    ///
    /// Fails with [`Error::Validation`] naming the offending term when an
    /// operator is unknown or a date token does not parse.
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self {
            comps: extract_selector(selector)?,
        })
    }

    pub fn comps(&self) -> &[DateComp] {
        &self.comps
    }

    /// Keep versions whose commit change date satisfies every term
    pub fn filter(&self, list: &[DefVersion]) -> Vec<DefVersion> {
        list.iter()
            .filter(|v| match v.commit.change_date {
                Some(ref date) => self.comps.iter().all(|c| c.satisfies(date)),
                None => false,
            })
            .cloned()
            .collect()
    }

    pub fn best(&self, list: &[DefVersion]) -> Option<DefVersion> {
        self.latest(list)
    }

    /// Chronologically latest surviving version
    pub fn latest(&self, list: &[DefVersion]) -> Option<DefVersion> {
        super::latest(&self.filter(list))
    }
}

const OPERATOR_CHARS: &[char] = &['<', '>', '=', '!', '~'];

fn is_date_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ':' | ';' | '_' | ' ' | '-')
}

/// Tokenize a selector left to right into non-overlapping `(operator, date)`
/// terms, validating each eagerly
fn extract_selector(selector: &str) -> Result<Vec<DateComp>> {
    let chars: Vec<char> = selector.chars().collect();
    let mut comps = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !OPERATOR_CHARS.contains(&chars[i]) {
            i += 1;
            continue;
        }

        let op_start = i;
        while i < chars.len() && OPERATOR_CHARS.contains(&chars[i]) {
            i += 1;
        }
        let op: String = chars[op_start..i].iter().collect();

        while i < chars.len() && chars[i] == ' ' {
            i += 1;
        }

        let date_start = i;
        while i < chars.len() && is_date_char(chars[i]) {
            i += 1;
        }
        // Date tokens start and end on a digit
        let mut date_end = i;
        while date_end > date_start && !chars[date_end - 1].is_ascii_digit() {
            date_end -= 1;
        }
        i = date_end;
        let raw_date: String = chars[date_start..date_end].iter().collect();
        let term: String = chars[op_start..date_end].iter().collect();

        let entry = COMPARATORS.iter().find(|(token, _, _)| *token == op);
        let Some((_, date_op, comparator)) = entry else {
            return Err(Error::validation(term, "not a valid date comparator"));
        };

        if raw_date.is_empty() {
            return Err(Error::validation(term, "expected a date after operator"));
        }
        let Some(date) = parse_date(&raw_date) else {
            return Err(Error::validation(term, "not a valid date"));
        };

        comps.push(DateComp {
            op: *date_op,
            date,
            comparator: *comparator,
        });
    }

    Ok(comps)
}

/// Parse a date token after normalizing separators to spaces.
///
/// Accepted field shapes: year month day, optionally followed by hour,
/// minute, second.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let normalized: String = raw
        .chars()
        .map(|c| if is_date_char(c) && !c.is_ascii_digit() { ' ' } else { c })
        .collect();
    let fields: Vec<u32> = normalized
        .split_whitespace()
        .map(|f| f.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    if fields.len() < 3 || fields.len() > 6 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(fields[0] as i32, fields[1], fields[2])?;
    let h = fields.get(3).copied().unwrap_or(0);
    let m = fields.get(4).copied().unwrap_or(0);
    let s = fields.get(5).copied().unwrap_or(0);
    let naive = date.and_hms_opt(h, m, s)?;
    Some(naive.and_utc())
}
