//! Post-decode normalization: filter detection, regex auto-disable, and
//! SQL literal quoting of search terms.

use super::QueryRequest;
use crate::constants::REGEX_METACHARS;

impl QueryRequest {
    /// Normalize a freshly decoded request in place.
    ///
    /// - computes [`has_filter`](Self::has_filter)
    /// - turns regex matching off for terms with no regex metacharacter
    /// - quotes and escapes every non-empty search term with [`escape_literal`]
    ///
    /// Only the first call has any effect, so terms are never escaped twice.
    ///
    /// ```
    /// let mut req = grid_query::decode([
    ///     ("draw", "1"),
    ///     ("search[value]", "hello"),
    ///     ("search[regex]", "true"),
    /// ])
    /// .unwrap();
    ///
    /// req.normalize();
    /// req.normalize();
    /// assert_eq!(req.search(), "'hello'");
    /// assert!(!req.use_regex);
    /// ```
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }
        self.normalized = true;

        self.has_filter =
            !self.search.is_empty() || self.columns.iter().any(|c| !c.search.is_empty());

        normalize_term(&mut self.search, &mut self.use_regex);
        for column in &mut self.columns {
            normalize_term(&mut column.search, &mut column.use_regex);
        }
    }
}

fn normalize_term(term: &mut String, use_regex: &mut bool) {
    if term.is_empty() {
        return;
    }
    if *use_regex && !has_regex_metachar(term) {
        *use_regex = false;
    }
    *term = escape_literal(term);
}

/// Whether `term` contains any of `^ $ . * + | [ ] ?`.
///
/// ```
/// use grid_query::has_regex_metachar;
///
/// assert!(has_regex_metachar("h.llo"));
/// assert!(!has_regex_metachar("hello"));
/// ```
#[inline]
#[must_use]
pub fn has_regex_metachar(term: &str) -> bool {
    term.contains(REGEX_METACHARS)
}

/// Quote `raw` as a MySQL string literal.
///
/// Backslashes become `\\` and single quotes become `\'`, then the result is
/// wrapped in single quotes.
///
/// ```
/// use grid_query::escape_literal;
///
/// assert_eq!(escape_literal("bob"), "'bob'");
/// assert_eq!(escape_literal(r"it's a \ path"), r"'it\'s a \\ path'");
/// ```
#[must_use]
pub fn escape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
