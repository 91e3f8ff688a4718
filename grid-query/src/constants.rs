//! Centralized constants for the grid-query crate.
//!
//! Security bounds are compile-time constants. Form parsing limits can be
//! tuned through environment variables:
//!
//! | Variable                     | Default | Description                    |
//! |------------------------------|---------|--------------------------------|
//! | `GRID_QUERY_MAX_FORM_FIELDS` | 1000    | Distinct keys kept per form    |
//!
//! ## Example
//!
//! ```bash
//! # Allow very wide grids (each column sends six keys)
//! GRID_QUERY_MAX_FORM_FIELDS=2500
//! ```

use std::sync::OnceLock;

// ============================================================================
// DECODER LIMITS
// ============================================================================

/// Largest accepted `columns[n]` / `order[n]` index.
///
/// A single request can therefore never allocate more than
/// `MAX_ENTRY_INDEX + 1` columns or sort entries. Not configurable.
pub const MAX_ENTRY_INDEX: usize = 200;

/// Characters whose presence makes a search term a plausible regular expression.
pub const REGEX_METACHARS: &[char] = &['^', '$', '.', '*', '+', '|', '[', ']', '?'];

/// Literal value that switches a boolean protocol flag off.
pub const FLAG_FALSE: &str = "false";

// ============================================================================
// FORM LIMITS
// ============================================================================

/// Maximum decoded length of a single form key or value (64KB).
pub const MAX_URL_DECODED_LEN: usize = 65536;

/// Default maximum number of distinct form keys.
const DEFAULT_MAX_FORM_FIELDS: usize = 1000;

/// Cached max form fields from environment.
static MAX_FORM_FIELDS_CACHE: OnceLock<usize> = OnceLock::new();

/// Returns the maximum number of distinct keys kept when parsing a form.
///
/// Reads from `GRID_QUERY_MAX_FORM_FIELDS` on first call and falls back to
/// 1000 if not set, zero or invalid. The value is cached for the lifetime of
/// the process.
#[inline]
pub fn max_form_fields() -> usize {
    *MAX_FORM_FIELDS_CACHE.get_or_init(|| {
        parse_limit(std::env::var("GRID_QUERY_MAX_FORM_FIELDS").ok().as_deref())
            .unwrap_or(DEFAULT_MAX_FORM_FIELDS)
    })
}

fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse().ok()).filter(|&n| n > 0)
}
