//! Key grammar for grid protocol form fields.
//!
//! ```text
//! draw | start | length
//! search[value] | search[regex]
//! order[<n>][column|dir|name]
//! columns[<n>][data|name|searchable|orderable]
//! columns[<n>][search][value|regex]
//! ```
//!
//! Splitting on `[` leaves every bracketed segment with its trailing `]`:
//! `columns[2][search][regex]` becomes `columns`, `2]`, `search]`, `regex]`.

use crate::constants::MAX_ENTRY_INDEX;
use crate::error::GridError;

/// A recognized form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FieldKey {
    Draw,
    Start,
    Length,
    Search(SearchField),
    Order { index: usize, field: OrderField },
    Column { index: usize, field: ColumnField },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SearchField {
    Value,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OrderField {
    Column,
    Dir,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ColumnField {
    Data,
    Name,
    Searchable,
    Orderable,
    Search(SearchField),
}

/// Root token of a key (everything before the first `[`).
#[inline]
pub(super) fn root(key: &str) -> &str {
    key.split_once('[').map_or(key, |(root, _)| root)
}

impl FieldKey {
    /// Parse a raw form key.
    ///
    /// Returns `Ok(None)` for keys outside the protocol's roots. Keys under a
    /// protocol root that break the grammar are [`GridError::MalformedKey`].
    pub(super) fn parse(key: &str) -> Result<Option<Self>, GridError> {
        let mut parts = key.split('[');
        let root = parts.next().unwrap_or_default();
        let segments: Vec<&str> = parts.collect();

        let field = match root {
            "draw" | "start" | "length" => {
                if !segments.is_empty() {
                    return Err(GridError::malformed(key));
                }
                match root {
                    "draw" => Self::Draw,
                    "start" => Self::Start,
                    _ => Self::Length,
                }
            },
            "search" => match segments.as_slice() {
                [field] => {
                    Self::Search(search_field(field).ok_or_else(|| GridError::malformed(key))?)
                },
                _ => return Err(GridError::malformed(key)),
            },
            "order" => {
                let (index, names) = indexed(key, &segments)?;
                let field = match names {
                    ["column", ""] => OrderField::Column,
                    ["dir", ""] => OrderField::Dir,
                    ["name", ""] => OrderField::Name,
                    _ => return Err(GridError::malformed(key)),
                };
                Self::Order { index, field }
            },
            "columns" => {
                let (index, names) = indexed(key, &segments)?;
                let field = match names {
                    ["data", ""] => ColumnField::Data,
                    ["name", ""] => ColumnField::Name,
                    ["searchable", ""] => ColumnField::Searchable,
                    ["orderable", ""] => ColumnField::Orderable,
                    ["search", "value"] => ColumnField::Search(SearchField::Value),
                    ["search", "regex"] => ColumnField::Search(SearchField::Regex),
                    _ => return Err(GridError::malformed(key)),
                };
                Self::Column { index, field }
            },
            _ => return Ok(None),
        };

        Ok(Some(field))
    }
}

fn search_field(segment: &str) -> Option<SearchField> {
    match segment {
        "value]" => Some(SearchField::Value),
        "regex]" => Some(SearchField::Regex),
        _ => None,
    }
}

/// Validate `<n>]` followed by one or two `<name>]` segments.
///
/// Returns the index and the field names with brackets stripped; a missing
/// second name is `""`.
fn indexed<'s>(key: &str, segments: &'s [&str]) -> Result<(usize, [&'s str; 2]), GridError> {
    let malformed = || GridError::malformed(key);

    let (index, first, second) = match segments {
        [index, first] => (index, first, None),
        [index, first, second] => (index, first, Some(second)),
        _ => return Err(malformed()),
    };

    let index = index_token(index).ok_or_else(malformed)?;
    let first = name_token(first).ok_or_else(malformed)?;
    let second = match second {
        Some(seg) => name_token(seg).ok_or_else(malformed)?,
        None => "",
    };

    Ok((index, [first, second]))
}

/// `^[0-9]+]$`, parsed and bounded by [`MAX_ENTRY_INDEX`].
fn index_token(segment: &str) -> Option<usize> {
    let digits = segment.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n <= MAX_ENTRY_INDEX)
}

/// `^[a-z]+]$`, with the bracket stripped.
fn name_token(segment: &str) -> Option<&str> {
    let name = segment.strip_suffix(']')?;
    (!name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase())).then_some(name)
}
